use noise::{Fbm, NoiseFn, Perlin};
use qspawn_world::{Coordinate, WorldAccess};

const SEA_LEVEL: i32 = 63;
const HEIGHT_SCALE: f64 = 1.0 / 600.0;
const MOISTURE_SCALE: f64 = 1.0 / 900.0;
const RIVER_SCALE: f64 = 1.0 / 400.0;
const BORDER: i32 = 29_999_984;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Biome {
    Ocean,
    River,
    Desert,
    Plains,
    Forest,
    Peaks,
}

impl Biome {
    fn id(self) -> &'static str {
        match self {
            Biome::Ocean => "minecraft:ocean",
            Biome::River => "minecraft:river",
            Biome::Desert => "minecraft:desert",
            Biome::Plains => "minecraft:plains",
            Biome::Forest => "minecraft:forest",
            Biome::Peaks => "minecraft:stony_peaks",
        }
    }

    fn ground(self) -> &'static str {
        match self {
            Biome::Ocean | Biome::River => "minecraft:water",
            Biome::Desert => "minecraft:sand",
            Biome::Plains | Biome::Forest => "minecraft:grass_block",
            Biome::Peaks => "minecraft:stone",
        }
    }
}

/// 用噪声生成的只读演示世界
///
/// 地形完全由种子决定,可以在任意线程读取。
pub struct NoiseWorld {
    height: Fbm<Perlin>,
    moisture: Fbm<Perlin>,
    river: Perlin,
}

impl NoiseWorld {
    pub fn new(seed: u32) -> Self {
        Self {
            height: Fbm::<Perlin>::new(seed),
            moisture: Fbm::<Perlin>::new(seed.wrapping_add(1)),
            river: Perlin::new(seed.wrapping_add(2)),
        }
    }

    fn terrain(&self, x: i32, z: i32) -> i32 {
        let h = self
            .height
            .get([x as f64 * HEIGHT_SCALE, z as f64 * HEIGHT_SCALE]);
        (66.0 + h * 40.0).round() as i32
    }

    fn biome(&self, x: i32, z: i32) -> Biome {
        let terrain = self.terrain(x, z);
        if terrain < SEA_LEVEL {
            return Biome::Ocean;
        }
        let river = self
            .river
            .get([x as f64 * RIVER_SCALE, z as f64 * RIVER_SCALE]);
        if river.abs() < 0.03 && terrain < 80 {
            return Biome::River;
        }
        if terrain > 95 {
            return Biome::Peaks;
        }
        let moisture = self
            .moisture
            .get([x as f64 * MOISTURE_SCALE, z as f64 * MOISTURE_SCALE]);
        if moisture < -0.25 {
            Biome::Desert
        } else if moisture > 0.25 {
            Biome::Forest
        } else {
            Biome::Plains
        }
    }

    /// 水面算作表面
    fn surface(&self, x: i32, z: i32) -> i32 {
        match self.biome(x, z) {
            Biome::Ocean | Biome::River => self.terrain(x, z).max(SEA_LEVEL),
            _ => self.terrain(x, z),
        }
    }

    /// 表面上方的障碍: 森林里的树干、沙漠里的仙人掌
    fn obstacle(&self, x: i32, z: i32, biome: Biome) -> Option<&'static str> {
        let hash = (x.wrapping_mul(73_856_093) ^ z.wrapping_mul(19_349_663)).rem_euclid(16);
        match biome {
            Biome::Forest if hash < 5 => Some("minecraft:oak_log"),
            Biome::Desert if hash == 0 => Some("minecraft:cactus"),
            _ => None,
        }
    }
}

impl WorldAccess for NoiseWorld {
    fn ensure_column_loaded(&self, _x: i32, _z: i32) -> anyhow::Result<()> {
        Ok(())
    }

    fn surface_height(&self, x: i32, z: i32) -> anyhow::Result<i32> {
        Ok(self.surface(x, z))
    }

    fn biome_id_at(&self, pos: Coordinate) -> anyhow::Result<String> {
        Ok(self.biome(pos.x, pos.z).id().to_string())
    }

    fn block_id_at(&self, pos: Coordinate) -> anyhow::Result<String> {
        let surface = self.surface(pos.x, pos.z);
        let biome = self.biome(pos.x, pos.z);
        let id = if pos.y < surface - 1 {
            "minecraft:stone"
        } else if pos.y == surface - 1 {
            biome.ground()
        } else if pos.y <= surface + 1 {
            self.obstacle(pos.x, pos.z, biome)
                .unwrap_or("minecraft:air")
        } else {
            "minecraft:air"
        };
        Ok(id.to_string())
    }

    fn is_air(&self, pos: Coordinate) -> anyhow::Result<bool> {
        Ok(self.block_id_at(pos)? == "minecraft:air")
    }

    fn world_border_contains(&self, pos: Coordinate) -> bool {
        pos.x.abs() <= BORDER && pos.z.abs() <= BORDER
    }

    fn default_spawn(&self) -> Coordinate {
        Coordinate::new(0, self.surface(0, 0), 0)
    }
}
