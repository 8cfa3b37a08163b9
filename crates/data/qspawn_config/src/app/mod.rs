pub mod qspawn_random_spawn;
