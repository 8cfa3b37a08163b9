pub mod access;
pub mod coordinate;
pub mod safety;
pub mod search;

pub use access::WorldAccess;
pub use coordinate::Coordinate;
pub use safety::{Rejection, SafetyFilter, Verdict, check_column, is_safe};
pub use search::{SearchOutcome, search};
