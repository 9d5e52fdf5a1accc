pub mod candidates;
pub mod pointer;
pub mod rotate;
pub mod single;

pub use self::candidates::{find_candidates, select_candidate, BarCandidate};
pub use self::pointer::{IrPointer, POINTER_SCALE};
pub use self::rotate::{rotate, rotate_dot, rotate_pair};
pub use self::single::guess_single;
