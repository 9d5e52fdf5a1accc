pub mod roll;
pub mod slots;
pub mod trace;

pub use self::roll::{roll_from_accel, RollEstimator, Vec3};
pub use self::slots::{find_dots, slots_from_wire, RawDot, Slots, INACTIVE, SLOT_MAX};
pub use self::trace::TraceInput;
