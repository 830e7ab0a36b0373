pub mod bounds;
pub mod math;
pub mod region;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use math::*;
pub use region::*;
pub use time::*;
