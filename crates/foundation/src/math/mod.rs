pub mod geometry;
pub mod vec;

pub use geometry::*;
pub use vec::*;
