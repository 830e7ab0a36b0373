pub mod controller;
pub mod element;
pub mod fit;
pub mod grid;
pub mod picking;
pub mod viewport;

pub use controller::*;
pub use element::*;
pub use fit::*;
pub use grid::*;
pub use picking::*;
pub use viewport::*;
