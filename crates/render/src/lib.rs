pub mod renderer;
pub mod style;
pub mod svg;

pub use renderer::*;
pub use style::*;
pub use svg::*;
