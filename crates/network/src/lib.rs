pub mod describe;
pub mod elements;
pub mod filter;
pub mod inspect;
pub mod log;
pub mod state;

#[cfg(test)]
mod fixtures;

pub use describe::*;
pub use elements::*;
pub use filter::*;
pub use inspect::*;
pub use log::*;
pub use state::*;
