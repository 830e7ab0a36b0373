pub mod decode;
pub mod event;
pub mod metrics;
pub mod protocol;
pub mod sse;

pub use decode::*;
pub use event::*;
pub use metrics::*;
pub use protocol::*;
pub use sse::*;
