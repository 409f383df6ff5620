//! Location sources: the platform capability trait and the adapter the
//! tracking loop consumes.

mod adapter;
mod fixed;
mod traits;

pub use adapter::{LocationSource, PositionOptions, WatchHandle};
pub use fixed::FixedPositionBackend;
#[cfg(test)]
pub use traits::MockPositionBackend;
pub use traits::{PositionBackend, PositionError};
