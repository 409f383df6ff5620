//! The presentation sink: where approved notifications and status updates
//! are rendered.

mod console;
mod traits;

pub use console::ConsolePresenter;
#[cfg(test)]
pub use traits::MockPresenter;
pub use traits::{Presenter, StatusKind};
