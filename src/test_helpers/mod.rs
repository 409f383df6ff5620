//! A set of helpers for testing

mod backend;
mod http_client;
mod location;
mod notification;
mod presenter;
mod stats;

pub use backend::ScriptedPositionBackend;
pub use http_client::create_test_http_client;
pub use location::create_test_sample;
pub use notification::NotificationBuilder;
pub use presenter::{PresenterEvent, RecordingPresenter};
pub use stats::StatsBuilder;
