//! Client for the traffic backend's notification API.

mod cookies;
mod error;
mod http;
mod traits;

pub use cookies::cookie_value;
pub use error::ApiError;
pub use http::HttpTrafficApi;
#[cfg(test)]
pub use traits::MockTrafficApi;
pub use traits::TrafficApi;
