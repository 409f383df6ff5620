use chrono::Utc;

use crate::models::LocationSample;

/// Creates a location sample at a fixed downtown coordinate, observed now.
pub fn create_test_sample() -> LocationSample {
    LocationSample {
        latitude: -12.046374,
        longitude: -77.042793,
        accuracy_meters: 15.0,
        observed_at: Utc::now(),
    }
}
