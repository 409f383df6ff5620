use crate::models::TrafficNotification;

/// A builder for creating `TrafficNotification` instances for testing.
pub struct NotificationBuilder {
    notification: TrafficNotification,
}

impl NotificationBuilder {
    /// Creates a builder for a notification with the given report id.
    pub fn new(id: i64) -> Self {
        Self {
            notification: TrafficNotification {
                id,
                kind: "accidente".to_string(),
                danger_level: 2,
                distance_km: 1.0,
                title: format!("Incidente #{id}"),
                location: "Av. Arequipa, Lince".to_string(),
                message: "Incidente reportado cerca de tu ubicacion.".to_string(),
            },
        }
    }

    /// Sets the incident kind.
    pub fn kind(mut self, kind: &str) -> Self {
        self.notification.kind = kind.to_string();
        self
    }

    /// Sets the danger level.
    pub fn danger_level(mut self, level: u8) -> Self {
        self.notification.danger_level = level;
        self
    }

    /// Sets the distance in kilometers.
    pub fn distance_km(mut self, distance: f64) -> Self {
        self.notification.distance_km = distance;
        self
    }

    /// Sets the headline.
    pub fn title(mut self, title: &str) -> Self {
        self.notification.title = title.to_string();
        self
    }

    /// Builds the notification.
    pub fn build(self) -> TrafficNotification {
        self.notification
    }
}
