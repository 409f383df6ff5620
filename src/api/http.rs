//! HTTP implementation of the backend API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use url::Url;

use super::{cookies::cookie_value, error::ApiError, traits::TrafficApi};
use crate::models::{
    ConfigPatch, LocationSample, NotificationConfig, TrafficNotification, TrafficStats,
};

const CONFIG_PATH: &str = "api/notificaciones/config/";
const PUSH_PATH: &str = "api/ubicacion/actualizar/";
const STATS_PATH: &str = "api/notificaciones/estadisticas/";
const CONFIG_UPDATE_PATH: &str = "api/notificaciones/config/actualizar/";

/// Header the backend expects the CSRF cookie value to be echoed in.
const CSRF_HEADER: &str = "X-CSRFToken";

/// The only `status` value treated as success; anything else is an error.
const SUCCESS_STATUS: &str = "success";

/// Backend API client over HTTP.
///
/// Same-origin, credentialed via a session cookie string; the CSRF token is
/// read from that cookie and echoed in the [`CSRF_HEADER`] on mutating
/// requests.
pub struct HttpTrafficApi {
    base_url: Url,
    client: Arc<ClientWithMiddleware>,
    cookie_header: String,
    csrf_token: Option<String>,
}

impl HttpTrafficApi {
    /// Creates a new client against `base_url`, authenticating with the
    /// given cookie string.
    pub fn new(
        base_url: Url,
        client: Arc<ClientWithMiddleware>,
        session_cookie: &str,
        csrf_cookie_name: &str,
    ) -> Self {
        let csrf_token = cookie_value(session_cookie, csrf_cookie_name);
        if csrf_token.is_none() {
            tracing::warn!(
                cookie = csrf_cookie_name,
                "CSRF cookie not found in session cookie string; mutating requests may be rejected."
            );
        }
        Self { base_url, client, cookie_header: session_cookie.to_string(), csrf_token }
    }

    fn endpoint(&self, path: &'static str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn get(&self, url: Url) -> reqwest_middleware::RequestBuilder {
        let mut builder = self.client.get(url);
        if !self.cookie_header.is_empty() {
            builder = builder.header(COOKIE, &self.cookie_header);
        }
        builder
    }

    fn post(&self, url: Url) -> reqwest_middleware::RequestBuilder {
        let mut builder = self.client.post(url);
        if !self.cookie_header.is_empty() {
            builder = builder.header(COOKIE, &self.cookie_header);
        }
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        builder
    }
}

/// Fails unless the response `status` is the literal `"success"`.
fn ensure_success(
    endpoint: &'static str,
    status: String,
    message: Option<String>,
) -> Result<(), ApiError> {
    if status == SUCCESS_STATUS {
        Ok(())
    } else {
        Err(ApiError::ErrorStatus { endpoint, status, message: message.unwrap_or_default() })
    }
}

#[derive(Deserialize)]
struct ConfigResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    config: Option<NotificationConfig>,
}

#[derive(Deserialize)]
struct PushResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    notifications: Vec<TrafficNotification>,
}

#[derive(Deserialize)]
struct StatsResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    stats: Option<TrafficStats>,
}

#[derive(Deserialize)]
struct AckResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl TrafficApi for HttpTrafficApi {
    async fn fetch_config(&self) -> Result<NotificationConfig, ApiError> {
        let url = self.endpoint(CONFIG_PATH)?;
        let response: ConfigResponse = self.get(url).send().await?.json().await?;
        ensure_success(CONFIG_PATH, response.status, response.message)?;
        response.config.ok_or(ApiError::Malformed { endpoint: CONFIG_PATH })
    }

    async fn push_location(
        &self,
        sample: &LocationSample,
    ) -> Result<Vec<TrafficNotification>, ApiError> {
        let url = self.endpoint(PUSH_PATH)?;
        let body = serde_json::json!({
            "latitud": sample.latitude,
            "longitud": sample.longitude,
        });
        let response: PushResponse = self.post(url).json(&body).send().await?.json().await?;
        ensure_success(PUSH_PATH, response.status, response.message)?;
        Ok(response.notifications)
    }

    async fn fetch_stats(&self) -> Result<TrafficStats, ApiError> {
        let url = self.endpoint(STATS_PATH)?;
        let response: StatsResponse = self.get(url).send().await?.json().await?;
        ensure_success(STATS_PATH, response.status, response.message)?;
        response.stats.ok_or(ApiError::Malformed { endpoint: STATS_PATH })
    }

    async fn update_config(&self, patch: &ConfigPatch) -> Result<(), ApiError> {
        let url = self.endpoint(CONFIG_UPDATE_PATH)?;
        let response: AckResponse = self.post(url).json(patch).send().await?.json().await?;
        ensure_success(CONFIG_UPDATE_PATH, response.status, response.message)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockito::Matcher;

    use super::*;
    use crate::{config::HttpRetryConfig, http_client::create_http_client};

    fn create_test_api(server_url: &str, session_cookie: &str) -> HttpTrafficApi {
        let client =
            Arc::new(create_http_client(&HttpRetryConfig::default(), reqwest::Client::new()));
        let base_url = Url::parse(&format!("{server_url}/")).unwrap();
        HttpTrafficApi::new(base_url, client, session_cookie, "csrftoken")
    }

    fn sample() -> LocationSample {
        LocationSample {
            latitude: -12.05,
            longitude: -77.04,
            accuracy_meters: 10.0,
            observed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fetch_config_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/notificaciones/config/")
            .with_status(200)
            .with_body(
                r#"{"status":"success","config":{"notificaciones_activas":true,"frecuencia_actualizacion":45}}"#,
            )
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        let config = api.fetch_config().await.unwrap();

        assert!(config.active);
        assert_eq!(config.update_frequency.as_secs(), 45);
        mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_config_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/notificaciones/config/")
            .with_status(200)
            .with_body(r#"{"status":"error","message":"no profile"}"#)
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        let result = api.fetch_config().await;

        match result {
            Err(ApiError::ErrorStatus { status, message, .. }) => {
                assert_eq!(status, "error");
                assert_eq!(message, "no profile");
            }
            other => panic!("expected ErrorStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_config_missing_payload_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/notificaciones/config/")
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        assert!(matches!(api.fetch_config().await, Err(ApiError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_push_location_sends_coordinates_and_csrf_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ubicacion/actualizar/")
            .match_header("X-CSRFToken", "tok")
            .match_header("Cookie", "sessionid=s1; csrftoken=tok")
            .match_body(Matcher::Json(serde_json::json!({
                "latitud": -12.05,
                "longitud": -77.04,
            })))
            .with_status(200)
            .with_body(r#"{"status":"success","notifications":[]}"#)
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "sessionid=s1; csrftoken=tok");
        let notifications = api.push_location(&sample()).await.unwrap();

        assert!(notifications.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn test_push_location_parses_notifications() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ubicacion/actualizar/")
            .with_status(200)
            .with_body(
                r#"{"status":"success","notifications":[
                    {"id":1,"tipo":"accidente","nivel_peligro":3,"distancia":0.8,
                     "titulo":"Choque","ubicacion":"Av. X","mensaje":"m"}
                ]}"#,
            )
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        let notifications = api.push_location(&sample()).await.unwrap();

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "accidente");
    }

    #[tokio::test]
    async fn test_push_location_missing_notifications_defaults_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ubicacion/actualizar/")
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        assert!(api.push_location(&sample()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_stats_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/notificaciones/estadisticas/")
            .with_status(200)
            .with_body(
                r#"{"status":"success","stats":{"reportes_cercanos":2,"radio_configurado":5.0,"ultima_actualizacion":null}}"#,
            )
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        let stats = api.fetch_stats().await.unwrap();

        assert_eq!(stats.nearby_reports, 2);
        assert_eq!(stats.configured_radius_km, 5.0);
        assert!(stats.last_updated_at.is_none());
    }

    #[tokio::test]
    async fn test_update_config_posts_patch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/notificaciones/config/actualizar/")
            .match_header("X-CSRFToken", "tok")
            .match_body(Matcher::Json(serde_json::json!({ "notificaciones_activas": false })))
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        let patch = ConfigPatch { active: Some(false), ..Default::default() };
        api.update_config(&patch).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/notificaciones/estadisticas/")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let api = create_test_api(&server.url(), "csrftoken=tok");
        assert!(matches!(api.fetch_stats().await, Err(ApiError::Decode(_))));
    }
}
