//! Integration tests for the tracking loop against a mock backend.

use std::{sync::Arc, time::Duration};

use atalaya::{
    api::HttpTrafficApi,
    presenter::{Presenter, StatusKind},
    providers::{LocationSource, PositionBackend},
    test_helpers::{
        PresenterEvent, RecordingPresenter, ScriptedPositionBackend, create_test_http_client,
        create_test_sample,
    },
    tracker::LocationTracker,
};
use tokio_util::sync::CancellationToken;
use url::Url;

const SESSION_COOKIE: &str = "sessionid=s1; csrftoken=tok";

fn create_api(server_url: &str) -> Arc<HttpTrafficApi> {
    let base_url = Url::parse(&format!("{server_url}/")).unwrap();
    Arc::new(HttpTrafficApi::new(base_url, create_test_http_client(), SESSION_COOKIE, "csrftoken"))
}

#[tokio::test]
async fn test_active_config_drives_reports_and_rendering() {
    let mut server = mockito::Server::new_async().await;

    let config_mock = server
        .mock("GET", "/api/notificaciones/config/")
        .with_status(200)
        .with_body(
            r#"{"status":"success","config":{"notificaciones_activas":true,"frecuencia_actualizacion":1}}"#,
        )
        .create_async()
        .await;

    // Every report returns the same notification; the gate must collapse the
    // repeats into a single toast.
    let push_mock = server
        .mock("POST", "/api/ubicacion/actualizar/")
        .match_header("X-CSRFToken", "tok")
        .match_header("Cookie", SESSION_COOKIE)
        .with_status(200)
        .with_body(
            r#"{"status":"success","notifications":[
                {"id":7,"tipo":"accidente","nivel_peligro":3,"distancia":0.4,
                 "titulo":"Choque","ubicacion":"Av. X","mensaje":"m"}
            ]}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let stats_mock = server
        .mock("GET", "/api/notificaciones/estadisticas/")
        .with_status(200)
        .with_body(
            r#"{"status":"success","stats":{"reportes_cercanos":1,"radio_configurado":5.0,"ultima_actualizacion":null}}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let api = create_api(&server.url());
    let backend = Arc::new(ScriptedPositionBackend::new(vec![Ok(create_test_sample())]));
    let source = Arc::new(LocationSource::new(backend, Duration::from_millis(50)));
    let presenter = Arc::new(RecordingPresenter::new());
    let cancel = CancellationToken::new();

    let (tracker, _handle) =
        LocationTracker::new(api, source, Arc::clone(&presenter) as Arc<dyn Presenter>, cancel.clone());
    let task = tokio::spawn(tracker.run());

    tokio::time::sleep(Duration::from_millis(400)).await;
    cancel.cancel();
    task.await.unwrap();

    config_mock.assert_async().await;
    push_mock.assert_async().await;
    stats_mock.assert_async().await;

    let events = presenter.events();
    assert!(events.contains(&PresenterEvent::Icon(true)));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, PresenterEvent::Status(m, StatusKind::Success) if m == "Location updated"))
    );
    // Repeated pushes of the same alert render exactly one toast.
    let toasts = events.iter().filter(|e| matches!(e, PresenterEvent::Toast(7, _))).count();
    assert_eq!(toasts, 1);
    assert!(events.contains(&PresenterEvent::Badge(1)));
}

#[tokio::test]
async fn test_inactive_config_reports_nothing() {
    let mut server = mockito::Server::new_async().await;

    let config_mock = server
        .mock("GET", "/api/notificaciones/config/")
        .with_status(200)
        .with_body(
            r#"{"status":"success","config":{"notificaciones_activas":false,"frecuencia_actualizacion":1}}"#,
        )
        .create_async()
        .await;

    let push_mock = server
        .mock("POST", "/api/ubicacion/actualizar/")
        .expect(0)
        .create_async()
        .await;

    let api = create_api(&server.url());
    let backend = Arc::new(ScriptedPositionBackend::new(vec![Ok(create_test_sample())]));
    let source = Arc::new(LocationSource::new(
        Arc::clone(&backend) as Arc<dyn PositionBackend>,
        Duration::from_millis(50),
    ));
    let presenter = Arc::new(RecordingPresenter::new());
    let cancel = CancellationToken::new();

    let (tracker, _handle) =
        LocationTracker::new(api, source, Arc::clone(&presenter) as Arc<dyn Presenter>, cancel.clone());
    let task = tokio::spawn(tracker.run());

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    task.await.unwrap();

    config_mock.assert_async().await;
    push_mock.assert_async().await;

    assert_eq!(backend.calls(), 0);
    assert!(presenter.events().contains(&PresenterEvent::Icon(false)));
    assert!(!presenter.events().iter().any(|e| matches!(e, PresenterEvent::Toast(..))));
}

#[tokio::test]
async fn test_toggle_starts_tracking_and_persists_the_change() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/notificaciones/config/")
        .with_status(200)
        .with_body(
            r#"{"status":"success","config":{"notificaciones_activas":false,"frecuencia_actualizacion":1}}"#,
        )
        .create_async()
        .await;

    let update_mock = server
        .mock("POST", "/api/notificaciones/config/actualizar/")
        .match_header("X-CSRFToken", "tok")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "notificaciones_activas": true
        })))
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let push_mock = server
        .mock("POST", "/api/ubicacion/actualizar/")
        .with_status(200)
        .with_body(r#"{"status":"success","notifications":[]}"#)
        .expect_at_least(1)
        .create_async()
        .await;

    let stats_mock = server
        .mock("GET", "/api/notificaciones/estadisticas/")
        .with_status(200)
        .with_body(
            r#"{"status":"success","stats":{"reportes_cercanos":0,"radio_configurado":5.0,"ultima_actualizacion":null}}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let api = create_api(&server.url());
    let backend = Arc::new(ScriptedPositionBackend::new(vec![Ok(create_test_sample())]));
    let source = Arc::new(LocationSource::new(backend, Duration::from_millis(50)));
    let presenter = Arc::new(RecordingPresenter::new());
    let cancel = CancellationToken::new();

    let (tracker, handle) =
        LocationTracker::new(api, source, Arc::clone(&presenter) as Arc<dyn Presenter>, cancel.clone());
    let task = tokio::spawn(tracker.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.toggle_notifications().await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();
    task.await.unwrap();

    update_mock.assert_async().await;
    push_mock.assert_async().await;
    stats_mock.assert_async().await;

    let events = presenter.events();
    assert!(events.contains(&PresenterEvent::Icon(false)));
    assert!(events.contains(&PresenterEvent::Icon(true)));
    assert!(events.contains(&PresenterEvent::Summary(0, atalaya::models::TrafficLevel::Good)));
}
