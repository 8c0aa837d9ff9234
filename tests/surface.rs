mod common;

use common::{FakeHost, HostEvent};
use dlbridge::host::WindowId;
use dlbridge::messages::{SurfaceRequest, SurfaceResponse};
use dlbridge::options::Options;
use dlbridge::DownloadBridge;
use serde_json::json;

#[tokio::test]
async fn server_info_reports_without_consuming() {
    let mut options = Options::default();
    options.server = "http://127.0.0.1:8888/".to_string();
    options.username = "user".to_string();
    options.password = "pass".to_string();
    let bridge = DownloadBridge::new(FakeHost::new(), options).expect("bridge");

    for _ in 0..2 {
        let response = bridge
            .handle_message(SurfaceRequest::ServerInfo)
            .await
            .expect("server_info");
        match response {
            Some(SurfaceResponse::ServerInfo(info)) => {
                assert_eq!(info.server, "http://127.0.0.1:8888/");
                assert_eq!(info.username, "user");
                assert_eq!(info.password, "pass");
            }
            other => panic!("expected server info, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn loading_for_unknown_window_gets_no_response() {
    let bridge = DownloadBridge::new(FakeHost::new(), Options::default()).expect("bridge");
    let response = bridge
        .handle_message(SurfaceRequest::Loading {
            window_id: WindowId(999),
        })
        .await
        .expect("loading message");
    assert!(response.is_none());
}

#[tokio::test]
async fn refresh_options_swaps_snapshot_and_toggles_hooks() {
    let host = FakeHost::new();
    host.set_stored_options(json!({
        "server": "http://127.0.0.1:9999/",
        "override": true,
    }));
    let bridge = DownloadBridge::new(host, Options::default()).expect("bridge");

    let response = bridge
        .handle_message(SurfaceRequest::RefreshOptions)
        .await
        .expect("refresh");
    assert_eq!(response, Some(SurfaceResponse::Ack {}));
    assert_eq!(bridge.options().server, "http://127.0.0.1:9999/");
    assert!(bridge.options().override_downloads);
    assert_eq!(bridge.host().events(), vec![HostEvent::HooksEnabled(true)]);

    // Turning override off deregisters the hooks on the next refresh.
    bridge.host().set_stored_options(json!({ "override": false }));
    bridge
        .handle_message(SurfaceRequest::RefreshOptions)
        .await
        .expect("second refresh");
    assert!(!bridge.options().override_downloads);
    assert_eq!(
        bridge.host().events(),
        vec![HostEvent::HooksEnabled(true), HostEvent::HooksEnabled(false)]
    );
}

#[tokio::test]
async fn from_host_loads_stored_options_at_startup() {
    let host = FakeHost::new();
    host.set_stored_options(json!({
        "default_directory": "/data/downloads",
        "override": true,
        "show_add_window": true,
    }));

    let bridge = DownloadBridge::from_host(host).await.expect("bridge");
    let options = bridge.options();
    assert_eq!(options.default_directory, "/data/downloads");
    assert!(options.override_downloads);
    assert!(options.show_add_window);
    // Defaults still fill the unset keys.
    assert_eq!(options.server, "http://localhost:80/");
    assert_eq!(bridge.host().events(), vec![HostEvent::HooksEnabled(true)]);
}
