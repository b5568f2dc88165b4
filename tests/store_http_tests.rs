use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use integrations_client::{
    InstallResult, Integration, IntegrationPatch, IntegrationStore, StoreEvent,
    api::{HttpIntegrationsApi, IntegrationsApi, IntegrationsEndpoints},
    config::Config,
    notify::ChannelNotifier,
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;
use url::Url;

#[derive(Default)]
struct Backend {
    records: Vec<Integration>,
    next_id: i64,
    install_result: Value,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
struct BackendState {
    inner: Arc<Mutex<Backend>>,
}

impl BackendState {
    fn seeded(records: Vec<Integration>) -> Self {
        let next_id = records.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Backend {
                records,
                next_id,
                install_result: json!({ "output": "", "success": true }),
                requests: Vec::new(),
            })),
        }
    }

    fn log(&self, method: &Method, uri: &Uri) {
        self.inner
            .lock()
            .unwrap()
            .requests
            .push(format!("{method} {uri}"));
    }

    fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn integration(id: i64, name: &str, enabled: bool) -> Integration {
    Integration {
        id,
        name: name.to_string(),
        enabled,
        install_url: format!("pip://{name}"),
        ..Default::default()
    }
}

async fn list_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Integration>> {
    state.log(&method, &uri);
    let only_enabled = params.get("onlyEnabled").map(String::as_str) == Some("true");
    let backend = state.inner.lock().unwrap();
    Json(
        backend
            .records
            .iter()
            .filter(|i| !only_enabled || i.enabled)
            .cloned()
            .collect(),
    )
}

async fn create_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Json(mut payload): Json<Integration>,
) -> (StatusCode, Json<Integration>) {
    state.log(&method, &uri);
    let mut backend = state.inner.lock().unwrap();
    payload.id = backend.next_id;
    backend.next_id += 1;
    backend.records.push(payload.clone());
    (StatusCode::CREATED, Json(payload))
}

async fn update_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
    Json(patch): Json<IntegrationPatch>,
) -> Response {
    state.log(&method, &uri);
    let mut backend = state.inner.lock().unwrap();
    match backend.records.iter_mut().find(|i| i.id == id) {
        Some(record) => {
            patch.apply_to(record);
            Json(record.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

async fn delete_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
) -> StatusCode {
    state.log(&method, &uri);
    state.inner.lock().unwrap().records.retain(|i| i.id != id);
    StatusCode::NO_CONTENT
}

async fn install_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Path(_id): Path<i64>,
) -> Json<Value> {
    state.log(&method, &uri);
    Json(state.inner.lock().unwrap().install_result.clone())
}

async fn frontend_handler(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
) -> Response {
    state.log(&method, &uri);
    match id {
        1 => Json(json!("/static/integrations/one.js")).into_response(),
        2 => StatusCode::OK.into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "frontend build missing").into_response(),
    }
}

fn backend_router(state: BackendState) -> Router {
    Router::new()
        .route(
            "/core/integrations/",
            get(list_handler).post(create_handler),
        )
        .route(
            "/core/integrations/{id}/",
            put(update_handler).delete(delete_handler),
        )
        .route("/core/integrations/{id}/install/", post(install_handler))
        .route("/core/integrations/{id}/frontend/", get(frontend_handler))
        .with_state(state)
}

async fn spawn_test_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{}/core/", addr)).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    base
}

fn store_for(base: &Url) -> (IntegrationStore, tokio::sync::mpsc::UnboundedReceiver<String>) {
    let api = HttpIntegrationsApi::new(
        reqwest::Client::new(),
        IntegrationsEndpoints::new(base).expect("endpoints"),
    );
    let (notifier, rx) = ChannelNotifier::new();
    (IntegrationStore::new(Arc::new(api), Arc::new(notifier)), rx)
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(message) = rx.try_recv() {
        out.push(message);
    }
    out
}

#[tokio::test]
async fn full_lifecycle_against_http_backend() {
    let backend = BackendState::seeded(vec![
        integration(1, "ping", true),
        integration(2, "pong", false),
    ]);
    let base = spawn_test_server(backend_router(backend.clone())).await;
    let (store, mut notifications) = store_for(&base);

    // list(true) replaces wholesale with the enabled subset.
    store.list(true).await;
    assert_eq!(store.integrations(), vec![integration(1, "ping", true)]);
    assert!(!store.is_error());

    store.list(false).await;
    assert_eq!(store.integrations().len(), 2);

    store.create(integration(0, "pang", false)).await;
    let created = store.integrations().last().cloned().expect("created record");
    assert_eq!(created.id, 3);
    assert_eq!(created.name, "pang");

    let patch = IntegrationPatch {
        desc: Some("second".to_string()),
        ..Default::default()
    };
    store.update(2, patch).await;
    let ids: Vec<i64> = store.integrations().iter().map(|i| i.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(
        store.get(2).and_then(|i| i.desc).as_deref(),
        Some("second")
    );

    store.delete(1).await;
    let ids: Vec<i64> = store.integrations().iter().map(|i| i.id).collect();
    assert_eq!(ids, [2, 3]);
    assert!(!store.is_error());

    assert_eq!(
        drain(&mut notifications),
        [
            "Integration was added successfully",
            "Integration was edited successfully",
            "Integration was successfully removed",
        ]
    );

    assert_eq!(
        backend.requests(),
        [
            "GET /core/integrations/?onlyEnabled=true",
            "GET /core/integrations/",
            "POST /core/integrations/",
            "PUT /core/integrations/2/",
            "DELETE /core/integrations/1/",
        ]
    );
}

#[tokio::test]
async fn install_reporting_failure_still_enables_locally() {
    let backend = BackendState::seeded(vec![integration(42, "answer", false)]);
    backend.inner.lock().unwrap().install_result =
        json!({ "output": "partial failure", "success": false });
    let base = spawn_test_server(backend_router(backend.clone())).await;
    let (store, mut notifications) = store_for(&base);
    store.list(false).await;

    let result = store.install(42).await;

    assert_eq!(
        result,
        InstallResult {
            output: "partial failure".to_string(),
            success: false,
        }
    );
    assert!(store.get(42).expect("record 42").enabled);
    assert!(drain(&mut notifications).is_empty());
    assert!(!store.is_error());
}

#[tokio::test]
async fn update_rejected_by_backend_sets_error() {
    let backend = BackendState::seeded(vec![integration(1, "ping", false)]);
    let base = spawn_test_server(backend_router(backend)).await;
    let (store, _notifications) = store_for(&base);
    store.list(false).await;

    store.update(404, IntegrationPatch::default()).await;

    assert!(store.is_error());
    assert_eq!(store.integrations(), vec![integration(1, "ping", false)]);
}

#[tokio::test]
async fn frontend_locator_paths() {
    let base = spawn_test_server(backend_router(BackendState::seeded(vec![]))).await;
    let (store, _notifications) = store_for(&base);

    assert_eq!(
        store.fetch_frontend_module(1).await.as_deref(),
        Some("/static/integrations/one.js")
    );
    assert!(!store.is_error());

    // 200 with an empty body: no module, not an error.
    assert_eq!(store.fetch_frontend_module(2).await, None);
    assert!(!store.is_error());

    assert_eq!(store.fetch_frontend_module(3).await, None);
    assert!(store.is_error());
}

#[tokio::test]
async fn transport_surfaces_status_for_rejections() {
    let base = spawn_test_server(backend_router(BackendState::seeded(vec![]))).await;
    let api = HttpIntegrationsApi::new(
        reqwest::Client::new(),
        IntegrationsEndpoints::new(&base).expect("endpoints"),
    );

    let err = api
        .update(7, &IntegrationPatch::default())
        .await
        .expect_err("unknown id must be rejected");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_backend_keeps_sequence_and_sets_error() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let app = backend_router(BackendState::seeded(vec![integration(1, "ping", true)]));
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("server run");
    });

    // The configured client sends `Connection: close`, so nothing stays pooled.
    let mut cfg = Config::default();
    cfg.backend.base_url = Url::parse(&format!("http://{addr}/core/")).expect("valid url");
    let store = IntegrationStore::from_config(&cfg).expect("store from config");

    store.list(false).await;
    let before = store.integrations();
    assert_eq!(before, vec![integration(1, "ping", true)]);

    shutdown_tx.send(()).expect("server still running");
    server.await.expect("server task");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _subscription = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    store.list(false).await;

    assert!(store.is_error());
    assert!(!store.is_loading());
    assert_eq!(store.integrations(), before);
    assert_eq!(*seen.lock().unwrap(), vec![StoreEvent::ErrorChanged(true)]);
}
