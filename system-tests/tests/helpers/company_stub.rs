// system-tests/tests/helpers/company_stub.rs
// ============================================================================
// Module: Company API Stub
// Description: In-memory company API served over loopback HTTP.
// Purpose: Run the company catalog end to end without the public service.
// Dependencies: axum, serde_json, tokio
// ============================================================================

//! ## Overview
//! Ids are 24-digit hex strings by default, or JSON numbers when
//! [`StubBehavior::numeric_ids`] is set. Every created company owns two
//! products.

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Faults the stub can inject.
#[derive(Clone, Debug, Default)]
pub struct StubBehavior {
    /// Delay before every response.
    pub response_delay: Duration,
    /// Status returned by `POST /company` instead of creating a record.
    pub create_failure: Option<u16>,
    /// Create succeeds but the response carries no `id`.
    pub omit_created_id: bool,
    /// `DELETE` answers 204 but keeps the record.
    pub delete_keeps_company: bool,
    /// Ids are JSON numbers instead of hex strings.
    pub numeric_ids: bool,
    /// Product listings omit `price`.
    pub malformed_products: bool,
}

/// Companies held by the stub.
#[derive(Default)]
struct Store {
    /// Last assigned id.
    next_id: u64,
    /// Records keyed by the id as it appears in request paths.
    companies: BTreeMap<String, Value>,
}

/// State shared by every handler.
#[derive(Clone)]
struct StubState {
    /// Injected faults.
    behavior: StubBehavior,
    /// Stored companies.
    store: Arc<Mutex<Store>>,
    /// Received requests as `METHOD path`.
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    /// Records the request line and applies the configured delay.
    async fn enter(&self, line: String) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(line);
        }
        if self.behavior.response_delay > Duration::ZERO {
            sleep(self.behavior.response_delay).await;
        }
    }
}

/// Handle for the running stub; dropping it shuts the server down.
pub struct CompanyStubHandle {
    /// Loopback base URL.
    base_url: String,
    /// Signals graceful shutdown.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
    /// Received requests as `METHOD path`.
    requests: Arc<Mutex<Vec<String>>>,
    /// Stored companies.
    store: Arc<Mutex<Store>>,
}

impl CompanyStubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns received requests as `METHOD path`, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the number of stored companies.
    pub fn company_count(&self) -> usize {
        self.store.lock().map_or(0, |store| store.companies.len())
    }
}

impl Drop for CompanyStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns a well-behaved stub.
pub fn spawn_company_stub() -> Result<CompanyStubHandle, String> {
    spawn_company_stub_with(StubBehavior::default())
}

/// Spawns a stub with the given faults.
pub fn spawn_company_stub_with(behavior: StubBehavior) -> Result<CompanyStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("company stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("company stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("company stub local addr failed: {err}"))?;

    let store = Arc::new(Mutex::new(Store::default()));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        store: Arc::clone(&store),
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/company", post(create_company))
        .route("/company/{id}", get(fetch_company).put(update_company).delete(delete_company))
        .route("/company/{id}/products", get(list_products))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(CompanyStubHandle {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        join: Some(join),
        requests,
        store,
    })
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// 404 with the API's not-found message.
fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Company not found" }))).into_response()
}

/// 500 for a poisoned store.
fn unavailable() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// `POST /company`: stores the record and returns it with its id.
async fn create_company(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.enter("POST /company".to_string()).await;
    if let Some(status) = state.behavior.create_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({ "message": "create rejected" }))).into_response();
    }
    let Value::Object(mut record) = body else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "expected an object" })))
            .into_response();
    };
    let Ok(mut store) = state.store.lock() else {
        return unavailable();
    };
    store.next_id += 1;
    let (key, id) = if state.behavior.numeric_ids {
        (store.next_id.to_string(), json!(store.next_id))
    } else {
        let key = format!("{:024x}", store.next_id);
        (key.clone(), Value::String(key))
    };
    record.insert("id".to_string(), id);
    let record = Value::Object(record);
    store.companies.insert(key, record.clone());
    drop(store);
    let mut response = record;
    if state.behavior.omit_created_id
        && let Value::Object(fields) = &mut response
    {
        fields.remove("id");
    }
    (StatusCode::CREATED, Json(response)).into_response()
}

/// `GET /company/{id}`.
async fn fetch_company(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.enter(format!("GET /company/{id}")).await;
    let Ok(store) = state.store.lock() else {
        return unavailable();
    };
    store.companies.get(&id).map_or_else(not_found, |record| Json(record.clone()).into_response())
}

/// `PUT /company/{id}`: overwrites every field except `id`.
async fn update_company(
    State(state): State<StubState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.enter(format!("PUT /company/{id}")).await;
    let Ok(mut store) = state.store.lock() else {
        return unavailable();
    };
    let Some(Value::Object(record)) = store.companies.get_mut(&id) else {
        return not_found();
    };
    if let Value::Object(fields) = body {
        for (key, value) in fields {
            if key != "id" {
                record.insert(key, value);
            }
        }
    }
    Json(Value::Object(record.clone())).into_response()
}

/// `DELETE /company/{id}`.
async fn delete_company(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.enter(format!("DELETE /company/{id}")).await;
    let Ok(mut store) = state.store.lock() else {
        return unavailable();
    };
    if !store.companies.contains_key(&id) {
        return not_found();
    }
    if !state.behavior.delete_keeps_company {
        store.companies.remove(&id);
    }
    StatusCode::NO_CONTENT.into_response()
}

/// `GET /company/{id}/products`.
async fn list_products(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.enter(format!("GET /company/{id}/products")).await;
    let Ok(store) = state.store.lock() else {
        return unavailable();
    };
    if !store.companies.contains_key(&id) {
        return not_found();
    }
    drop(store);
    let mut products = vec![
        json!({
            "productId": 1,
            "productName": "Ração Premium",
            "productDescription": "Saco de 10kg",
            "price": 89.9
        }),
        json!({
            "productId": 2,
            "productName": "Arranhador",
            "productDescription": "Torre de sisal",
            "price": 149.0
        }),
    ];
    if state.behavior.malformed_products {
        for product in &mut products {
            if let Value::Object(fields) = product {
                fields.remove("price");
            }
        }
    }
    Json(Value::Array(products)).into_response()
}
