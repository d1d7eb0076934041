//! HTTP surface of the mock control plane.
//!
//! One generic handler set serves every collection in
//! [`crate::store::COLLECTIONS`]; the static spec table supplies the
//! per-kind differences. Request handling mirrors the real service's
//! observable behavior: session-cookie auth, the alerts envelope,
//! query-parameter filtering, `orderby`/`sortOrder`, pagination with
//! validation, `If-Modified-Since`, and referential delete guards.

use crate::store::{spec, Store};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::DateTime;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Name of the session cookie the service issues at login.
pub const SESSION_COOKIE: &str = "mojolicious";

/// Shared state behind the router.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub sessions: Arc<RwLock<HashSet<String>>>,
    pub username: String,
    pub password: String,
}

impl AppState {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new(username))),
            sessions: Arc::new(RwLock::new(HashSet::new())),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// An error response: a status code plus a single error-level alert.
struct ApiError {
    status: StatusCode,
    text: String,
}

impl ApiError {
    fn bad_request(text: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            text: text.into(),
        }
    }

    fn not_found(text: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            text: text.into(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            text: "Unauthorized, please log in.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({"alerts": [{"level": "error", "text": self.text}]});
        (self.status, Json(body)).into_response()
    }
}

fn success_doc(text: &str) -> Value {
    json!({"alerts": [{"level": "success", "text": text}]})
}

fn success_with_response(text: &str, response: Value) -> Value {
    json!({
        "alerts": [{"level": "success", "text": text}],
        "response": response
    })
}

/// Build the full mock router: `/api/5.0/...` with TraceLayer.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/ping", get(ping))
        .route("/user/login", post(login))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/user/logout", post(logout))
        .route(
            "/deliveryserviceserver",
            get(list_ds_servers).post(assign_ds_servers),
        )
        .route(
            "/deliveryserviceserver/:ds_id/:server_id",
            delete(delete_ds_server),
        )
        .route(
            "/profileparameters/:profile_id/:parameter_id",
            delete(delete_profile_parameter),
        )
        .route(
            "/:collection",
            get(list_collection)
                .post(create_in_collection)
                .put(update_by_query)
                .delete(delete_by_query),
        )
        .route(
            "/:collection/:id",
            axum::routing::put(update_by_id).delete(delete_by_id),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .with_state(state);

    Router::new()
        .nest("/api/5.0", public.merge(protected))
        .layer(TraceLayer::new_for_http())
}

// ----------------------------------------------------------------------
// Authentication
// ----------------------------------------------------------------------

fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("mojolicious="))
        .map(str::to_string)
}

async fn require_session(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());
    let valid = match token {
        Some(token) => state.sessions.read().await.contains(&token),
        None => false,
    };
    if !valid {
        return ApiError::unauthorized().into_response();
    }
    next.run(request).await
}

async fn ping() -> Json<Value> {
    Json(json!({"ping": "pong"}))
}

async fn login(State(state): State<AppState>, body: Json<Value>) -> Response {
    let user = body.get("u").and_then(Value::as_str).unwrap_or_default();
    let pass = body.get("p").and_then(Value::as_str).unwrap_or_default();

    if user != state.username || pass != state.password {
        tracing::debug!(target: "to_test_utils.api", user, "rejected login");
        return ApiError {
            status: StatusCode::UNAUTHORIZED,
            text: "Invalid username or password.".to_string(),
        }
        .into_response();
    }

    let token = Uuid::new_v4().simple().to_string();
    state.sessions.write().await.insert(token.clone());

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(success_doc("Successfully logged in.")),
    )
        .into_response()
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.write().await.remove(&token);
    }
    Json(success_doc("You are logged out.")).into_response()
}

// ----------------------------------------------------------------------
// Generic collection handlers
// ----------------------------------------------------------------------

/// Query parameters the engine interprets rather than filters on.
const RESERVED_PARAMS: &[&str] = &["limit", "offset", "page", "orderby", "sortOrder"];

fn parse_positive(params: &[(String, String)], key: &str) -> Result<Option<i64>, ApiError> {
    let Some((_, raw)) = params.iter().find(|(k, _)| k == key) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ApiError::bad_request(format!(
            "{key} parameter must be a positive integer"
        ))),
    }
}

fn value_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn cmp_field(a: &Value, b: &Value, field: &str) -> Ordering {
    let (av, bv) = (a.get(field), b.get(field));
    match (av.and_then(Value::as_i64), bv.and_then(Value::as_i64)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => value_string(av).cmp(&value_string(bv)),
    }
}

async fn list_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;

    let limit = parse_positive(&params, "limit")?;
    let offset = parse_positive(&params, "offset")?;
    let page = parse_positive(&params, "page")?;
    if (offset.is_some() || page.is_some()) && limit.is_none() {
        return Err(ApiError::bad_request(
            "offset and page parameters require limit",
        ));
    }

    let store = state.store.read().await;
    let coll = store
        .collection(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;

    // If-Modified-Since: compare at whole-second precision, HTTP dates
    // carry no fraction.
    if let Some(ims) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
    {
        if coll.last_modified.timestamp() <= ims.timestamp() {
            return Ok(StatusCode::NOT_MODIFIED.into_response());
        }
    }

    let filters: Vec<&(String, String)> = params
        .iter()
        .filter(|(k, _)| !RESERVED_PARAMS.contains(&k.as_str()))
        .collect();

    let mut items: Vec<Value> = coll
        .items
        .iter()
        .filter(|item| {
            filters
                .iter()
                .all(|(k, v)| value_string(item.get(k.as_str())) == *v)
        })
        .cloned()
        .collect();

    let orderby = params
        .iter()
        .find(|(k, _)| k == "orderby")
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| {
            if spec.name_field.is_empty() {
                "id".to_string()
            } else {
                spec.name_field.to_string()
            }
        });
    items.sort_by(|a, b| cmp_field(a, b, &orderby));
    if params.iter().any(|(k, v)| k == "sortOrder" && v == "desc") {
        items.reverse();
    }

    if let Some(limit) = limit {
        let skip = match (offset, page) {
            (Some(offset), _) => offset,
            (None, Some(page)) => (page - 1) * limit,
            (None, None) => 0,
        };
        items = items
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit as usize)
            .collect();
    }

    Ok(Json(json!({"response": items})).into_response())
}

async fn create_in_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;
    let mut store = state.store.write().await;

    // The parameters endpoint accepts either one object or an array.
    let mut obj = match body {
        Value::Array(objects) => {
            if collection != "parameters" {
                return Err(ApiError::bad_request("request body must be an object"));
            }
            let mut created = Vec::with_capacity(objects.len());
            for mut obj in objects {
                store
                    .denormalize(&collection, &mut obj)
                    .map_err(ApiError::bad_request)?;
                created.push(store.insert(&collection, obj));
            }
            tracing::debug!(target: "to_test_utils.api", count = created.len(), "created parameters");
            return Ok(Json(success_with_response(
                "parameters were created.",
                Value::Array(created),
            ))
            .into_response());
        }
        other => other,
    };
    store
        .denormalize(&collection, &mut obj)
        .map_err(ApiError::bad_request)?;

    if !spec.name_field.is_empty() {
        let name = obj.get(spec.name_field);
        if name.map(Value::is_null).unwrap_or(true) {
            return Err(ApiError::bad_request(format!(
                "{} must have a {}",
                spec.singular, spec.name_field
            )));
        }
        let name = value_string(name);
        let exists = store
            .collection(&collection)
            .map(|c| {
                c.items
                    .iter()
                    .any(|item| value_string(item.get(spec.name_field)) == name)
            })
            .unwrap_or(false);
        if exists {
            return Err(ApiError::bad_request(format!(
                "{} '{}' already exists",
                spec.singular, name
            )));
        }
    }

    let stored = store.insert(&collection, obj);
    Ok(Json(success_with_response(
        &format!("{} was created.", spec.singular),
        stored,
    ))
    .into_response())
}

fn find_index_by_id(store: &Store, collection: &str, id: i64) -> Option<usize> {
    store
        .collection(collection)?
        .items
        .iter()
        .position(|item| item.get("id").and_then(Value::as_i64) == Some(id))
}

fn apply_update(
    store: &mut Store,
    collection: &str,
    index: usize,
    mut body: Value,
) -> Result<Value, ApiError> {
    store
        .denormalize(collection, &mut body)
        .map_err(ApiError::bad_request)?;

    let now = chrono::Utc::now().to_rfc3339();
    let previous_id = store
        .collection(collection)
        .and_then(|c| c.items.get(index))
        .and_then(|item| item.get("id").cloned());

    if let Some(map) = body.as_object_mut() {
        if let Some(id) = previous_id {
            map.insert("id".to_string(), id);
        }
        map.insert("lastUpdated".to_string(), Value::String(now));
    }

    let coll = store
        .collection_mut(collection)
        .ok_or_else(|| ApiError::not_found("no such endpoint"))?;
    let slot = coll
        .items
        .get_mut(index)
        .ok_or_else(|| ApiError::not_found("object vanished"))?;
    *slot = body.clone();
    store.touch(collection);
    Ok(body)
}

async fn update_by_id(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;
    let mut store = state.store.write().await;

    let index = find_index_by_id(&store, &collection, id)
        .ok_or_else(|| ApiError::not_found(format!("no {} with id {id}", spec.singular)))?;
    let updated = apply_update(&mut store, &collection, index, body)?;

    Ok(Json(success_with_response(
        &format!("{} was updated.", spec.singular),
        updated,
    ))
    .into_response())
}

/// PUT addressed by query parameters (e.g. `PUT /coordinates?id=3`). The
/// query must select exactly one object.
async fn update_by_query(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;
    let mut store = state.store.write().await;

    let index = select_one(&store, &collection, &params)?
        .ok_or_else(|| ApiError::not_found(format!("no matching {}", spec.singular)))?;
    let updated = apply_update(&mut store, &collection, index, body)?;

    Ok(Json(success_with_response(
        &format!("{} was updated.", spec.singular),
        updated,
    ))
    .into_response())
}

/// Find the single item matching the query filters. `Ok(None)` when
/// nothing matches; an error when the query is empty or ambiguous.
fn select_one(
    store: &Store,
    collection: &str,
    params: &[(String, String)],
) -> Result<Option<usize>, ApiError> {
    let filters: Vec<&(String, String)> = params
        .iter()
        .filter(|(k, _)| !RESERVED_PARAMS.contains(&k.as_str()))
        .collect();
    if filters.is_empty() {
        return Err(ApiError::bad_request(
            "a query parameter identifying the object is required",
        ));
    }
    let coll = store
        .collection(collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;

    let mut matches = coll.items.iter().enumerate().filter(|(_, item)| {
        filters
            .iter()
            .all(|(k, v)| value_string(item.get(k.as_str())) == *v)
    });
    let first = matches.next().map(|(i, _)| i);
    if matches.next().is_some() {
        return Err(ApiError::bad_request(
            "query parameters match more than one object",
        ));
    }
    Ok(first)
}

fn delete_at(
    store: &mut Store,
    collection: &str,
    index: usize,
) -> Result<Response, ApiError> {
    let spec = spec(collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;

    let item = store
        .collection(collection)
        .and_then(|c| c.items.get(index))
        .cloned()
        .ok_or_else(|| ApiError::not_found(format!("no such {}", spec.singular)))?;

    let id = item.get("id").and_then(Value::as_i64);
    let name = value_string(item.get(spec.name_field));

    // Seeded objects the deployment depends on are not deletable.
    if collection == "tenants" && name == "root" {
        return Err(ApiError::bad_request("the root tenant cannot be deleted"));
    }
    if collection == "users" && name == store.admin_username {
        return Err(ApiError::bad_request("the admin user cannot be deleted"));
    }

    let name_ref = if name.is_empty() { None } else { Some(name.as_str()) };
    if let Some(referrer) = store.find_referrer(collection, id, name_ref) {
        return Err(ApiError::bad_request(format!(
            "cannot delete {} '{}': in use by {}",
            spec.singular, name, referrer
        )));
    }

    if let Some(coll) = store.collection_mut(collection) {
        coll.items.remove(index);
    }
    store.touch(collection);
    tracing::debug!(target: "to_test_utils.api", collection, name = %name, "deleted object");

    Ok(Json(success_doc(&format!("{} was deleted.", spec.singular))).into_response())
}

async fn delete_by_id(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;
    let mut store = state.store.write().await;
    let index = find_index_by_id(&store, &collection, id)
        .ok_or_else(|| ApiError::not_found(format!("no {} with id {id}", spec.singular)))?;
    delete_at(&mut store, &collection, index)
}

async fn delete_by_query(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let spec = spec(&collection)
        .ok_or_else(|| ApiError::not_found(format!("no such endpoint '{collection}'")))?;
    let mut store = state.store.write().await;
    let index = select_one(&store, &collection, &params)?
        .ok_or_else(|| ApiError::not_found(format!("no matching {}", spec.singular)))?;
    delete_at(&mut store, &collection, index)
}

async fn delete_profile_parameter(
    State(state): State<AppState>,
    Path((profile_id, parameter_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let mut store = state.store.write().await;
    let index = store
        .collection("profileparameters")
        .and_then(|c| {
            c.items.iter().position(|item| {
                item.get("profileId").and_then(Value::as_i64) == Some(profile_id)
                    && item.get("parameterId").and_then(Value::as_i64) == Some(parameter_id)
            })
        })
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "no parameter {parameter_id} associated with profile {profile_id}"
            ))
        })?;

    if let Some(coll) = store.collection_mut("profileparameters") {
        coll.items.remove(index);
    }
    store.touch("profileparameters");
    Ok(Json(success_doc("profile parameter was deleted.")).into_response())
}

// ----------------------------------------------------------------------
// Delivery service / server assignments
// ----------------------------------------------------------------------

async fn list_ds_servers(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    let items = store
        .collection("deliveryserviceserver")
        .map(|c| c.items.clone())
        .unwrap_or_default();
    Json(json!({"response": items})).into_response()
}

async fn assign_ds_servers(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let ds_id = body
        .get("dsId")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::bad_request("dsId is required"))?;
    let servers: Vec<i64> = body
        .get("servers")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_i64).collect())
        .ok_or_else(|| ApiError::bad_request("servers is required"))?;
    let replace = body.get("replace").and_then(Value::as_bool).unwrap_or(false);

    let mut store = state.store.write().await;
    if find_index_by_id(&store, "deliveryservices", ds_id).is_none() {
        return Err(ApiError::not_found(format!(
            "no deliveryservice with id {ds_id}"
        )));
    }
    for server_id in &servers {
        if find_index_by_id(&store, "servers", *server_id).is_none() {
            return Err(ApiError::not_found(format!(
                "no server with id {server_id}"
            )));
        }
    }

    if replace {
        if let Some(coll) = store.collection_mut("deliveryserviceserver") {
            coll.items
                .retain(|item| item.get("deliveryService").and_then(Value::as_i64) != Some(ds_id));
        }
    }
    let now = chrono::Utc::now().to_rfc3339();
    for server_id in &servers {
        let already = store
            .collection("deliveryserviceserver")
            .map(|c| {
                c.items.iter().any(|item| {
                    item.get("deliveryService").and_then(Value::as_i64) == Some(ds_id)
                        && item.get("server").and_then(Value::as_i64) == Some(*server_id)
                })
            })
            .unwrap_or(false);
        if already {
            continue;
        }
        if let Some(coll) = store.collection_mut("deliveryserviceserver") {
            coll.items.push(json!({
                "deliveryService": ds_id,
                "server": server_id,
                "lastUpdated": now,
            }));
        }
    }
    store.touch("deliveryserviceserver");

    Ok(Json(success_with_response(
        "server assignments complete.",
        body,
    ))
    .into_response())
}

async fn delete_ds_server(
    State(state): State<AppState>,
    Path((ds_id, server_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let mut store = state.store.write().await;
    let index = store
        .collection("deliveryserviceserver")
        .and_then(|c| {
            c.items.iter().position(|item| {
                item.get("deliveryService").and_then(Value::as_i64) == Some(ds_id)
                    && item.get("server").and_then(Value::as_i64) == Some(server_id)
            })
        })
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "server {server_id} is not assigned to delivery service {ds_id}"
            ))
        })?;

    if let Some(coll) = store.collection_mut("deliveryserviceserver") {
        coll.items.remove(index);
    }
    store.touch("deliveryserviceserver");
    Ok(Json(success_doc("server unassigned from delivery service.")).into_response())
}
