//! Generic object handler.
//!
//! # Responsibilities
//! - Interpret the `object` path segment as an [`ObjectType`]
//! - Turn a matched generic route into an [`ObjectRequest`]
//! - Hand the request to the [`ObjectStore`] registered for that type
//!
//! # Design Decisions
//! - The router accepts any value in the `object` segment; unknown types are
//!   rejected here with 400, not by the route table
//! - Persistence is a seam: a type without a store answers 501
//! - Extended search is the search operation plus the route's modifier

use axum::{
    body::{to_bytes, Bytes},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::BoxFuture;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::handlers::{HandlerContext, RouteHandler};
use crate::http::response::ApiError;
use crate::routing::objects::{ACT_EXT_SEARCH, PARAM_ID, PARAM_OBJECT, PARAM_PROP};
use crate::routing::spec::OPT_MODIFIER;
use crate::routing::{refs, HandlerRef};

/// Object types served by the generic routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Resources,
    Organizations,
    Contacts,
    Media,
    PubKeys,
}

impl ObjectType {
    pub const ALL: [ObjectType; 5] = [
        ObjectType::Resources,
        ObjectType::Organizations,
        ObjectType::Contacts,
        ObjectType::Media,
        ObjectType::PubKeys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Resources => "resources",
            ObjectType::Organizations => "organizations",
            ObjectType::Contacts => "contacts",
            ObjectType::Media => "media",
            ObjectType::PubKeys => "pub_keys",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown object type `{0}`")]
pub struct UnknownObjectType(pub String);

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownObjectType(s.to_string()))
    }
}

/// What a generic route asks the store to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectOperation {
    Create,
    Upsert,
    List,
    /// One object, or one of its properties when `prop` is bound.
    Get,
    Delete,
    DeleteAll,
    DeleteList,
    Search,
    Count,
}

impl ObjectOperation {
    pub fn for_handler(handler_ref: HandlerRef) -> Option<Self> {
        let op = match handler_ref {
            refs::ADD_OBJECTS => ObjectOperation::Create,
            refs::UPSERT_OBJECTS => ObjectOperation::Upsert,
            refs::GET_OBJECT_LIST => ObjectOperation::List,
            refs::GET_SINGLE_OBJECT => ObjectOperation::Get,
            refs::DELETE_SINGLE_OBJECT => ObjectOperation::Delete,
            refs::DELETE_MANY_OBJECTS => ObjectOperation::DeleteAll,
            refs::DELETE_OBJECT_LIST => ObjectOperation::DeleteList,
            refs::SEARCH_OBJECTS => ObjectOperation::Search,
            refs::COUNT_OBJECTS => ObjectOperation::Count,
            _ => return None,
        };
        Some(op)
    }
}

/// A fully interpreted generic object request.
#[derive(Debug, Clone)]
pub struct ObjectRequest {
    pub object_type: ObjectType,
    pub operation: ObjectOperation,
    pub id: Option<String>,
    pub prop: Option<String>,
    /// Route modifier, e.g. `extended_search`.
    pub modifier: Option<String>,
    pub query: Option<String>,
    pub body: Bytes,
}

impl ObjectRequest {
    pub fn is_extended_search(&self) -> bool {
        self.operation == ObjectOperation::Search && self.modifier.as_deref() == Some(ACT_EXT_SEARCH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
    #[error("object store unavailable: {0}")]
    Unavailable(String),
    #[error("object store failure: {0}")]
    Internal(String),
}

impl From<ObjectStoreError> for ApiError {
    fn from(err: ObjectStoreError) -> Self {
        match err {
            ObjectStoreError::NotFound(msg) => ApiError::NotFoundResource(msg),
            ObjectStoreError::Invalid(msg) => ApiError::BadRequest(msg),
            e @ ObjectStoreError::Unavailable(_) => ApiError::ServiceUnavailable(e.to_string()),
            e @ ObjectStoreError::Internal(_) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Persistence for one object type.
pub trait ObjectStore: Send + Sync + 'static {
    fn execute(&self, request: ObjectRequest) -> BoxFuture<'static, Result<Value, ObjectStoreError>>;

    /// Fields accepted by search requests.
    fn searchable_fields(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Stores by object type.
#[derive(Clone, Default)]
pub struct ObjectStores {
    stores: HashMap<ObjectType, Arc<dyn ObjectStore>>,
}

impl ObjectStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, object_type: ObjectType, store: impl ObjectStore) -> Self {
        self.stores.insert(object_type, Arc::new(store));
        self
    }

    pub fn get(&self, object_type: ObjectType) -> Option<&Arc<dyn ObjectStore>> {
        self.stores.get(&object_type)
    }
}

/// Serves every generic object route bound to one operation.
pub struct GenericObjectHandler {
    operation: ObjectOperation,
    stores: Arc<ObjectStores>,
}

impl GenericObjectHandler {
    pub fn new(operation: ObjectOperation, stores: Arc<ObjectStores>) -> Self {
        Self { operation, stores }
    }

    async fn handle(operation: ObjectOperation, stores: Arc<ObjectStores>, ctx: HandlerContext) -> Result<Response, ApiError> {
        let raw_type = ctx.param(PARAM_OBJECT).unwrap_or_default();
        let object_type: ObjectType = raw_type.parse().map_err(|e: UnknownObjectType| ApiError::BadRequest(e.to_string()))?;

        let store = stores
            .get(object_type)
            .cloned()
            .ok_or_else(|| ApiError::NotImplemented(format!("{} storage", object_type)))?;

        let id = ctx.param(PARAM_ID).map(str::to_string);
        let prop = ctx.param(PARAM_PROP).map(str::to_string);
        let modifier = ctx.bound.route.option(OPT_MODIFIER).map(str::to_string);
        let query = ctx.query().map(str::to_string);
        let body = to_bytes(ctx.request.into_body(), usize::MAX)
            .await
            .map_err(|e| ApiError::BadRequest(format!("unreadable request body: {}", e)))?;

        let request = ObjectRequest {
            object_type,
            operation,
            id,
            prop,
            modifier,
            query,
            body,
        };
        tracing::debug!(
            object_type = %request.object_type,
            operation = ?request.operation,
            id = ?request.id,
            extended = request.is_extended_search(),
            "Forwarding generic object request"
        );

        let value = store.execute(request).await?;
        let status = if operation == ObjectOperation::Create {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        Ok((status, Json(value)).into_response())
    }
}

impl RouteHandler for GenericObjectHandler {
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response> {
        let operation = self.operation;
        let stores = Arc::clone(&self.stores);
        Box::pin(async move {
            match Self::handle(operation, stores, ctx).await {
                Ok(response) => response,
                Err(e) => e.into_response(),
            }
        })
    }
}

/// Lists the searchable fields of every object type with a store.
pub struct SearchableFieldsHandler {
    stores: Arc<ObjectStores>,
}

impl SearchableFieldsHandler {
    pub fn new(stores: Arc<ObjectStores>) -> Self {
        Self { stores }
    }
}

impl RouteHandler for SearchableFieldsHandler {
    fn call(&self, _ctx: HandlerContext) -> BoxFuture<'static, Response> {
        let mut fields = Map::new();
        for object_type in ObjectType::ALL {
            if let Some(store) = self.stores.get(object_type) {
                fields.insert(object_type.as_str().to_string(), json!(store.searchable_fields()));
            }
        }
        Box::pin(async move { Json(Value::Object(fields)).into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::build_registry;
    use crate::routing::MatchOutcome;
    use crate::security::Identity;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use std::sync::Mutex;

    #[derive(Default, Clone)]
    struct RecordingStore {
        seen: Arc<Mutex<Vec<ObjectRequest>>>,
    }

    impl ObjectStore for RecordingStore {
        fn execute(&self, request: ObjectRequest) -> BoxFuture<'static, Result<Value, ObjectStoreError>> {
            let id = request.id.clone();
            self.seen.lock().unwrap().push(request);
            Box::pin(async move {
                match id.as_deref() {
                    Some("missing") => Err(ObjectStoreError::NotFound("no such object".into())),
                    _ => Ok(json!({ "ok": true })),
                }
            })
        }

        fn searchable_fields(&self) -> Vec<String> {
            vec!["title".into(), "keywords".into()]
        }
    }

    async fn call(stores: ObjectStores, method: Method, uri: &str) -> Response {
        let path = uri.split('?').next().unwrap_or_default();
        let registry = build_registry(&Default::default()).unwrap();
        let MatchOutcome::Matched(bound) = registry.resolve(&method, path) else {
            panic!("{} {} did not match", method, path);
        };
        let handler_ref = match &bound.route.action {
            crate::routing::RouteAction::Forward(r) => *r,
            other => panic!("unexpected action {:?}", other),
        };
        let op = ObjectOperation::for_handler(handler_ref).expect("generic object route");
        let ctx = HandlerContext {
            bound,
            identity: Identity::BackOffice,
            request: Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
        };
        GenericObjectHandler::new(op, Arc::new(stores)).call(ctx).await
    }

    #[test]
    fn test_object_type_parsing() {
        assert_eq!("pub_keys".parse::<ObjectType>(), Ok(ObjectType::PubKeys));
        assert_eq!(
            "widgets".parse::<ObjectType>(),
            Err(UnknownObjectType("widgets".into()))
        );
    }

    #[tokio::test]
    async fn test_unknown_type_is_bad_request() {
        let response = call(ObjectStores::new(), Method::GET, "/api/admin/widgets").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_type_without_store_is_not_implemented() {
        let response = call(ObjectStores::new(), Method::GET, "/api/admin/contacts").await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_request_reaches_store() {
        let store = RecordingStore::default();
        let stores = ObjectStores::new().with(ObjectType::Contacts, store.clone());

        let response = call(stores.clone(), Method::GET, "/api/admin/contacts/c1/email").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = call(stores.clone(), Method::GET, "/api/admin/contacts/extended_search?q=x").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = call(stores, Method::GET, "/api/admin/contacts/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen[0].operation, ObjectOperation::Get);
        assert_eq!(seen[0].id.as_deref(), Some("c1"));
        assert_eq!(seen[0].prop.as_deref(), Some("email"));
        assert!(seen[1].is_extended_search());
        assert_eq!(seen[2].id.as_deref(), Some("missing"));
    }

    #[tokio::test]
    async fn test_create_answers_created() {
        let stores = ObjectStores::new().with(ObjectType::Media, RecordingStore::default());
        let response = call(stores, Method::POST, "/api/admin/media").await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
