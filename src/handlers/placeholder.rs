//! Stand-in for operations whose collaborator is not wired into this node.

use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::handlers::{HandlerContext, RouteHandler};
use crate::http::response::ApiError;
use crate::routing::{refs, HandlerRef};

/// Answers 501 naming the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotImplemented;

impl RouteHandler for NotImplemented {
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response> {
        let route = ctx.route_name().to_string();
        tracing::debug!(route = %route, "No collaborator bound for route");
        Box::pin(async move { ApiError::NotImplemented(route).into_response() })
    }
}

pub const PLACEHOLDER_HANDLERS: [HandlerRef; 44] = [
    refs::GET_METADATA_LIST,
    refs::GET_SINGLE_METADATA,
    refs::SEARCH_METADATA,
    refs::GET_MANY_PUB_KEYS,
    refs::GET_SINGLE_PUB_KEY,
    refs::UPDATE_ALL_METADATA_STATUS,
    refs::COMMIT_MEDIA,
    refs::INIT_WITH_BULK_IMPORT,
    refs::UPSERT_REPORT_FOR_METADATA,
    refs::GET_REPORT_LIST_FOR_METADATA,
    refs::GET_SINGLE_REPORT_FOR_METADATA,
    refs::ADD_REPORT_FOR_OBJECT,
    refs::UPSERT_REPORT_FOR_OBJECT,
    refs::GET_REPORT_LIST_FOR_OBJECT,
    refs::GET_SINGLE_REPORT_FOR_OBJECT,
    refs::GET_REPORT_LIST_FOR_OBJECT_TYPE,
    refs::DELETE_SINGLE_REPORT_FOR_OBJECT,
    refs::DELETE_EVERY_REPORT_FOR_OBJECT,
    refs::DELETE_MANY_REPORTS_FOR_OBJECT,
    refs::DELETE_REPORTS_BEFORE,
    refs::GET_EVERY_THESAURUS,
    refs::GET_SINGLE_THESAURUS,
    refs::GET_SINGLE_THESAURUS_LABELS,
    refs::INIT_THEMES,
    refs::GET_ALL_LICENCES,
    refs::GET_ALL_LICENCE_CODES,
    refs::INIT_LICENCES,
    refs::GET_PORTAL_TOKEN,
    refs::CHECK_STORED_TOKEN,
    refs::SEND_MANY_METADATA_TO_PORTAL,
    refs::GET_PORTAL_METADATA,
    refs::SEND_METADATA_TO_PORTAL,
    refs::DELETE_PORTAL_METADATA,
    refs::GET_PORTAL_CACHED_METADATA,
    refs::GET_PORTAL_METADATA_IDS,
    refs::GET_NODE_URL,
    refs::GET_PORTAL_URL,
    refs::GET_LOGS,
    refs::SEARCH_LOGS,
    refs::GET_COLLECTIONS,
    refs::DROP_COLLECTION,
    refs::DROP_DB,
    refs::DUMP_DB,
    refs::RESTORE_DB,
];
