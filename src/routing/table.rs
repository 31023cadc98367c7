//! The service route table, one list per tier.
//!
//! Lists are declared specific-before-generic so that first-match ordering
//! and specificity ranking select the same route.

use crate::config::RoutingConfig;
use crate::routing::objects::{self, PARAM_ID, PARAM_PROP, PARAM_REPORT_ID};
use crate::routing::redirect::RedirectRule;
use crate::routing::refs;
use crate::routing::registry::{RegistryError, TierRegistry, TierRoutes};
use crate::routing::spec::RouteDecl;
use crate::routing::spec::RouteMethod::{Delete, Get, Post, Put};
use crate::routing::tier::Tier;

pub const OBJ_METADATA: &str = "resources";
pub const OBJ_PUB_KEYS: &str = "pub_keys";
pub const ACT_REPORT: &str = "report";
pub const PARAM_CODE: &str = "code";
pub const PARAM_LANG: &str = "lang";
pub const PARAM_COLLECTION: &str = "collection";

/// Compile the full route table for the given configuration.
pub fn build_registry(config: &RoutingConfig) -> Result<TierRegistry, RegistryError> {
    TierRegistry::build(route_table(config), config.match_strategy)
}

/// Every enabled tier list.
pub fn route_table(config: &RoutingConfig) -> Vec<TierRoutes> {
    let mut tables = vec![TierRoutes::new(Tier::Public, public_routes(config))];
    if config.portal_routes_enabled {
        tables.push(TierRoutes::new(Tier::Portal, portal_routes(config)));
    }
    tables.push(TierRoutes::new(
        Tier::UnrestrictedPrivate,
        unrestricted_private_routes(config),
    ));
    tables.push(TierRoutes::new(Tier::BackOffice, back_office_routes(config)));
    if config.dev_routes_enabled {
        tables.push(TierRoutes::new(Tier::Dev, dev_routes(config)));
    }
    tables
}

fn metadata_path(config: &RoutingConfig) -> String {
    format!("{}/{}", config.public_prefix, OBJ_METADATA)
}

pub fn public_routes(config: &RoutingConfig) -> Vec<RouteDecl> {
    let metadata = metadata_path(config);
    let pub_keys = format!("{}/{}", config.public_prefix, OBJ_PUB_KEYS);
    let legacy = format!("/{}/*", OBJ_METADATA);

    vec![
        RouteDecl::forward(Get, "/favicon.png", "pub_get_favicon", refs::SERVE_FAVICON)
            .describe("Favicon"),
        RouteDecl::forward(Get, metadata.clone(), "pub_get_all_metadata", refs::GET_METADATA_LIST)
            .describe("Access all metadata"),
        RouteDecl::forward(Get, format!("{}/{}", metadata, objects::ACT_SEARCH), "pub_search_metadata", refs::SEARCH_METADATA)
            .describe("Search metadata"),
        RouteDecl::forward(Get, format!("{}/:{}", metadata, PARAM_ID), "pub_get_one_metadata", refs::GET_SINGLE_METADATA)
            .describe("Access one identified metadata"),
        RouteDecl::forward(Get, config.api_version_path.clone(), "pub_get_api_version", refs::GET_API_VERSION)
            .describe("Get current API version"),
        RouteDecl::forward(Get, pub_keys.clone(), "pub_get_all_pub_keys", refs::GET_MANY_PUB_KEYS)
            .describe("Get every public key"),
        RouteDecl::forward(Get, format!("{}/:{}/:{}", pub_keys, PARAM_ID, PARAM_PROP), "pub_get_one_pub_key_prop", refs::GET_SINGLE_PUB_KEY)
            .describe("Get a public key property value given its name"),
        RouteDecl::forward(Get, format!("{}/:{}", pub_keys, PARAM_ID), "pub_get_one_pub_key", refs::GET_SINGLE_PUB_KEY)
            .describe("Get a public key with its name"),
        RouteDecl::redirect(Get, "/api", "redirect_get_api", RedirectRule::simple(metadata.clone()))
            .describe("Redirection: GET /api -> metadata listing"),
        RouteDecl::redirect(Get, config.public_prefix.clone(), "redirect_get_api_version", RedirectRule::simple(metadata.clone()))
            .describe("Redirection: GET public prefix -> metadata listing"),
        RouteDecl::redirect(Get, legacy.clone(), "redirect_get_legacy", RedirectRule::permanent_alias(metadata.clone()))
            .describe("Redirection: GET /resources/* -> versioned metadata path"),
        RouteDecl::redirect(Put, legacy, "redirect_put_legacy", RedirectRule::permanent_alias(metadata))
            .describe("Redirection: PUT /resources/* -> versioned metadata path"),
    ]
}

pub fn portal_routes(config: &RoutingConfig) -> Vec<RouteDecl> {
    let report = format!("{}/:{}/{}", metadata_path(config), PARAM_ID, ACT_REPORT);

    vec![
        RouteDecl::forward(Get, format!("{}/:{}", report, PARAM_REPORT_ID), "portal_get_one_obj_report", refs::GET_SINGLE_REPORT_FOR_METADATA)
            .describe("Get 1 report for one metadata integration"),
        RouteDecl::forward(Put, report.clone(), "portal_upsert_one_report", refs::UPSERT_REPORT_FOR_METADATA)
            .describe("Add/edit 1 report for one metadata integration"),
        RouteDecl::forward(Get, report, "portal_get_all_obj_report", refs::GET_REPORT_LIST_FOR_METADATA)
            .describe("Get all reports for one metadata integration"),
    ]
}

pub fn unrestricted_private_routes(config: &RoutingConfig) -> Vec<RouteDecl> {
    let private = &config.private_prefix;
    vec![
        RouteDecl::forward(Get, format!("{}/git_hash", private), "dev_get_git_hash", refs::GET_GIT_HASH)
            .describe("Get current git hash"),
        RouteDecl::forward(Get, format!("{}/app_hash", private), "dev_get_app_hash", refs::GET_APP_HASH)
            .describe("Get the git hash the running application was built from"),
        RouteDecl::forward(Get, format!("{}/env", private), "dev_get_app_env", refs::GET_ENVIRONMENT)
            .describe("Get environment of the running application"),
    ]
}

pub fn back_office_routes(config: &RoutingConfig) -> Vec<RouteDecl> {
    let mut routes = objects::object_sub_resource_routes(&config.private_prefix);
    routes.extend(objects::generic_object_routes(&config.private_prefix));
    routes
}

pub fn dev_routes(config: &RoutingConfig) -> Vec<RouteDecl> {
    let private = &config.private_prefix;
    let check = &config.check_prefix;
    let thesaurus = format!("{}/thesaurus", private);
    let licences = format!("{}/licences", private);
    let portal = format!("{}/portal", private);
    let portal_metadata = format!("{}/{}", portal, OBJ_METADATA);
    let logs = format!("{}/logs", private);
    let db = format!("{}/db", private);

    vec![
        RouteDecl::forward(Get, format!("{}/node_version", private), "dev_get_node_version", refs::GET_RUNTIME_VERSIONS)
            .describe("Get runtime and dependency versions"),
        // Thesaurus
        RouteDecl::forward(Get, thesaurus.clone(), "dev_get_every_thesaurus", refs::GET_EVERY_THESAURUS)
            .describe("Get every thesaurus"),
        RouteDecl::forward(Get, format!("{}/:{}/init", thesaurus, PARAM_CODE), "dev_init_themes", refs::INIT_THEMES)
            .describe("Init themes with values in stored data"),
        RouteDecl::forward(Get, format!("{}/:{}/:{}", thesaurus, PARAM_CODE, PARAM_LANG), "dev_get_single_thesaurus_labels", refs::GET_SINGLE_THESAURUS_LABELS)
            .describe("Get a thesaurus from its code in a given language"),
        RouteDecl::forward(Get, format!("{}/:{}", thesaurus, PARAM_CODE), "dev_get_single_thesaurus", refs::GET_SINGLE_THESAURUS)
            .describe("Get a thesaurus from its code"),
        // Licences
        RouteDecl::forward(Get, licences.clone(), "dev_get_all_licences", refs::GET_ALL_LICENCES)
            .describe("Get every licence"),
        RouteDecl::forward(Get, format!("{}/licence_codes", private), "dev_get_all_licence_codes", refs::GET_ALL_LICENCE_CODES)
            .describe("Get every licence code"),
        RouteDecl::forward(Post, format!("{}/init", licences), "dev_init_licences", refs::INIT_LICENCES)
            .describe("Init licences"),
        // Bulk import and helpers
        RouteDecl::forward(Post, format!("{}/{}/init", private, OBJ_METADATA), "dev_init_with_bulk_import", refs::INIT_WITH_BULK_IMPORT)
            .describe("Populate the database with an external open data catalog"),
        RouteDecl::forward(Get, format!("{}/uuid", private), "dev_generate_uuid", refs::GENERATE_UUID)
            .describe("Generate a UUID v4"),
        // Portal token
        RouteDecl::forward(Get, format!("{}/token", portal), "dev_get_portal_token", refs::GET_PORTAL_TOKEN)
            .describe("Get a new token from the portal"),
        RouteDecl::forward(Get, format!("{}/token/check", portal), "dev_check_stored_token", refs::CHECK_STORED_TOKEN)
            .describe("Get the stored token checked by the portal"),
        // Portal resources
        RouteDecl::forward(Post, format!("{}/send", portal_metadata), "dev_send_many_metadata_to_portal", refs::SEND_MANY_METADATA_TO_PORTAL)
            .describe("Send a list of metadata to the portal"),
        RouteDecl::forward(Get, format!("{}/:{}", portal_metadata, PARAM_ID), "dev_get_portal_metadata", refs::GET_PORTAL_METADATA)
            .describe("Get a metadata from the portal"),
        RouteDecl::forward(Get, portal_metadata.clone(), "dev_get_portal_metadata_list", refs::GET_PORTAL_METADATA)
            .describe("Get every metadata from the portal (paged)"),
        RouteDecl::forward(Post, format!("{}/:{}", portal_metadata, PARAM_ID), "dev_send_metadata_to_portal", refs::SEND_METADATA_TO_PORTAL)
            .describe("Send a metadata to the portal"),
        RouteDecl::forward(Delete, format!("{}/:{}", portal_metadata, PARAM_ID), "dev_del_portal_metadata", refs::DELETE_PORTAL_METADATA)
            .describe("Ask the portal to delete a metadata"),
        // Checks
        RouteDecl::forward(Get, format!("{}/portal/{}", check, OBJ_METADATA), "dev_check_portal_metadata", refs::GET_PORTAL_CACHED_METADATA)
            .describe("Get the whole list of metadata stored on the portal"),
        RouteDecl::forward(Get, format!("{}/portal/ids", check), "dev_check_portal_metadata_ids", refs::GET_PORTAL_METADATA_IDS)
            .describe("Get the whole list of metadata ids stored on the portal"),
        RouteDecl::forward(Get, format!("{}/node/url", check), "dev_check_node_url", refs::GET_NODE_URL)
            .describe("Get the public URL of this node"),
        RouteDecl::forward(Get, format!("{}/portal/url", check), "dev_check_portal_url", refs::GET_PORTAL_URL)
            .describe("Get the URL of the portal associated with this node"),
        // Logs
        RouteDecl::forward(Get, format!("{}/{}", logs, objects::ACT_SEARCH), "dev_search_logs", refs::SEARCH_LOGS)
            .describe("Search logs"),
        RouteDecl::forward(Get, logs, "dev_get_logs", refs::GET_LOGS)
            .describe("Get logs"),
        // Database
        RouteDecl::forward(Post, format!("{}/dump", db), "dev_db_dump", refs::DUMP_DB)
            .describe("Dump every collection into an archive"),
        RouteDecl::forward(Post, format!("{}/restore", db), "dev_db_restore", refs::RESTORE_DB)
            .describe("Restore every collection from a local archive"),
        RouteDecl::forward(Get, db.clone(), "dev_get_collections", refs::GET_COLLECTIONS)
            .describe("Get every collection name"),
        RouteDecl::forward(Delete, format!("{}/:{}", db, PARAM_COLLECTION), "dev_drop_collection", refs::DROP_COLLECTION)
            .describe("Drop a collection"),
        RouteDecl::forward(Delete, db, "dev_drop_db", refs::DROP_DB)
            .describe("Drop every collection"),
        RouteDecl::forward(Get, format!("{}/test", private), "dev_test", refs::TEST_PROBE)
            .describe("Test the availability of the service"),
    ]
}
