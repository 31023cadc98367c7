//! Names of the external handlers the route table binds to.

use crate::routing::spec::HandlerRef;

// System
pub const SERVE_FAVICON: HandlerRef = HandlerRef::new("serve_favicon");
pub const GET_API_VERSION: HandlerRef = HandlerRef::new("get_api_version");
pub const GET_GIT_HASH: HandlerRef = HandlerRef::new("get_git_hash");
pub const GET_APP_HASH: HandlerRef = HandlerRef::new("get_app_hash");
pub const GET_ENVIRONMENT: HandlerRef = HandlerRef::new("get_environment");
pub const GET_RUNTIME_VERSIONS: HandlerRef = HandlerRef::new("get_runtime_versions");
pub const GENERATE_UUID: HandlerRef = HandlerRef::new("generate_uuid");
pub const TEST_PROBE: HandlerRef = HandlerRef::new("test_probe");

// Public metadata and keys
pub const GET_METADATA_LIST: HandlerRef = HandlerRef::new("get_metadata_list_and_count");
pub const GET_SINGLE_METADATA: HandlerRef = HandlerRef::new("get_single_metadata");
pub const SEARCH_METADATA: HandlerRef = HandlerRef::new("search_metadata");
pub const GET_MANY_PUB_KEYS: HandlerRef = HandlerRef::new("get_many_pub_keys");
pub const GET_SINGLE_PUB_KEY: HandlerRef = HandlerRef::new("get_single_pub_key");

// Generic objects
pub const ADD_OBJECTS: HandlerRef = HandlerRef::new("add_objects");
pub const UPSERT_OBJECTS: HandlerRef = HandlerRef::new("upsert_objects");
pub const GET_OBJECT_LIST: HandlerRef = HandlerRef::new("get_object_list");
pub const GET_SINGLE_OBJECT: HandlerRef = HandlerRef::new("get_single_object");
pub const DELETE_SINGLE_OBJECT: HandlerRef = HandlerRef::new("delete_single_object");
pub const DELETE_MANY_OBJECTS: HandlerRef = HandlerRef::new("delete_many_objects");
pub const DELETE_OBJECT_LIST: HandlerRef = HandlerRef::new("delete_object_list");
pub const SEARCH_OBJECTS: HandlerRef = HandlerRef::new("search_objects");
pub const COUNT_OBJECTS: HandlerRef = HandlerRef::new("count_objects");
pub const GET_SEARCHABLE_FIELDS: HandlerRef = HandlerRef::new("get_searchable_fields");

// Metadata and media
pub const UPDATE_ALL_METADATA_STATUS: HandlerRef = HandlerRef::new("update_all_metadata_status");
pub const COMMIT_MEDIA: HandlerRef = HandlerRef::new("commit_media");
pub const INIT_WITH_BULK_IMPORT: HandlerRef = HandlerRef::new("init_with_bulk_import");

// Integration reports
pub const UPSERT_REPORT_FOR_METADATA: HandlerRef = HandlerRef::new("upsert_report_for_metadata");
pub const GET_REPORT_LIST_FOR_METADATA: HandlerRef = HandlerRef::new("get_report_list_for_metadata");
pub const GET_SINGLE_REPORT_FOR_METADATA: HandlerRef = HandlerRef::new("get_single_report_for_metadata");
pub const ADD_REPORT_FOR_OBJECT: HandlerRef = HandlerRef::new("add_report_for_object");
pub const UPSERT_REPORT_FOR_OBJECT: HandlerRef = HandlerRef::new("upsert_report_for_object");
pub const GET_REPORT_LIST_FOR_OBJECT: HandlerRef = HandlerRef::new("get_report_list_for_object");
pub const GET_SINGLE_REPORT_FOR_OBJECT: HandlerRef = HandlerRef::new("get_single_report_for_object");
pub const GET_REPORT_LIST_FOR_OBJECT_TYPE: HandlerRef = HandlerRef::new("get_report_list_for_object_type");
pub const DELETE_SINGLE_REPORT_FOR_OBJECT: HandlerRef = HandlerRef::new("delete_single_report_for_object");
pub const DELETE_EVERY_REPORT_FOR_OBJECT: HandlerRef = HandlerRef::new("delete_every_report_for_object");
pub const DELETE_MANY_REPORTS_FOR_OBJECT: HandlerRef = HandlerRef::new("delete_many_reports_for_object");
pub const DELETE_REPORTS_BEFORE: HandlerRef = HandlerRef::new("delete_reports_before");

// Thesaurus and licences
pub const GET_EVERY_THESAURUS: HandlerRef = HandlerRef::new("get_every_thesaurus");
pub const GET_SINGLE_THESAURUS: HandlerRef = HandlerRef::new("get_single_thesaurus");
pub const GET_SINGLE_THESAURUS_LABELS: HandlerRef = HandlerRef::new("get_single_thesaurus_labels");
pub const INIT_THEMES: HandlerRef = HandlerRef::new("init_themes");
pub const GET_ALL_LICENCES: HandlerRef = HandlerRef::new("get_all_licences");
pub const GET_ALL_LICENCE_CODES: HandlerRef = HandlerRef::new("get_all_licence_codes");
pub const INIT_LICENCES: HandlerRef = HandlerRef::new("init_licences");

// Portal sync
pub const GET_PORTAL_TOKEN: HandlerRef = HandlerRef::new("get_portal_token");
pub const CHECK_STORED_TOKEN: HandlerRef = HandlerRef::new("check_stored_token");
pub const SEND_MANY_METADATA_TO_PORTAL: HandlerRef = HandlerRef::new("send_many_metadata_to_portal");
pub const GET_PORTAL_METADATA: HandlerRef = HandlerRef::new("get_portal_metadata");
pub const SEND_METADATA_TO_PORTAL: HandlerRef = HandlerRef::new("send_metadata_to_portal");
pub const DELETE_PORTAL_METADATA: HandlerRef = HandlerRef::new("delete_portal_metadata");
pub const GET_PORTAL_CACHED_METADATA: HandlerRef = HandlerRef::new("get_portal_cached_metadata");
pub const GET_PORTAL_METADATA_IDS: HandlerRef = HandlerRef::new("get_portal_metadata_ids");
pub const GET_NODE_URL: HandlerRef = HandlerRef::new("get_node_url");
pub const GET_PORTAL_URL: HandlerRef = HandlerRef::new("get_portal_url");

// Logs and database
pub const GET_LOGS: HandlerRef = HandlerRef::new("get_logs");
pub const SEARCH_LOGS: HandlerRef = HandlerRef::new("search_logs");
pub const GET_COLLECTIONS: HandlerRef = HandlerRef::new("get_collections");
pub const DROP_COLLECTION: HandlerRef = HandlerRef::new("drop_collection");
pub const DROP_DB: HandlerRef = HandlerRef::new("drop_db");
pub const DUMP_DB: HandlerRef = HandlerRef::new("dump_db");
pub const RESTORE_DB: HandlerRef = HandlerRef::new("restore_db");

/// Every generic object operation handler.
pub const OBJECT_HANDLERS: [HandlerRef; 9] = [
    ADD_OBJECTS,
    UPSERT_OBJECTS,
    GET_OBJECT_LIST,
    GET_SINGLE_OBJECT,
    DELETE_SINGLE_OBJECT,
    DELETE_MANY_OBJECTS,
    DELETE_OBJECT_LIST,
    SEARCH_OBJECTS,
    COUNT_OBJECTS,
];
