//! Generic object route family.
//!
//! One set of CRUD/search routes templated as `{private}/:object` serves
//! every object type; the handler interprets the `object` segment. Routes
//! layered on a specific object (reports, media commit, metadata save) are
//! declared separately and must come first in the back-office table.

use crate::routing::refs;
use crate::routing::spec::RouteMethod::{Delete, Get, Post, Put};
use crate::routing::spec::{RouteDecl, OPT_MODIFIER};

pub const PARAM_OBJECT: &str = "object";
pub const PARAM_ID: &str = "id";
pub const PARAM_PROP: &str = "prop";
pub const PARAM_REPORT_ID: &str = "report_id";

pub const ACT_SEARCH: &str = "search";
pub const ACT_EXT_SEARCH: &str = "extended_search";
pub const ACT_DELETION: &str = "deletion";
pub const ACT_COUNT: &str = "count";
pub const OBJ_REPORTS: &str = "reports";

/// Sub-resource routes on top of the generic family.
///
/// Every template here is more specific than the generic route of the same
/// method it overlaps with.
pub fn object_sub_resource_routes(private: &str) -> Vec<RouteDecl> {
    let object = format!("{}/:{}", private, PARAM_OBJECT);
    let one_reports = format!("{}/:{}/{}", object, PARAM_ID, OBJ_REPORTS);
    let one_report = format!("{}/:{}", one_reports, PARAM_REPORT_ID);

    vec![
        RouteDecl::forward(Get, format!("{}/{}", private, ACT_SEARCH), "prv_get_search_fields", refs::GET_SEARCHABLE_FIELDS)
            .describe("Get searchable fields for every object type"),
        RouteDecl::forward(Put, format!("{}/resources/save", private), "prv_save_all", refs::UPDATE_ALL_METADATA_STATUS)
            .describe("Update every metadata status"),
        RouteDecl::forward(Post, format!("{}/media/:{}/commit", private, PARAM_ID), "prv_media_commit", refs::COMMIT_MEDIA)
            .describe("Commit a media for a given metadata"),
        RouteDecl::forward(Delete, format!("{}/{}", private, OBJ_REPORTS), "prv_del_old_reports", refs::DELETE_REPORTS_BEFORE)
            .describe("Purge reports older than a given date"),
        RouteDecl::forward(Get, format!("{}/{}", object, OBJ_REPORTS), "prv_get_all_obj_report", refs::GET_REPORT_LIST_FOR_OBJECT_TYPE)
            .describe("Get all integration reports for one object type"),
        RouteDecl::forward(Post, format!("{}/{}", one_reports, ACT_DELETION), "prv_del_list_obj_report", refs::DELETE_MANY_REPORTS_FOR_OBJECT)
            .describe("Delete a list of integration reports for an identified object"),
        RouteDecl::forward(Get, one_report.clone(), "prv_get_one_obj_report", refs::GET_SINGLE_REPORT_FOR_OBJECT)
            .describe("Get an identified report for an identified object"),
        RouteDecl::forward(Delete, one_report, "prv_del_obj_report", refs::DELETE_SINGLE_REPORT_FOR_OBJECT)
            .describe("Delete an identified integration report for an identified object"),
        RouteDecl::forward(Post, one_reports.clone(), "prv_add_obj_report", refs::ADD_REPORT_FOR_OBJECT)
            .describe("Add an integration report for an identified object"),
        RouteDecl::forward(Put, one_reports.clone(), "prv_upsert_obj_report", refs::UPSERT_REPORT_FOR_OBJECT)
            .describe("Add/edit an integration report for an identified object"),
        RouteDecl::forward(Get, one_reports.clone(), "prv_get_obj_report_list", refs::GET_REPORT_LIST_FOR_OBJECT)
            .describe("Get all integration reports for an identified object"),
        RouteDecl::forward(Delete, one_reports, "prv_del_all_obj_report", refs::DELETE_EVERY_REPORT_FOR_OBJECT)
            .describe("Delete every integration report for an identified object"),
    ]
}

/// The object-type-agnostic CRUD/search family, literal suffixes first.
pub fn generic_object_routes(private: &str) -> Vec<RouteDecl> {
    let object = format!("{}/:{}", private, PARAM_OBJECT);
    let one = format!("{}/:{}", object, PARAM_ID);

    vec![
        RouteDecl::forward(Post, format!("{}/{}", object, ACT_DELETION), "prv_del_list", refs::DELETE_OBJECT_LIST)
            .describe("Delete a list of objects of a type"),
        RouteDecl::forward(Get, format!("{}/{}", object, ACT_SEARCH), "prv_obj_search", refs::SEARCH_OBJECTS)
            .describe("Search objects"),
        RouteDecl::forward(Get, format!("{}/{}", object, ACT_EXT_SEARCH), "prv_obj_ext_search", refs::SEARCH_OBJECTS)
            .option(OPT_MODIFIER, ACT_EXT_SEARCH)
            .describe("Search objects (thesaurus-powered)"),
        RouteDecl::forward(Get, format!("{}/{}", object, ACT_COUNT), "prv_obj_count", refs::COUNT_OBJECTS)
            .describe("Count the objects of a type"),
        RouteDecl::forward(Post, object.clone(), "prv_add_one", refs::ADD_OBJECTS)
            .describe("Add one or many objects"),
        RouteDecl::forward(Put, object.clone(), "prv_upsert_one", refs::UPSERT_OBJECTS)
            .describe("Edit one or many objects"),
        RouteDecl::forward(Get, object.clone(), "prv_get_all", refs::GET_OBJECT_LIST)
            .describe("Get every object of a type"),
        RouteDecl::forward(Delete, object, "prv_del_many", refs::DELETE_MANY_OBJECTS)
            .describe("Delete every object of a type"),
        RouteDecl::forward(Get, format!("{}/:{}", one, PARAM_PROP), "prv_get_one_prop", refs::GET_SINGLE_OBJECT)
            .describe("Get one object property value"),
        RouteDecl::forward(Get, one.clone(), "prv_get_one", refs::GET_SINGLE_OBJECT)
            .describe("Get one object"),
        RouteDecl::forward(Delete, one, "prv_del_one", refs::DELETE_SINGLE_OBJECT)
            .describe("Delete one object"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::{MatchOutcome, MatchStrategy};
    use crate::routing::registry::{TierRegistry, TierRoutes};
    use crate::routing::tier::Tier;
    use axum::http::Method;

    fn back_office(strategy: MatchStrategy) -> TierRegistry {
        let mut routes = object_sub_resource_routes("/api/admin");
        routes.extend(generic_object_routes("/api/admin"));
        TierRegistry::build(vec![TierRoutes::new(Tier::BackOffice, routes)], strategy).unwrap()
    }

    fn route_name(registry: &TierRegistry, method: Method, path: &str) -> String {
        match registry.resolve(&method, path) {
            MatchOutcome::Matched(bound) => bound.route_name().to_string(),
            other => panic!("{} {} -> {:?}", method, path, other),
        }
    }

    #[test]
    fn test_family_is_declared_specific_first() {
        assert!(back_office(MatchStrategy::Specificity).ordering_hazards().is_empty());
    }

    #[test]
    fn test_sub_resources_win_under_both_strategies() {
        for strategy in [MatchStrategy::Specificity, MatchStrategy::RegistrationOrder] {
            let reg = back_office(strategy);
            assert_eq!(route_name(&reg, Method::GET, "/api/admin/resources/foo/reports"), "prv_get_obj_report_list");
            assert_eq!(route_name(&reg, Method::GET, "/api/admin/resources/foo/title"), "prv_get_one_prop");
            assert_eq!(route_name(&reg, Method::GET, "/api/admin/contacts/search"), "prv_obj_search");
            assert_eq!(route_name(&reg, Method::GET, "/api/admin/contacts/count"), "prv_obj_count");
            assert_eq!(route_name(&reg, Method::GET, "/api/admin/search"), "prv_get_search_fields");
            assert_eq!(route_name(&reg, Method::POST, "/api/admin/media/m1/commit"), "prv_media_commit");
            assert_eq!(route_name(&reg, Method::PUT, "/api/admin/resources/save"), "prv_save_all");
            assert_eq!(route_name(&reg, Method::DELETE, "/api/admin/reports"), "prv_del_old_reports");
        }
    }

    #[test]
    fn test_extended_search_carries_modifier() {
        let reg = back_office(MatchStrategy::Specificity);
        match reg.resolve(&Method::GET, "/api/admin/resources/extended_search") {
            MatchOutcome::Matched(bound) => {
                assert_eq!(bound.route.option(OPT_MODIFIER), Some(ACT_EXT_SEARCH));
                assert_eq!(bound.param(PARAM_OBJECT), Some("resources"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_unknown_object_type_still_matches() {
        let reg = back_office(MatchStrategy::Specificity);
        match reg.resolve(&Method::GET, "/api/admin/unknown-type") {
            MatchOutcome::Matched(bound) => {
                assert_eq!(bound.route_name(), "prv_get_all");
                assert_eq!(bound.param(PARAM_OBJECT), Some("unknown-type"));
            }
            other => panic!("{:?}", other),
        }
    }
}
