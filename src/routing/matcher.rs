//! Request resolution against the tier registry.
//!
//! # Responsibilities
//! - Resolve `(method, path)` to a route plus captured parameters
//! - Distinguish Not Found from Method Not Allowed (with allowed methods)
//! - Break ties between overlapping templates
//!
//! # Design Decisions
//! - Pure and synchronous: no locks, no allocation beyond the result
//! - Each tier yields one candidate: its most specific match under
//!   `Specificity`, its first match under `RegistrationOrder`
//! - Across tiers the most specific candidate wins; equal rank goes to the
//!   earlier tier. Registration order only means something inside a list

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::routing::registry::TierRegistry;
use crate::routing::spec::{RouteMethod, RouteSpec};
use crate::routing::template::{split_path, Captures};
use crate::routing::tier::Tier;
use axum::http::Method;

/// Tie-breaking policy between routes that match the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Specificity,
    RegistrationOrder,
}

/// Per-request result of a successful match.
#[derive(Debug, Clone)]
pub struct BoundRequest {
    pub route: Arc<RouteSpec>,
    pub params: Vec<(String, String)>,
    pub wildcard: Option<String>,
}

impl BoundRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn tier(&self) -> Tier {
        self.route.tier
    }

    pub fn route_name(&self) -> &str {
        &self.route.name
    }
}

/// Outcome of resolving one request.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(BoundRequest),
    /// The path matches routes, none for this method.
    MethodNotAllowed { allowed: Vec<RouteMethod> },
    NotFound,
}

impl TierRegistry {
    /// Resolve a request method and path.
    pub fn resolve(&self, method: &Method, path: &str) -> MatchOutcome {
        let wanted = RouteMethod::from_http(method);
        let segments = split_path(path);

        let mut best: Option<(&Arc<RouteSpec>, Captures)> = None;
        let mut allowed: Vec<RouteMethod> = Vec::new();

        for (_, routes) in self.tiers() {
            let mut tier_best: Option<(&Arc<RouteSpec>, Captures)> = None;

            for route in routes {
                let Some(captures) = route.template.matches(&segments) else {
                    continue;
                };

                if Some(route.method) != wanted {
                    if !allowed.contains(&route.method) {
                        allowed.push(route.method);
                    }
                    continue;
                }

                if more_specific(route, &tier_best) {
                    tier_best = Some((route, captures));
                    if self.strategy() == MatchStrategy::RegistrationOrder {
                        break;
                    }
                }
            }

            if let Some((route, captures)) = tier_best {
                if more_specific(route, &best) {
                    best = Some((route, captures));
                }
            }
        }

        match best {
            Some((route, captures)) => MatchOutcome::Matched(bind(route, captures)),
            None if !allowed.is_empty() => {
                allowed.sort();
                MatchOutcome::MethodNotAllowed { allowed }
            }
            None => MatchOutcome::NotFound,
        }
    }
}

fn more_specific(route: &RouteSpec, current: &Option<(&Arc<RouteSpec>, Captures)>) -> bool {
    match current {
        None => true,
        Some((current, _)) => route.template.cmp_specificity(&current.template).is_gt(),
    }
}

fn bind(route: &Arc<RouteSpec>, captures: Captures) -> BoundRequest {
    BoundRequest {
        route: Arc::clone(route),
        params: captures.params,
        wildcard: captures.wildcard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::registry::TierRoutes;
    use crate::routing::spec::{HandlerRef, RouteDecl};
    use crate::routing::spec::RouteMethod::{Delete, Get};

    const H: HandlerRef = HandlerRef::new("h");

    fn registry(strategy: MatchStrategy) -> TierRegistry {
        TierRegistry::build(
            vec![
                TierRoutes::new(
                    Tier::BackOffice,
                    vec![
                        RouteDecl::forward(Get, "/adm/:object/:id/:prop", "get_prop", H),
                        RouteDecl::forward(Get, "/adm/:object/:id", "get_one", H),
                        RouteDecl::forward(Delete, "/adm/:object/:id", "del_one", H),
                        RouteDecl::forward(Get, "/adm/:object/:id/reports", "get_reports", H),
                    ],
                ),
                TierRoutes::new(Tier::Dev, vec![RouteDecl::forward(Get, "/adm/db/:collection", "get_db", H)]),
            ],
            strategy,
        )
        .unwrap()
    }

    fn matched(outcome: MatchOutcome) -> BoundRequest {
        match outcome {
            MatchOutcome::Matched(bound) => bound,
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_specificity_prefers_literal_suffix() {
        let reg = registry(MatchStrategy::Specificity);
        let bound = matched(reg.resolve(&Method::GET, "/adm/resources/abc/reports"));
        assert_eq!(bound.route_name(), "get_reports");
        assert_eq!(bound.param("object"), Some("resources"));
        assert_eq!(bound.param("id"), Some("abc"));
        assert_eq!(bound.param("prop"), None);
    }

    #[test]
    fn test_registration_order_takes_first_match() {
        let reg = registry(MatchStrategy::RegistrationOrder);
        let bound = matched(reg.resolve(&Method::GET, "/adm/resources/abc/reports"));
        assert_eq!(bound.route_name(), "get_prop");
        assert_eq!(bound.param("prop"), Some("reports"));
    }

    #[test]
    fn test_literal_in_later_tier_beats_param_in_earlier_tier() {
        let reg = registry(MatchStrategy::Specificity);
        let bound = matched(reg.resolve(&Method::GET, "/adm/db/users"));
        assert_eq!(bound.route_name(), "get_db");
        assert_eq!(bound.tier(), Tier::Dev);
    }

    #[test]
    fn test_registration_order_still_ranks_across_tiers() {
        let reg = registry(MatchStrategy::RegistrationOrder);
        let bound = matched(reg.resolve(&Method::GET, "/adm/db/users"));
        assert_eq!(bound.route_name(), "get_db");
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let reg = registry(MatchStrategy::Specificity);
        match reg.resolve(&Method::POST, "/adm/resources/abc") {
            MatchOutcome::MethodNotAllowed { allowed } => assert_eq!(allowed, vec![Get, Delete]),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            reg.resolve(&Method::PATCH, "/adm/resources/abc"),
            MatchOutcome::MethodNotAllowed { .. }
        ));
    }

    #[test]
    fn test_not_found() {
        let reg = registry(MatchStrategy::Specificity);
        assert!(matches!(reg.resolve(&Method::GET, "/nothing/here"), MatchOutcome::NotFound));
        assert!(matches!(reg.resolve(&Method::GET, "/adm/resources"), MatchOutcome::NotFound));
        assert!(matches!(reg.resolve(&Method::GET, "/"), MatchOutcome::NotFound));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let reg = registry(MatchStrategy::Specificity);
        let a = matched(reg.resolve(&Method::GET, "/adm/contacts/42/name"));
        let b = matched(reg.resolve(&Method::GET, "/adm/contacts/42/name"));
        assert!(Arc::ptr_eq(&a.route, &b.route));
        assert_eq!(a.params, b.params);
        assert_eq!(a.wildcard, b.wildcard);
    }
}
