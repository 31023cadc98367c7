//! Tier registry: compiled, validated, immutable route table.
//!
//! # Responsibilities
//! - Compile every `RouteDecl` into a `RouteSpec` stamped with its tier
//! - Reject malformed templates, duplicate `(method, shape)` and duplicate
//!   route names within a tier
//! - Report ordering hazards and cross-tier overlaps for logging
//!
//! # Design Decisions
//! - All issues are collected before failing, not just the first
//! - Tiers are stored in `Tier` order; within a tier, declaration order
//! - Built once at startup and shared behind `Arc`; no mutation afterwards

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::routing::matcher::MatchStrategy;
use crate::routing::spec::{HandlerRef, RouteAction, RouteDecl, RouteMethod, RouteSpec};
use crate::routing::template::{split_path, PathTemplate, Shape, TemplateError};
use crate::routing::tier::Tier;

/// One problem found while compiling the route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationIssue {
    #[error("{tier} route `{name}`: {source}")]
    Template {
        tier: Tier,
        name: String,
        source: TemplateError,
    },
    #[error("{tier} routes `{first}` and `{second}` both declare {method} {shape}")]
    DuplicateShape {
        tier: Tier,
        method: RouteMethod,
        shape: String,
        first: String,
        second: String,
    },
    #[error("{tier} route name `{name}` is declared more than once")]
    DuplicateName { tier: Tier, name: String },
}

/// Route table rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route table: {}", IssueList(.0))]
pub struct RegistryError(pub Vec<RegistrationIssue>);

struct IssueList<'a>(&'a [RegistrationIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// A generic route declared ahead of a more specific one it also matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingHazard {
    pub tier: Tier,
    pub method: RouteMethod,
    pub generic: String,
    pub specific: String,
}

/// The same `(method, shape)` declared in two tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTierOverlap {
    pub method: RouteMethod,
    pub shape: String,
    pub first: (Tier, String),
    pub second: (Tier, String),
}

/// Routes of one tier as written in the route table.
#[derive(Debug, Clone)]
pub struct TierRoutes {
    pub tier: Tier,
    pub routes: Vec<RouteDecl>,
}

impl TierRoutes {
    pub fn new(tier: Tier, routes: Vec<RouteDecl>) -> Self {
        Self { tier, routes }
    }
}

/// Immutable registry of compiled routes grouped by tier.
#[derive(Debug)]
pub struct TierRegistry {
    tiers: Vec<(Tier, Vec<Arc<RouteSpec>>)>,
    strategy: MatchStrategy,
}

impl TierRegistry {
    /// Compile and validate the route table.
    ///
    /// Lists for the same tier are concatenated in the order given.
    pub fn build(
        tables: impl IntoIterator<Item = TierRoutes>,
        strategy: MatchStrategy,
    ) -> Result<Self, RegistryError> {
        let mut grouped: HashMap<Tier, Vec<RouteDecl>> = HashMap::new();
        for table in tables {
            grouped.entry(table.tier).or_default().extend(table.routes);
        }

        let mut issues = Vec::new();
        let mut tiers = Vec::new();

        for tier in Tier::ALL {
            let Some(decls) = grouped.remove(&tier) else {
                continue;
            };

            let mut specs = Vec::with_capacity(decls.len());
            let mut shapes: HashMap<(RouteMethod, Shape), String> = HashMap::new();
            let mut names: HashSet<String> = HashSet::new();

            for decl in decls {
                if !names.insert(decl.name.clone()) {
                    issues.push(RegistrationIssue::DuplicateName {
                        tier,
                        name: decl.name.clone(),
                    });
                }

                let template = match PathTemplate::parse(&decl.template) {
                    Ok(t) => t,
                    Err(source) => {
                        issues.push(RegistrationIssue::Template {
                            tier,
                            name: decl.name,
                            source,
                        });
                        continue;
                    }
                };

                let shape = template.shape();
                if let Some(first) = shapes.get(&(decl.method, shape.clone())) {
                    issues.push(RegistrationIssue::DuplicateShape {
                        tier,
                        method: decl.method,
                        shape: shape.to_string(),
                        first: first.clone(),
                        second: decl.name.clone(),
                    });
                } else {
                    shapes.insert((decl.method, shape), decl.name.clone());
                }

                specs.push(Arc::new(RouteSpec {
                    method: decl.method,
                    template,
                    tier,
                    name: decl.name,
                    action: decl.action,
                    options: decl.options,
                    description: decl.description,
                }));
            }

            tiers.push((tier, specs));
        }

        if !issues.is_empty() {
            return Err(RegistryError(issues));
        }

        Ok(Self { tiers, strategy })
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Registered tiers with their routes, in search order.
    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &[Arc<RouteSpec>])> {
        self.tiers.iter().map(|(tier, routes)| (*tier, routes.as_slice()))
    }

    /// Every route in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<RouteSpec>> {
        self.tiers.iter().flat_map(|(_, routes)| routes.iter())
    }

    pub fn contains_tier(&self, tier: Tier) -> bool {
        self.tiers.iter().any(|(t, _)| *t == tier)
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(|(_, routes)| routes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_name(&self, tier: Tier, name: &str) -> Option<&Arc<RouteSpec>> {
        self.tiers
            .iter()
            .find(|(t, _)| *t == tier)
            .and_then(|(_, routes)| routes.iter().find(|r| r.name == name))
    }

    /// Handler names referenced by forward routes, deduplicated.
    pub fn handler_refs(&self) -> Vec<HandlerRef> {
        let mut seen = HashSet::new();
        self.routes()
            .filter_map(|r| match r.action {
                RouteAction::Forward(handler) => Some(handler),
                RouteAction::Redirect(_) => None,
            })
            .filter(|h| seen.insert(*h))
            .collect()
    }

    /// Generic routes declared before a more specific route of the same
    /// tier and method that they would shadow under first-match ordering.
    pub fn ordering_hazards(&self) -> Vec<OrderingHazard> {
        let mut hazards = Vec::new();
        for (tier, routes) in self.tiers() {
            for (j, specific) in routes.iter().enumerate() {
                for generic in &routes[..j] {
                    let samples = specific.template.sample_paths(generic.template.segments().len());
                    let shadowed = samples
                        .iter()
                        .any(|sample| generic.template.matches(&split_path(sample)).is_some());
                    if generic.method == specific.method
                        && shadowed
                        && specific.template.cmp_specificity(&generic.template).is_gt()
                    {
                        hazards.push(OrderingHazard {
                            tier,
                            method: specific.method,
                            generic: generic.name.clone(),
                            specific: specific.name.clone(),
                        });
                    }
                }
            }
        }
        hazards
    }

    /// `(method, shape)` pairs declared in more than one tier.
    pub fn cross_tier_overlaps(&self) -> Vec<CrossTierOverlap> {
        let mut seen: HashMap<(RouteMethod, Shape), (Tier, String)> = HashMap::new();
        let mut overlaps = Vec::new();
        for route in self.routes() {
            let key = (route.method, route.template.shape());
            match seen.get(&key) {
                Some(first) if first.0 != route.tier => overlaps.push(CrossTierOverlap {
                    method: route.method,
                    shape: key.1.to_string(),
                    first: first.clone(),
                    second: (route.tier, route.name.clone()),
                }),
                Some(_) => {}
                None => {
                    seen.insert(key, (route.tier, route.name.clone()));
                }
            }
        }
        overlaps
    }

    /// Log ordering hazards and cross-tier overlaps.
    pub fn log_warnings(&self) {
        for hazard in self.ordering_hazards() {
            tracing::warn!(
                tier = %hazard.tier,
                method = %hazard.method,
                generic = %hazard.generic,
                specific = %hazard.specific,
                "Generic route declared before a more specific one"
            );
        }
        for overlap in self.cross_tier_overlaps() {
            tracing::warn!(
                method = %overlap.method,
                shape = %overlap.shape,
                first_tier = %overlap.first.0,
                first = %overlap.first.1,
                second_tier = %overlap.second.0,
                second = %overlap.second.1,
                "Route shape declared in two tiers"
            );
        }
    }
}
