//! Routing subsystem: route table, tier registry and path matching.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → matcher.rs (resolve against the registry)
//!     → Return: Matched(BoundRequest) | MethodNotAllowed | NotFound
//!     → RouteAction::Forward → handler catalog
//!     → RouteAction::Redirect → redirect.rs (Location + 308/302)
//!
//! Route Compilation (at startup):
//!     table.rs + objects.rs (RouteDecl lists per tier)
//!     → registry.rs (compile templates, reject duplicates)
//!     → Freeze as immutable TierRegistry
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: segment comparison only
//! - Deterministic: same input always matches same route
//! - Most specific template wins; lists are still declared specific-first

pub mod matcher;
pub mod objects;
pub mod redirect;
pub mod refs;
pub mod registry;
pub mod spec;
pub mod table;
pub mod template;
pub mod tier;

pub use matcher::{BoundRequest, MatchOutcome, MatchStrategy};
pub use redirect::{RedirectError, RedirectKind, RedirectRule};
pub use registry::{RegistryError, TierRegistry, TierRoutes};
pub use spec::{HandlerRef, RouteAction, RouteDecl, RouteMethod, RouteSpec};
pub use table::build_registry;
pub use tier::Tier;
