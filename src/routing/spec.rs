//! Declarative route records.
//!
//! A [`RouteDecl`] is what the route table writes down; the registry
//! compiles it into a [`RouteSpec`] stamped with its tier.

use axum::http::Method;
use std::collections::BTreeMap;
use std::fmt;

use crate::routing::redirect::RedirectRule;
use crate::routing::template::PathTemplate;
use crate::routing::tier::Tier;

/// Option key carrying a behavior modifier for the handler.
pub const OPT_MODIFIER: &str = "opt";

/// HTTP methods a route may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RouteMethod {
    /// Map a request method; anything else can never match a route.
    /// `HEAD` is served by the `GET` route of the same path.
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET | Method::HEAD => Some(RouteMethod::Get),
            Method::POST => Some(RouteMethod::Post),
            Method::PUT => Some(RouteMethod::Put),
            Method::DELETE => Some(RouteMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of an external handler, resolved against the handler catalog at
/// startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRef(&'static str);

impl HandlerRef {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What happens once a route is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Delegate to a domain handler.
    Forward(HandlerRef),
    /// Rewrite to the canonical location and answer with a redirect.
    Redirect(RedirectRule),
}

/// Uncompiled route as written in the route table.
#[derive(Debug, Clone)]
pub struct RouteDecl {
    pub method: RouteMethod,
    pub template: String,
    pub name: String,
    pub action: RouteAction,
    pub options: BTreeMap<String, String>,
    pub description: String,
}

impl RouteDecl {
    pub fn forward(
        method: RouteMethod,
        template: impl Into<String>,
        name: impl Into<String>,
        handler: HandlerRef,
    ) -> Self {
        Self {
            method,
            template: template.into(),
            name: name.into(),
            action: RouteAction::Forward(handler),
            options: BTreeMap::new(),
            description: String::new(),
        }
    }

    pub fn redirect(
        method: RouteMethod,
        template: impl Into<String>,
        name: impl Into<String>,
        rule: RedirectRule,
    ) -> Self {
        Self {
            method,
            template: template.into(),
            name: name.into(),
            action: RouteAction::Redirect(rule),
            options: BTreeMap::new(),
            description: String::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Compiled, immutable route.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub method: RouteMethod,
    pub template: PathTemplate,
    pub tier: Tier,
    pub name: String,
    pub action: RouteAction,
    pub options: BTreeMap<String, String>,
    pub description: String,
}

impl RouteSpec {
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.action, RouteAction::Redirect(_))
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}:{}]", self.method, self.template, self.tier, self.name)
    }
}
