use axum::http::Method;
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LOCATION};
use reqwest::redirect::Policy;
use std::path::PathBuf;

use catalog_gateway::config::load_or_default;
use catalog_gateway::routing::{build_registry, MatchOutcome, RouteAction};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Inspect the catalog gateway route table", long_about = None)]
struct Cli {
    /// Gateway configuration used to build the route table
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every compiled route, tier by tier
    Routes {
        /// Only show one tier (public, portal, unrestricted_private, back_office, dev)
        #[arg(short, long)]
        tier: Option<String>,
    },
    /// Show which route a request would reach
    Resolve { method: String, path: String },
    /// Send a request to a running gateway without following redirects
    Probe {
        path: String,

        #[arg(short, long, default_value = "http://localhost:3030")]
        url: String,

        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Bearer token for credentialed tiers
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Routes { tier } => {
            let registry = build_registry(&config.routing)?;
            let wanted = tier.as_deref();
            for (tier, routes) in registry.tiers() {
                if wanted.is_some_and(|w| w != tier.as_str()) {
                    continue;
                }
                println!("{} ({} routes)", tier, routes.len());
                for route in routes {
                    println!("  {:<7}{:<55}{}", route.method.as_str(), route.template.as_str(), describe(&route.action));
                    if !route.description.is_empty() {
                        println!("         {}", route.description);
                    }
                }
            }
            for hazard in registry.ordering_hazards() {
                eprintln!("warning: {:?}", hazard);
            }
        }
        Commands::Resolve { method, path } => {
            let registry = build_registry(&config.routing)?;
            let method = parse_method(&method)?;
            match registry.resolve(&method, &path) {
                MatchOutcome::Matched(bound) => {
                    println!("route:    {}", bound.route_name());
                    println!("tier:     {}", bound.tier());
                    println!("template: {}", bound.route.template);
                    println!("action:   {}", describe(&bound.route.action));
                    for (name, value) in &bound.params {
                        println!("param:    {} = {}", name, value);
                    }
                    if let Some(rest) = &bound.wildcard {
                        println!("wildcard: {}", rest);
                    }
                    if let RouteAction::Redirect(rule) = &bound.route.action {
                        match rule.location(bound.wildcard.as_deref(), None) {
                            Ok(location) => println!("location: {}", location),
                            Err(e) => println!("location: refused ({}), answers 404", e),
                        }
                    }
                    if bound.tier().requires_credentials() {
                        println!("auth:     bearer token required");
                    }
                }
                MatchOutcome::MethodNotAllowed { allowed } => {
                    let allowed: Vec<_> = allowed.iter().map(|m| m.as_str()).collect();
                    println!("405 Method Not Allowed (allow: {})", allowed.join(", "));
                }
                MatchOutcome::NotFound => println!("404 Not Found"),
            }
        }
        Commands::Probe { path, url, method, token } => {
            let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
            let mut headers = HeaderMap::new();
            if let Some(token) = token {
                headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
            }
            let res = client
                .request(parse_method(&method)?, format!("{}{}", url, path))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn describe(action: &RouteAction) -> String {
    match action {
        RouteAction::Forward(handler) => format!("→ {}", handler),
        RouteAction::Redirect(rule) => format!("⇒ {} {}", rule.kind.status().as_u16(), rule.target),
    }
}

fn parse_method(raw: &str) -> Result<Method, Box<dyn std::error::Error>> {
    Ok(Method::from_bytes(raw.to_uppercase().as_bytes())?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("{}", status);
    if let Some(location) = res.headers().get(LOCATION) {
        println!("location: {}", location.to_str()?);
    }
    let text = res.text().await?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if !text.is_empty() => println!("{}", text),
        Err(_) => {}
    }
    Ok(())
}
