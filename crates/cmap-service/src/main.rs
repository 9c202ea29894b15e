//! `cmap`: serve, check and fetch concept maps

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use cmap_model::analysis;
use cmap_remote::{HttpContentSource, RemoteFetchCache, GITHUB_API_BASE};
use cmap_service::{routes, ConceptMapService, ServiceConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("cmap")
        .version(cmap_service::VERSION)
        .about("Concept map service and authoring tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Serve the concept map over HTTP")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address, overrides the configuration"),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .value_parser(value_parser!(PathBuf))
                        .help("Concept map file, overrides the configuration"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a concept map file and report on it")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Concept map JSON file"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print statistics as JSON"),
                ),
        )
        .subcommand(
            Command::new("fetch")
                .about("Fetch a concept map from a GitHub repository")
                .arg(Arg::new("owner").long("owner").required(true).help("Repository owner"))
                .arg(Arg::new("repo").long("repo").required(true).help("Repository name"))
                .arg(Arg::new("path").long("path").required(true).help("File path in the repository"))
                .arg(
                    Arg::new("api")
                        .long("api")
                        .default_value(GITHUB_API_BASE)
                        .help("API root"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cmap v{}", cmap_service::VERSION);

    match cli().get_matches().subcommand() {
        Some(("serve", args)) => serve(args).await,
        Some(("check", args)) => check(args).await,
        Some(("fetch", args)) => fetch(args).await,
        _ => Ok(()),
    }
}

async fn serve(args: &ArgMatches) -> Result<()> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.get_one::<SocketAddr>("bind") {
        config = config.with_bind(*bind);
    }
    if let Some(data) = args.get_one::<PathBuf>("data") {
        config = config.with_data_path(data);
    }

    let service = Arc::new(ConceptMapService::from_config(&config)?);
    let api = routes::api(service, &config.allowed_origins);

    let (addr, server) = warp::serve(api)
        .try_bind_with_graceful_shutdown(config.bind, async {
            // An error here means no signal handler; run until killed.
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .with_context(|| format!("failed to bind {}", config.bind))?;

    match &config.remote {
        Some(location) => tracing::info!(%addr, remote = %location, "serving concept map"),
        None => tracing::info!(%addr, data = %config.data_path.display(), "serving concept map"),
    }
    server.await;
    tracing::info!("shut down");
    Ok(())
}

async fn check(args: &ArgMatches) -> Result<()> {
    let path = args.get_one::<PathBuf>("file").context("FILE is required")?;
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let graph = cmap_codec::decode(&text)
        .with_context(|| format!("{} is not a valid concept map", path.display()))?;

    let stats = analysis::stats(&graph);
    let orphans = analysis::orphan_ids(&graph);
    let self_loops: Vec<String> = analysis::self_loops(&graph)
        .into_iter()
        .map(|link| link.source_id().to_owned())
        .collect();
    let unknown_types = analysis::unknown_relationship_types(&graph);
    let order = analysis::learning_order(&graph);

    if args.get_flag("json") {
        let report = serde_json::json!({
            "stats": stats,
            "orphans": orphans,
            "self_loops": self_loops,
            "unknown_relationship_types": unknown_types,
            "learning_order": order.as_ref().ok(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} v{}", graph.metadata().description(), graph.metadata().version());
    println!("  Nodes: {}", stats.nodes);
    println!("  Links: {}", stats.links);
    println!("  Avg connections: {:.2}", stats.avg_connections);
    for (kind, count) in &stats.by_kind {
        println!("    {kind}: {count}");
    }

    if !orphans.is_empty() {
        println!("  Orphans: {}", orphans.join(", "));
    }
    for id in &self_loops {
        tracing::warn!(%id, "self-referencing link");
        println!("  Warning: '{id}' links to itself");
    }
    if !unknown_types.is_empty() {
        tracing::warn!(types = ?unknown_types, "unknown relationship types");
        println!("  Warning: unknown relationship types: {}", unknown_types.join(", "));
    }

    match order {
        Ok(order) => println!("  Learning order: {}", order.join(" -> ")),
        Err(e) => {
            tracing::warn!("{e}");
            println!("  Learning order: none ({e})");
        }
    }
    Ok(())
}

async fn fetch(args: &ArgMatches) -> Result<()> {
    let arg = |name: &str| {
        args.get_one::<String>(name)
            .map(String::as_str)
            .with_context(|| format!("--{name} is required"))
    };

    let source = HttpContentSource::with_base_url(arg("api")?)?;
    let cache = RemoteFetchCache::new(Arc::new(source));
    let content = cache.fetch(arg("owner")?, arg("repo")?, arg("path")?).await?;
    println!("{content}");
    Ok(())
}
