use attrquery::config::AttrqueryConfig;
use attrquery::error::Result;
use attrquery::normalize::normalize;
use attrquery::{builtin_kinds, kind_by_name, parse_time, AttrKind, AttrRegistry, AttrValue};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use log::debug;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    registry: AttrRegistry,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Kinds) | None => handle_kinds(&ctx),
        Some(Commands::Values { kind }) => handle_values(&ctx, kind),
        Some(Commands::Resolve { kind, name }) => handle_resolve(&ctx, &kind, &name),
        Some(Commands::Query { terms, json }) => handle_query(&ctx, &terms, json),
        Some(Commands::Time { input }) => handle_time(&input),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Project `.attrquery/` if present, else the user config dir.
fn resolve_config_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.config_dir {
        return dir.clone();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(".attrquery");
    if project_dir.exists() {
        return project_dir;
    }

    ProjectDirs::from("com", "attrquery", "attrquery")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or(project_dir)
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = resolve_config_dir(cli);
    debug!("Using config dir {}", config_dir.display());

    let config = AttrqueryConfig::load(&config_dir)?;
    let registry = config.build_registry(&config_dir)?;
    for path in &cli.values {
        registry.load_values_file(path)?;
    }

    Ok(AppContext { registry })
}

/// Built-in kinds, then any other kind that has registered values.
fn known_kinds(registry: &AttrRegistry) -> Vec<AttrKind> {
    let mut kinds = builtin_kinds().to_vec();
    for kind in registry.kinds() {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

fn handle_kinds(ctx: &AppContext) -> Result<()> {
    for kind in known_kinds(&ctx.registry) {
        let count = ctx
            .registry
            .lookup_kind(kind)
            .map(|entry| entry.len())
            .unwrap_or(0);
        println!(
            "{:<12} {:>4}  {}",
            kind.name().bold(),
            count.to_string().dimmed(),
            kind.description()
        );
    }
    Ok(())
}

fn handle_values(ctx: &AppContext, kind: Option<String>) -> Result<()> {
    if let Some(name) = kind {
        let kind = kind_by_name(&name, &ctx.registry)?;
        println!("{}", ctx.registry.render_kind(kind));
        return Ok(());
    }

    let kinds = ctx.registry.kinds();
    if kinds.is_empty() {
        println!("{}", "No values registered.".dimmed());
        return Ok(());
    }
    for (i, kind) in kinds.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", kind.name().bold());
        println!("{}", ctx.registry.render_kind(kind));
    }
    Ok(())
}

fn handle_resolve(ctx: &AppContext, kind: &str, name: &str) -> Result<()> {
    let kind = kind_by_name(kind, &ctx.registry)?;
    let leaf = ctx.registry.resolve_kind(kind, &normalize(name))?;
    println!("{}", leaf);
    Ok(())
}

fn handle_query(ctx: &AppContext, terms: &[String], json: bool) -> Result<()> {
    let query = ctx.registry.build_query(terms)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&query.query_blocks())?);
        return Ok(());
    }

    println!("{}", query);
    let blocks = query.blocks();
    println!("{}", format!("{} block(s) to submit", blocks.len()).dimmed());
    Ok(())
}

fn handle_time(input: &str) -> Result<()> {
    let time = parse_time(input)?;
    println!("{}", AttrValue::Time(time));
    Ok(())
}
