use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use fetcher::HttpFetcher;
use report::{BuildOutput, CheckOutput, RouteOutput};
use serde::Serialize;
use std::path::PathBuf;
use turf_graph::{BuildStats, GraphBuilder, ZoneGraph};
use turf_zones::{EnrichReport, ZoneSet};

mod config;
mod fetcher;
mod input;
mod report;

#[derive(Parser)]
#[command(name = "turf-map")]
#[command(about = "Build and query the Turf zone graph", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./turf-map.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Zone API endpoint (overrides TURF_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the zone graph and print every connection
    Build(BuildArgs),

    /// Shortest route between two zones
    Route(RouteArgs),

    /// Verify that every zone exists in the zone API
    Check(CheckArgs),
}

#[derive(Args)]
struct GraphInputArgs {
    /// Zone file(s): JSON array of {"name", "lat", "lon"}
    #[arg(long = "zones", required = true)]
    zones: Vec<PathBuf>,

    /// Line file: JSON array of {"a", "b", "distance"}
    #[arg(long)]
    lines: PathBuf,

    /// Keep connections whose ends resolve to the same zone
    #[arg(long)]
    keep_self_loops: bool,

    /// Keep repeated connections between the same ordered pair
    #[arg(long)]
    keep_duplicates: bool,

    /// Fetch zone points from the zone API before building
    #[arg(long)]
    enrich: bool,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    input: GraphInputArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RouteArgs {
    #[command(flatten)]
    input: GraphInputArgs,

    /// Start zone
    #[arg(long)]
    from: String,

    /// Destination zone
    #[arg(long)]
    to: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Zone file(s): JSON array of {"name", "lat", "lon"}
    #[arg(long = "zones", required = true)]
    zones: Vec<PathBuf>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Build(args) => args.json,
        Commands::Route(args) => args.json,
        Commands::Check(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = Config::load(cli.config.as_deref(), cli.api_url.clone())?;

    match cli.command {
        Commands::Build(args) => run_build(args, &config).await?,
        Commands::Route(args) => run_route(args, &config).await?,
        Commands::Check(args) => run_check(args, &config).await?,
    }

    Ok(())
}

async fn enrich(zones: &mut ZoneSet, config: &Config) -> Result<EnrichReport> {
    let fetcher = HttpFetcher::new(config)?;
    log::info!("Fetching points for {} zones from {}", zones.len(), config.api_url);
    let report = zones
        .enrich_with_metadata(&fetcher)
        .await
        .context("Zone enrichment failed")?;
    Ok(report)
}

async fn load_graph(
    args: &GraphInputArgs,
    config: &Config,
) -> Result<(ZoneSet, ZoneGraph, BuildStats, Option<EnrichReport>)> {
    let mut zones = input::load_zones(&args.zones)?;
    let lines = input::load_lines(&args.lines)?;

    let enrichment = if args.enrich {
        Some(enrich(&mut zones, config).await?)
    } else {
        None
    };

    let (graph, stats) = GraphBuilder::new()
        .skip_self_loops(!args.keep_self_loops)
        .dedupe(!args.keep_duplicates)
        .build(&mut zones, &lines)
        .context("Failed to build zone graph")?;

    Ok((zones, graph, stats, enrichment))
}

async fn run_build(args: BuildArgs, config: &Config) -> Result<()> {
    let (zones, graph, stats, enrichment) = load_graph(&args.input, config).await?;
    let output = BuildOutput::new(
        &zones,
        stats,
        graph.node_count(),
        graph.edge_count(),
        enrichment,
    );

    if args.json {
        print_json(&output)?;
    } else {
        print!("{}", output.render_text());
    }
    Ok(())
}

async fn run_route(args: RouteArgs, config: &Config) -> Result<()> {
    let (_, graph, _, _) = load_graph(&args.input, config).await?;
    let route = graph.shortest_path(&args.from, &args.to)?;
    let output = RouteOutput {
        from: args.from,
        to: args.to,
        route,
    };

    if args.json {
        print_json(&output)?;
    } else {
        print!("{}", output.render_text());
    }
    Ok(())
}

async fn run_check(args: CheckArgs, config: &Config) -> Result<()> {
    let mut zones = input::load_zones(&args.zones)?;
    let report = enrich(&mut zones, config).await?;
    let output = CheckOutput {
        zones: zones.len(),
        report,
    };

    if args.json {
        print_json(&output)?;
    } else {
        print!("{}", output.render_text());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{body}");
    Ok(())
}
