use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use rusty_robots::robots::{Decision, FetchConfig, RobotsTxtSource, is_origin};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArgs {
    /// Site URLs to fetch robots.txt from, or paths of local robots.txt files
    #[arg(long, value_name = "URL|FILE", required = true)]
    source: Vec<String>,

    /// Crawler name to evaluate the rules for
    #[arg(long, default_value = "*")]
    agent: String,

    /// Timeout for fetching robots.txt (seconds)
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Print found agents, crawl delay and sitemaps
    #[arg(long)]
    summary: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Paths or URLs to check
    #[arg(value_name = "PATH")]
    paths: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "rusty_robots=debug"
    } else {
        "rusty_robots=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_source(source: &str, config: &FetchConfig) -> anyhow::Result<RobotsTxtSource> {
    if is_origin(source) {
        return Ok(RobotsTxtSource::load(source, config).await?);
    }
    let content = tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read {}", source))?;
    Ok(RobotsTxtSource::from_text(&content))
}

fn print_report(source_name: &str, source: &RobotsTxtSource, args: &CommandLineArgs) {
    let robots_txt = source.robots_txt();
    let matcher = robots_txt.matcher(&args.agent);

    println!("# {}", source_name);
    if args.summary {
        println!("agents: {}", matcher.found_agents().join(", "));
        println!("crawl-delay: {}", matcher.crawl_delay());
        for sitemap in matcher.sitemaps() {
            println!("sitemap: {}", sitemap);
        }
    }
    for path in &args.paths {
        match matcher.decide(path) {
            Decision::Allow(pattern) => println!("allowed, {}, allow: {}", path, pattern),
            Decision::Disallow(pattern) => println!("disallowed, {}, disallow: {}", path, pattern),
            Decision::Unrestricted => println!("allowed, {}", path),
        }
    }
}

async fn main_impl(args: &CommandLineArgs) -> anyhow::Result<()> {
    let config = FetchConfig::new(Duration::from_secs(args.timeout), &args.agent);

    let loads = args
        .source
        .iter()
        .map(|source| load_source(source, &config));
    let sources = join_all(loads).await;

    for (source_name, source) in args.source.iter().zip(sources) {
        print_report(source_name, &source?, args);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = CommandLineArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = main_impl(&args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
