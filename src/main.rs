// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Passive OSINT Reconnaissance Toolkit
 * Standalone CLI for person-target reconnaissance
 *
 * Features:
 * - Search-engine dork orchestration (photos, profiles, public mentions)
 * - Image discovery with EXIF / GPS metadata extraction
 * - Public social-profile metadata lookup
 * - Follower monitoring between runs
 * - JSON and CSV report export
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};

use varjo_recon::config::ReconConfig;
use varjo_recon::dorks::{filter_images, DorkOrchestrator};
use varjo_recon::gallery::{self, ImageGallery};
use varjo_recon::http_client::{FetchOutcome, HttpClient};
use varjo_recon::profile::ProfileClient;
use varjo_recon::reporting::{self, SessionResults};
use varjo_recon::search::SearchClient;
use varjo_recon::types::ProfileReport;

/// Varjo - Passive OSINT Reconnaissance Toolkit
#[derive(Parser)]
#[command(name = "varjo")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "0.1.0")]
#[command(about = "Passive person-target reconnaissance. Dorks, profiles, images.", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dork catalog against a target name or username
    Dorks {
        /// Target full name or username
        target: String,

        /// Dork types to run (default: the whole catalog)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Maximum links to keep per dork (default: VARJO_MAX_RESULTS, or 20)
        #[arg(long)]
        max_results: Option<usize>,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Image-focused dork with optional download and EXIF inspection
    Images {
        /// Target full name or username
        target: String,

        /// Maximum images to report
        #[arg(long, default_value = "9")]
        max_images: usize,

        /// Fetch each image and print its EXIF tags and GPS position
        #[arg(long)]
        exif: bool,

        /// Download images into this directory
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },

    /// Look up public profile metadata for a username
    Profile {
        /// Username (a leading @ is accepted)
        username: String,

        /// Also run the public collab/tag mention query
        #[arg(long)]
        sniff: bool,
    },

    /// Compare the current follower count against a previous reading
    Monitor {
        /// Username to monitor
        username: String,

        /// Follower count from the previous run
        #[arg(long, default_value = "0")]
        previous: u64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    if !cli.quiet {
        print_banner();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("varjo-recon")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

fn print_banner() {
    print!("\x1b[95m");
    println!("                    _");
    println!(" _   ______ ______ (_)___");
    println!("| | / / __ `/ ___/ / / __ \\");
    println!("| |/ / /_/ / /  / / / /_/ /");
    println!("|___/\\__,_/_/__/ /_/\\____/");
    println!("            /___/");
    print!("\x1b[0m\x1b[1m\x1b[97m");
    println!("     Passive OSINT Reconnaissance");
    print!("\x1b[0m\x1b[95m");
    println!("      v0.1.0 - (c) 2026 Bountyy Oy");
    print!("\x1b[0m");
    println!();
}

async fn async_main(cli: Cli) -> Result<()> {
    let config = ReconConfig::from_env()?;
    let http = Arc::new(HttpClient::new(&config)?);

    match cli.command {
        Commands::Dorks {
            target,
            types,
            max_results,
            output,
            format,
        } => {
            let max_results = config.effective_max_results(max_results);
            run_dorks(http, &target, &types, max_results, output, format).await
        }
        Commands::Images {
            target,
            max_images,
            exif,
            download_dir,
        } => run_images(http, &target, max_images, exif, download_dir).await,
        Commands::Profile { username, sniff } => {
            run_profile(http, &username, sniff, config.effective_max_results(None)).await
        }
        Commands::Monitor { username, previous } => run_monitor(http, &username, previous).await,
    }
}

async fn run_dorks(
    http: Arc<HttpClient>,
    target: &str,
    types: &[String],
    max_results: usize,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let orchestrator = DorkOrchestrator::new(SearchClient::new(http));
    let result = orchestrator.run(target, types, max_results).await;

    if result.is_empty() {
        warn!("Every dork returned zero links; the search engine may be blocking this host");
    }

    let rendered = match format {
        OutputFormat::Json => reporting::export_json(&result)?,
        OutputFormat::Csv => {
            let session = SessionResults {
                gallery: filter_images(&result),
                dorks: Some(result),
                ..SessionResults::default()
            };
            reporting::export_csv(&session)?
        }
        OutputFormat::Table => {
            let mut lines = Vec::new();
            for (dork_type, url) in reporting::link_table(&result) {
                lines.push(format!("{:<28} {}", dork_type, url));
            }
            lines.join("\n")
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn run_images(
    http: Arc<HttpClient>,
    target: &str,
    max_images: usize,
    exif: bool,
    download_dir: Option<PathBuf>,
) -> Result<()> {
    let orchestrator = DorkOrchestrator::new(SearchClient::new(http.clone()));
    let result = orchestrator.image_dork(target, max_images).await;

    if result.urls.is_empty() {
        warn!("No direct image links found for target: {}", target);
        return Ok(());
    }

    println!("Found {} image link(s):", result.urls.len());
    for url in &result.urls {
        println!("  {}", url);
    }

    if !exif && download_dir.is_none() {
        return Ok(());
    }

    let gallery_client = ImageGallery::new(http);
    for url in &result.urls {
        let bytes = match gallery_client.fetch_image(url).await {
            FetchOutcome::Ok(bytes) => bytes,
            FetchOutcome::Forbidden => {
                warn!("Access denied (403): {}", url);
                continue;
            }
            FetchOutcome::Error => {
                warn!("Failed to fetch: {}", url);
                continue;
            }
        };

        if let Some(dir) = &download_dir {
            let path = gallery_client.save_image(url, &bytes, dir)?;
            info!("Saved {}", path.display());
        }

        if exif {
            print_exif(url, &bytes);
        }
    }

    Ok(())
}

fn print_exif(url: &str, bytes: &[u8]) {
    let tags = gallery::extract_exif(bytes);
    if tags.is_empty() {
        println!("{}: no EXIF metadata", url);
        return;
    }

    println!("{}:", url);
    for (tag, value) in &tags {
        println!("  {:<24} {}", tag, value);
    }

    if let Some((latitude, longitude)) = gallery::gps_coordinates(bytes) {
        println!("  GPS position            {:.6}, {:.6}", latitude, longitude);
        println!("  Map                     {}", gallery::maps_url(latitude, longitude));
    }
}

async fn run_profile(
    http: Arc<HttpClient>,
    username: &str,
    sniff: bool,
    max_results: usize,
) -> Result<()> {
    let profile_client = ProfileClient::new(http.clone());
    let report = profile_client.get_profile_metadata(username).await;

    match &report {
        ProfileReport::Profile(_) => println!("{}", reporting::export_json(&report)?),
        ProfileReport::Failed(failure) => {
            warn!("Profile lookup failed for {}: {}", failure.username, failure.error);
            println!("{}", reporting::export_json(&report)?);
        }
    }

    if sniff {
        let orchestrator = DorkOrchestrator::new(SearchClient::new(http));
        let sniffer = orchestrator.private_sniffer(username, max_results).await;
        println!("{}", reporting::export_json(&sniffer)?);
    }

    Ok(())
}

async fn run_monitor(http: Arc<HttpClient>, username: &str, previous: u64) -> Result<()> {
    let profile_client = ProfileClient::new(http);
    let delta = profile_client.monitor_followers(username, previous).await;
    println!("{}", reporting::export_json(&delta)?);
    Ok(())
}
