//! # rescache
//!
//! Inspect and maintain resolver cache images: load a binary image, peek at
//! it interactively, dump it as text, or create one from the built-in root
//! hints.

mod bootstrap;
mod shell;

use anyhow::Context;
use bootstrap::{init_logging, load_config};
use clap::Parser;
use rescache_domain::CliOverrides;
use rescache_store::hints::install_root_hints;
use rescache_store::{stats, Cache};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

#[derive(Parser)]
#[command(name = "rescache")]
#[command(version)]
#[command(about = "Resolver cache image inspector")]
struct Cli {
    /// Cache image file
    cache_db: PathBuf,

    /// Write a text dump of the cache content to this file
    #[arg(short = 'f', long)]
    dump_file: Option<PathBuf>,

    /// Interactive mode to peek into the cache content
    #[arg(short, long, default_value_t = false)]
    interactive: bool,

    /// Create the image from the built-in root hints instead of loading it
    #[arg(long, default_value_t = false)]
    bootstrap: bool,

    /// Print cache statistics after loading
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        shell_class: None,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    let mut cache = Cache::new();
    if cli.bootstrap {
        install_root_hints(&mut cache)?;
        cache.dump(&cli.cache_db)?;
    } else {
        print!("Loading cache...");
        io::stdout().flush()?;
        cache.load(&cli.cache_db)?;
        println!("done");
    }

    if cli.stats {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        stats::write_trust_summary(&cache, &mut out, false)?;
        stats::write_ttl_histograms(&cache, &mut out, false)?;
    }

    if cli.interactive {
        let class = hickory_proto::rr::DNSClass::from_str(&config.shell.class)
            .with_context(|| format!("invalid shell class '{}'", config.shell.class))?;
        shell::run(&cache, class)?;
    }

    if let Some(dump_file) = cli.dump_file.as_deref() {
        cache.dump_text(dump_file)?;
        info!(path = %dump_file.display(), "Text dump written");
    }

    Ok(())
}
