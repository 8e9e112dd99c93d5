use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use quillpress_config::SiteConfig;
use quillpress_engine::{Post, io};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quillpress", author, version, about = "Static blogging engine")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and build information
    Version,
    /// Parse every post source under the content directory and report problems
    Check {
        /// Content directory holding .md post sources
        dir: Option<PathBuf>,
    },
    /// List posts, newest first
    List {
        /// Content directory holding .md post sources
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Version => print_version(),
        Commands::Check { dir } => check(dir)?,
        Commands::List { dir } => list(dir)?,
    }
    Ok(())
}

fn print_version() {
    println!("quillpress version:\t{}", env!("CARGO_PKG_VERSION"));
    if let Some(commit) = option_env!("QUILLPRESS_COMMIT") {
        println!("commit:\t{commit}");
    }
    println!("os/arch:\t{}/{}", env::consts::OS, env::consts::ARCH);
}

/// Resolves the content directory: explicit flag first, then the site config,
/// then the conventional `posts/` directory.
fn resolve_content_dir(dir: Option<PathBuf>, config: Option<&SiteConfig>) -> PathBuf {
    dir.or_else(|| config.map(|c| c.content_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("posts"))
}

fn check(dir: Option<PathBuf>) -> Result<()> {
    let config = SiteConfig::load_from_dir(Path::new("."))?;
    let content_dir = resolve_content_dir(dir, config.as_ref());
    let files = io::scan_post_files(&content_dir)?;

    let mut failed = 0usize;
    for path in &files {
        match Post::from_file(path) {
            Ok(post) => println!("ok    {}  ({})", path.display(), post.permalink()),
            Err(err) => {
                failed += 1;
                println!("fail  {}  {err}", path.display());
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} post sources failed to parse", files.len());
    }
    println!("{} post sources ok", files.len());
    Ok(())
}

fn list(dir: Option<PathBuf>) -> Result<()> {
    let config = SiteConfig::load_from_dir(Path::new("."))?;
    let content_dir = resolve_content_dir(dir, config.as_ref());
    debug!(dir = %content_dir.display(), "listing posts");

    let mut posts = io::load_posts(&content_dir)?;
    if let Some(config) = &config {
        if !config.base_path.is_empty() && config.base_path != "/" {
            for post in &mut posts {
                post.prefix_paths(&config.base_path);
            }
        }
    }
    for post in &posts {
        println!("{}  {}  {}", post.date(), post.permalink(), post.title());
    }
    Ok(())
}
