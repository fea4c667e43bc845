mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::refresh::{self, RefreshCommandArgs};
use crate::config::{AppConfig, UpdateSettings};
use crate::context::AppContext;
use crate::domain::target::Variant;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "recent-changes",
    author,
    version,
    about = "Keep a recently-changed-files table in every README from GitHub history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the fragment in every README.md.
    Readme(UpdateArgs),
    /// Refresh README.md and index.md pages of a Jekyll site.
    Jekyll(JekyllArgs),
    /// Show the configuration a run would use.
    Config(RootArgs),
}

#[derive(Args)]
struct RootArgs {
    /// Repository checkout to update. Defaults to the current directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Args)]
struct UpdateArgs {
    #[command(flatten)]
    root: RootArgs,
    /// Override how many files are listed per directory.
    #[arg(long)]
    max_files: Option<usize>,
    /// Override how many recent commits are read from GitHub.
    #[arg(long = "commits", value_name = "N")]
    commit_limit: Option<usize>,
}

#[derive(Args)]
struct JekyllArgs {
    #[command(flatten)]
    update: UpdateArgs,
    /// Do not create index.md pages in content directories that lack one.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            let config = AppConfig::load(&workspace_root(args.root)?)?;
            cmd::config::run(&config)
        }
        Commands::Readme(args) => run_update(Variant::Readme, args, false).await,
        Commands::Jekyll(args) => run_update(Variant::Jekyll, args.update, args.no_seed).await,
    }
}

async fn run_update(
    variant: Variant,
    args: UpdateArgs,
    no_seed: bool,
) -> AppResult<()> {
    let config = AppConfig::load(&workspace_root(args.root.root)?)?;

    let mut settings = UpdateSettings::for_variant(variant);
    RefreshCommandArgs {
        max_files: args.max_files,
        commit_limit: args.commit_limit,
        no_seed,
    }
    .apply(&mut settings);

    let token = config.require_token()?;
    let repository = config.require_repository()?;
    let commit_history = Arc::new(GitHubClient::new(&config.api_base_url, token, repository));

    let context = AppContext::new(config, settings, commit_history);
    let outcome = refresh::run(&context).await?;

    for update in &outcome.updates {
        let note = if update.created { ", created" } else { "" };
        println!("  {} ({} change(s){note})", update.path, update.listed);
    }

    let created = outcome.updates.iter().filter(|update| update.created).count();
    println!(
        "Updated {} {} file(s) ({} created, {} index page(s) seeded) from {} tracked file(s).",
        outcome.updates.len(),
        variant.as_str(),
        created,
        outcome.seeded.len(),
        outcome.tracked_files
    );

    Ok(())
}

fn workspace_root(root: Option<PathBuf>) -> AppResult<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => Ok(std::env::current_dir()?),
    }
}
