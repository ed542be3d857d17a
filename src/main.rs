//! Commit View - show one commit from a generated report
//!
//! # Usage
//! ```bash
//! commit-view --repo org_repo --author alice 8f2e1c          # Show a commit
//! commit-view --repo org_repo --author alice 8f2e1c --collapse-all
//! commit-view --report-root https://host/report --repo org_repo --author alice 8f2e1c
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commit_view::cache::WorkingSet;
use commit_view::report::{LineKind, fetch_registry};
use commit_view::{
    CommitView, CommitViewer, Config, DisplayOutcome, DisplayRequest, RepoCache,
};

/// Show a commit's metadata and per-file diffs from a generated report
#[derive(Parser)]
#[command(name = "commit-view")]
#[command(about = "Show one commit from a generated report", long_about = None)]
struct Cli {
    /// Commit hash to display
    #[arg(value_name = "HASH")]
    hash: String,

    /// Repository id as listed in the report registry
    #[arg(short, long)]
    repo: String,

    /// Author the commit is shown for
    #[arg(short, long)]
    author: Option<String>,

    /// Report directory or URL (overrides config and environment)
    #[arg(long)]
    report_root: Option<String>,

    /// Number of repositories kept resident
    #[arg(long)]
    capacity: Option<usize>,

    /// Print every hunk line, not only the file list
    #[arg(long, conflicts_with = "collapse_all")]
    expand_all: bool,

    /// Print only the file list
    #[arg(long)]
    collapse_all: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load()?;
    if let Some(root) = cli.report_root {
        config.report_root = root;
    }
    if let Some(capacity) = cli.capacity {
        config.working_set_capacity = capacity;
    }
    config.validate()?;

    let source = config.source()?;
    let registry = fetch_registry(&source, &config.report_root).await?;
    let cache = RepoCache::new(registry, WorkingSet::with_capacity(config.working_set_capacity));
    let viewer = CommitViewer::new(cache.shared(), source, config.report_root.clone());

    let mut view = CommitView::new(DisplayRequest::new(cli.repo, cli.author, cli.hash));
    match viewer.display(&mut view).await? {
        DisplayOutcome::Loaded => {}
        DisplayOutcome::Deactivated => {
            eprintln!("✗ Nothing to show: unknown repository or missing author");
            return Ok(ExitCode::FAILURE);
        }
        DisplayOutcome::Failed(message) => {
            eprintln!("✗ Failed to load commit: {}", message);
            return Ok(ExitCode::FAILURE);
        }
        DisplayOutcome::Stale => return Ok(ExitCode::FAILURE),
    }

    if cli.expand_all {
        view.set_all_expanded(true);
    } else if cli.collapse_all {
        view.set_all_expanded(false);
    }

    print_commit(&view);
    Ok(ExitCode::SUCCESS)
}

fn print_commit(view: &CommitView) {
    let Some(commit) = view.commit() else {
        return;
    };

    println!("commit {}", commit.hash);
    println!("Author: {} ({})", commit.author, view.display_name());
    println!("Date:   {}", commit.date);
    println!();
    println!("    {}", commit.title);
    for line in commit.message.lines() {
        println!("    {}", line);
    }
    println!();

    if let Some(contribution) = view.file_type_contribution() {
        let summary: Vec<String> = contribution
            .iter()
            .map(|(file_type, lines)| format!("{}: {}", file_type, lines))
            .collect();
        println!("  Contribution: {}", summary.join(", "));
        println!();
    }

    println!(
        "  {} files changed, {} insertions(+), {} deletions(-), {} expanded",
        commit.file_count(),
        commit.insertions(),
        commit.deletions(),
        view.active_files_count()
    );

    for (index, diff) in commit.diffs.iter().enumerate() {
        let expanded = view.is_file_expanded(index);
        println!(
            "  {} {}  +{} -{}",
            if expanded { "▾" } else { "▸" },
            diff.file_name,
            diff.insertions(),
            diff.deletions()
        );
        if expanded {
            for line in &diff.hunks {
                let indent = if line.kind == LineKind::HunkHeader { "    " } else { "      " };
                println!("{}{}", indent, line.line);
            }
        }
    }
}
