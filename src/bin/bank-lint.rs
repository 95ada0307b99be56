//! Validate a question bank file and print a per-category summary.

use std::{env, path::PathBuf};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trivia_back::{bank::QuestionBank, config::AppConfig, dto::catalog::BankOverview};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| AppConfig::load().bank_path);
    info!(path = %path.display(), "validating question bank");

    let bank = QuestionBank::load(&path)
        .with_context(|| format!("question bank at `{}` failed validation", path.display()))?;
    let overview = BankOverview::from(&bank);

    if overview.categories.is_empty() {
        warn!("the bank is valid but holds no categories");
    }

    println!(
        "{}: {} categories, {} questions",
        path.display(),
        overview.categories.len(),
        overview.total_questions
    );
    for category in &overview.categories {
        println!("  {}", category.label());
    }

    Ok(())
}

/// Configure tracing subscribers so validation output and logs share stderr.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
