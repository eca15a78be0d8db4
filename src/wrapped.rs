use crate::aggregate::analyze;
use crate::cli::WrappedArgs;
use crate::error::{Result, WrappedError};
use crate::filter::{relevant_commits, Criteria};
use crate::git::GitRepo;
use crate::model::{Commit, TimeWindow};
use crate::report::{render_text, WrappedOutput};
use anyhow::Context;
use console::style;
use tracing::info;

pub fn exec(args: WrappedArgs) -> anyhow::Result<()> {
    let window = TimeWindow::local(args.year).context("Failed to build the year window")?;
    let criteria = Criteria::new(args.emails, window);

    let repo = GitRepo::open(&args.path)?;
    let commits = find_relevant_commits(&repo, &criteria)
        .context("Failed to collect commits from repository")?;
    info!(matched = commits.len(), year = args.year, "filtered commits");

    if commits.is_empty() {
        return Err(WrappedError::NoCommits.into());
    }

    let summary = analyze(&commits, &repo).context("Failed to analyze commits")?;

    if args.json {
        let output = WrappedOutput::new(
            &summary,
            repo.path().to_string_lossy().to_string(),
            args.year,
            &criteria.authors,
        );
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", style(format!("🎁 Git wrapped {}", args.year)).bold());
        println!("{}", "─".repeat(50));
        println!("{}", render_text(&summary));
    }

    Ok(())
}

/// Materialize every commit from `repo` that matches `criteria`.
pub fn find_relevant_commits(repo: &GitRepo, criteria: &Criteria) -> Result<Vec<Commit>> {
    let walk = repo.commits()?;
    relevant_commits(walk, criteria).collect()
}
