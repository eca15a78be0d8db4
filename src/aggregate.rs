use crate::error::{Result, WrappedError};
use crate::git::ChangeStats;
use crate::model::Commit;
use crate::util::{day_of_year, time_of_day_key};
use std::collections::BTreeMap;
use tracing::debug;

/// A commit together with the number of lines it touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSize<'c> {
    pub commit: &'c Commit,
    pub lines_changed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'c> {
    pub total_commits: u64,
    /// Commit made earliest in the day, whatever the date.
    pub earliest: &'c Commit,
    /// Commit made latest in the day, whatever the date.
    pub latest: &'c Commit,
    pub largest: CommitSize<'c>,
    pub smallest: CommitSize<'c>,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub average_additions: u64,
    pub average_deletions: u64,
    pub by_day: BTreeMap<u32, Vec<&'c Commit>>,
}

impl<'c> Summary<'c> {
    /// Day of the year with the most commits. Ties go to the earlier day.
    pub fn busiest_day(&self) -> Option<(u32, &[&'c Commit])> {
        let mut busiest: Option<(u32, &[&'c Commit])> = None;
        for (&day, commits) in &self.by_day {
            match busiest {
                Some((_, best)) if commits.len() <= best.len() => {}
                _ => busiest = Some((day, commits.as_slice())),
            }
        }
        busiest
    }
}

/// Reduce `commits` into a summary in one pass. Fails on empty input and when
/// change statistics for any commit cannot be computed.
pub fn analyze<'c, S>(commits: &'c [Commit], stats: &S) -> Result<Summary<'c>>
where
    S: ChangeStats + ?Sized,
{
    let first = commits.first().ok_or(WrappedError::NoCommits)?;

    let mut earliest = first;
    let mut latest = first;
    let mut earliest_key = time_of_day_key(&first.timestamp);
    let mut latest_key = earliest_key;
    let mut largest: Option<CommitSize<'c>> = None;
    let mut smallest: Option<CommitSize<'c>> = None;
    let mut total_additions = 0u64;
    let mut total_deletions = 0u64;
    let mut by_day: BTreeMap<u32, Vec<&'c Commit>> = BTreeMap::new();

    for commit in commits {
        let key = time_of_day_key(&commit.timestamp);
        if key < earliest_key {
            earliest_key = key;
            earliest = commit;
        }
        if key > latest_key {
            latest_key = key;
            latest = commit;
        }

        let files = stats
            .file_stats(commit)
            .map_err(|source| WrappedError::Stats {
                hash: commit.hash.clone(),
                source: Box::new(source),
            })?;

        let (added, deleted) = files.iter().fold((0u64, 0u64), |(a, d), f| {
            (a + f.added_lines as u64, d + f.deleted_lines as u64)
        });
        total_additions += added;
        total_deletions += deleted;

        let current = CommitSize {
            commit,
            lines_changed: added + deleted,
        };
        if largest.map_or(true, |l| current.lines_changed > l.lines_changed) {
            largest = Some(current);
        }
        if smallest.map_or(true, |s| current.lines_changed < s.lines_changed) {
            smallest = Some(current);
        }

        by_day
            .entry(day_of_year(&commit.timestamp))
            .or_default()
            .push(commit);
    }

    let count = commits.len() as u64;
    let fallback = CommitSize {
        commit: first,
        lines_changed: 0,
    };
    let summary = Summary {
        total_commits: count,
        earliest,
        latest,
        largest: largest.unwrap_or(fallback),
        smallest: smallest.unwrap_or(fallback),
        total_additions,
        total_deletions,
        average_additions: total_additions / count,
        average_deletions: total_deletions / count,
        by_day,
    };

    debug!(
        commits = summary.total_commits,
        additions = summary.total_additions,
        deletions = summary.total_deletions,
        days = summary.by_day.len(),
        "aggregated commits"
    );
    Ok(summary)
}
