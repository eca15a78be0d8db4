use crate::aggregate::{CommitSize, Summary};
use crate::model::{AuthorSet, Commit, SCHEMA_VERSION};
use crate::util::format_timestamp;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::fmt::Write;

pub fn render_text(summary: &Summary<'_>) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "🧮 Total commit count: {}", summary.total_commits);
    let _ = writeln!(out, "🌅 Earliest commit{}", describe(summary.earliest));
    let _ = writeln!(out, "🌃 Latest commit{}", describe(summary.latest));
    let _ = writeln!(out, "🟢 Average addition count: {}", summary.average_additions);
    let _ = writeln!(out, "🔴 Average deletion count: {}", summary.average_deletions);
    let _ = writeln!(
        out,
        "🐘 Largest commit{} ({} lines changed)",
        describe(summary.largest.commit),
        summary.largest.lines_changed
    );
    let _ = writeln!(
        out,
        "🐜 Smallest commit{} ({} lines changed)",
        describe(summary.smallest.commit),
        summary.smallest.lines_changed
    );
    if let Some((_, commits)) = summary.busiest_day() {
        if let Some(first) = commits.first() {
            let _ = writeln!(
                out,
                "🏔️ Most commits per day({}): {}",
                format_timestamp(&first.timestamp),
                commits.len()
            );
        }
    }

    out
}

fn describe(commit: &Commit) -> String {
    format!(
        "({}): {} -- {}",
        format_timestamp(&commit.timestamp),
        commit.hash,
        commit.message.trim()
    )
}

#[derive(Debug, Serialize)]
pub struct CommitEntry<'c> {
    pub hash: &'c str,
    pub author_email: &'c str,
    pub timestamp: DateTime<FixedOffset>,
    pub message: &'c str,
}

impl<'c> From<&'c Commit> for CommitEntry<'c> {
    fn from(commit: &'c Commit) -> Self {
        Self {
            hash: &commit.hash,
            author_email: &commit.author_email,
            timestamp: commit.timestamp,
            message: commit.message.trim(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SizedEntry<'c> {
    #[serde(flatten)]
    pub commit: CommitEntry<'c>,
    pub lines_changed: u64,
}

impl<'c> From<CommitSize<'c>> for SizedEntry<'c> {
    fn from(size: CommitSize<'c>) -> Self {
        Self {
            commit: size.commit.into(),
            lines_changed: size.lines_changed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusiestDay<'c> {
    pub day_of_year: u32,
    pub first_commit: CommitEntry<'c>,
    pub commit_count: usize,
}

#[derive(Debug, Serialize)]
pub struct WrappedOutput<'c> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub year: i32,
    pub authors: Vec<&'c str>,
    pub total_commits: u64,
    pub earliest: CommitEntry<'c>,
    pub latest: CommitEntry<'c>,
    pub largest: SizedEntry<'c>,
    pub smallest: SizedEntry<'c>,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub average_additions: u64,
    pub average_deletions: u64,
    pub busiest_day: Option<BusiestDay<'c>>,
}

impl<'c> WrappedOutput<'c> {
    pub fn new(
        summary: &Summary<'c>,
        repository_path: String,
        year: i32,
        authors: &'c AuthorSet,
    ) -> Self {
        let busiest_day = summary.busiest_day().and_then(|(day, commits)| {
            commits.first().map(|&first| BusiestDay {
                day_of_year: day,
                first_commit: first.into(),
                commit_count: commits.len(),
            })
        });

        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository_path,
            year,
            authors: authors.iter().collect(),
            total_commits: summary.total_commits,
            earliest: summary.earliest.into(),
            latest: summary.latest.into(),
            largest: summary.largest.into(),
            smallest: summary.smallest.into(),
            total_additions: summary.total_additions,
            total_deletions: summary.total_deletions,
            average_additions: summary.average_additions,
            average_deletions: summary.average_deletions,
            busiest_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn commit(hash: &str, h: u32, message: &str) -> Commit {
        let tz = FixedOffset::east_opt(0).unwrap();
        Commit {
            hash: hash.to_string(),
            author_name: "Me".to_string(),
            author_email: "me@example.com".to_string(),
            timestamp: tz.with_ymd_and_hms(2023, 3, 4, h, 0, 0).unwrap(),
            message: message.to_string(),
        }
    }

    fn summary<'c>(early: &'c Commit, late: &'c Commit) -> Summary<'c> {
        let mut by_day = BTreeMap::new();
        by_day.insert(63, vec![early, late]);
        Summary {
            total_commits: 2,
            earliest: early,
            latest: late,
            largest: CommitSize { commit: late, lines_changed: 12 },
            smallest: CommitSize { commit: early, lines_changed: 3 },
            total_additions: 11,
            total_deletions: 4,
            average_additions: 5,
            average_deletions: 2,
            by_day,
        }
    }

    #[test]
    fn text_report_lists_every_statistic() {
        let early = commit("aaa111", 7, "\n  Fix the build  \n");
        let late = commit("bbb222", 22, "Add feature\n\nLong body\n");
        let text = render_text(&summary(&early, &late));

        let expected = "\
🧮 Total commit count: 2
🌅 Earliest commit(2023-03-04 07:00:00 +00:00): aaa111 -- Fix the build
🌃 Latest commit(2023-03-04 22:00:00 +00:00): bbb222 -- Add feature

Long body
🟢 Average addition count: 5
🔴 Average deletion count: 2
🐘 Largest commit(2023-03-04 22:00:00 +00:00): bbb222 -- Add feature

Long body (12 lines changed)
🐜 Smallest commit(2023-03-04 07:00:00 +00:00): aaa111 -- Fix the build (3 lines changed)
🏔️ Most commits per day(2023-03-04 07:00:00 +00:00): 2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn busiest_day_line_needs_a_bucket() {
        let early = commit("aaa111", 7, "one");
        let late = commit("bbb222", 22, "two");
        let mut summary = summary(&early, &late);
        summary.by_day.clear();

        let text = render_text(&summary);
        assert!(!text.contains("Most commits per day"));
    }

    #[test]
    fn json_output_carries_the_summary() {
        let early = commit("aaa111", 7, " one ");
        let late = commit("bbb222", 22, "two");
        let summary = summary(&early, &late);
        let authors = AuthorSet::parse("me@example.com").unwrap();

        let output = WrappedOutput::new(&summary, "/tmp/repo".to_string(), 2023, &authors);
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["total_commits"], 2);
        assert_eq!(value["earliest"]["hash"], "aaa111");
        assert_eq!(value["earliest"]["message"], "one");
        assert_eq!(value["largest"]["lines_changed"], 12);
        assert_eq!(value["largest"]["hash"], "bbb222");
        assert_eq!(value["busiest_day"]["day_of_year"], 63);
        assert_eq!(value["busiest_day"]["commit_count"], 2);
        assert_eq!(value["authors"][0], "me@example.com");
    }
}
