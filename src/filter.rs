use crate::error::Result;
use crate::model::{AuthorSet, Commit, TimeWindow};

/// Who and when a commit must match to count towards the summary.
#[derive(Debug, Clone)]
pub struct Criteria {
    pub authors: AuthorSet,
    pub window: TimeWindow,
}

impl Criteria {
    pub fn new(authors: AuthorSet, window: TimeWindow) -> Self {
        Self { authors, window }
    }

    pub fn matches(&self, commit: &Commit) -> bool {
        self.window.contains(&commit.timestamp) && self.authors.contains(&commit.author_email)
    }
}

/// Keep matching commits in source order. Errors from the source are passed through.
pub fn relevant_commits<'a, I>(
    commits: I,
    criteria: &'a Criteria,
) -> impl Iterator<Item = Result<Commit>> + 'a
where
    I: IntoIterator<Item = Result<Commit>>,
    I::IntoIter: 'a,
{
    commits.into_iter().filter(move |item| match item {
        Ok(commit) => criteria.matches(commit),
        Err(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrappedError;
    use chrono::{FixedOffset, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn commit(hash: &str, email: &str, y: i32, m: u32, d: u32, h: u32) -> Commit {
        let tz = FixedOffset::east_opt(0).unwrap();
        Commit {
            hash: hash.to_string(),
            author_name: "Someone".to_string(),
            author_email: email.to_string(),
            timestamp: tz.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            message: format!("commit {hash}\n"),
        }
    }

    fn criteria() -> Criteria {
        Criteria::new(
            AuthorSet::parse("me@example.com, alt@example.com").unwrap(),
            TimeWindow::for_year(2023, &Utc).unwrap(),
        )
    }

    #[test]
    fn keeps_matching_commits_in_source_order() {
        let source = vec![
            Ok(commit("c", "me@example.com", 2023, 12, 31, 23)),
            Ok(commit("x", "other@example.com", 2023, 6, 1, 12)),
            Ok(commit("b", "alt@example.com", 2023, 6, 1, 12)),
            Ok(commit("y", "me@example.com", 2022, 12, 31, 23)),
            Ok(commit("a", "me@example.com", 2023, 1, 1, 0)),
            Ok(commit("z", "me@example.com", 2024, 1, 1, 0)),
        ];
        let criteria = criteria();

        let hashes: Vec<String> = relevant_commits(source, &criteria)
            .map(|c| c.unwrap().hash)
            .collect();
        assert_eq!(hashes, vec!["c", "b", "a"]);
    }

    #[test]
    fn no_match_is_an_empty_sequence() {
        let source = vec![Ok(commit("x", "other@example.com", 2023, 6, 1, 12))];
        let criteria = criteria();
        assert_eq!(relevant_commits(source, &criteria).count(), 0);
    }

    #[test]
    fn source_errors_reach_the_caller() {
        let source = vec![
            Ok(commit("a", "me@example.com", 2023, 3, 1, 8)),
            Err(WrappedError::Parse("broken object".to_string())),
        ];
        let criteria = criteria();
        let collected: Result<Vec<Commit>> = relevant_commits(source, &criteria).collect();
        assert!(matches!(collected, Err(WrappedError::Parse(_))));
    }
}
