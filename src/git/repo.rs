use crate::error::{Result, WrappedError};
use crate::model::{Commit, FileStats};
use chrono::{DateTime, FixedOffset};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-file line statistics for a commit, computed on demand.
pub trait ChangeStats {
    fn file_stats(&self, commit: &Commit) -> Result<Vec<FileStats>>;
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`. Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walk every commit reachable from `HEAD` or any reference. An empty
    /// repository yields nothing.
    pub fn commits(&self) -> Result<CommitWalk<'_>> {
        let mut tips = self.reference_tips()?;
        let mut head = self.repo.head()?;
        if !head.is_unborn() {
            // last in, first walked
            tips.push(head.peel_to_commit_in_place()?.id);
        }
        debug!(tips = tips.len(), "seeded commit walk");

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message("Walking commits...");

        Ok(CommitWalk {
            repo: &self.repo,
            seen: HashSet::new(),
            stack: tips,
            progress,
        })
    }

    fn reference_tips(&self) -> Result<Vec<ObjectId>> {
        let platform = self.repo.references().map_err(reference_error)?;
        let mut tips = Vec::new();
        for reference in platform.all().map_err(reference_error)? {
            let mut reference = reference.map_err(reference_error)?;
            let id = reference.peel_to_id_in_place().map_err(reference_error)?.detach();
            // tags may point at trees or blobs
            if self.repo.find_object(id)?.kind == gix::object::Kind::Commit {
                tips.push(id);
            }
        }
        Ok(tips)
    }

    fn compute_file_stats(&self, commit_id: ObjectId) -> Result<Vec<FileStats>> {
        let commit = self.repo.find_commit(commit_id)?;
        let commit_tree = commit.tree()?;
        let first_parent: Option<ObjectId> = commit.parent_ids().next().map(|id| id.into());
        let options = diff_options();

        let changes: Vec<ChangeDetached> = match first_parent {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), options)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), options)?,
        };

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        Ok(files)
    }

    /// Only blobs carry lines. Trees and submodule commits are skipped.
    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileStats>) -> Result<()> {
        match change {
            ChangeDetached::Addition {
                id,
                location,
                entry_mode,
                ..
            } => {
                if entry_mode.is_blob() {
                    files.push(self.whole_file(location.to_string(), id, true)?);
                }
            }
            ChangeDetached::Deletion {
                id,
                location,
                entry_mode,
                ..
            } => {
                if entry_mode.is_blob() {
                    files.push(self.whole_file(location.to_string(), id, false)?);
                }
            }
            ChangeDetached::Modification {
                previous_entry_mode,
                previous_id,
                entry_mode,
                id,
                location,
                ..
            } => match (previous_entry_mode.is_blob(), entry_mode.is_blob()) {
                (true, true) => {
                    let old_obj = self.repo.find_object(previous_id)?;
                    let new_obj = self.repo.find_object(id)?;
                    let is_binary = is_binary(&old_obj.data) || is_binary(&new_obj.data);
                    let (added, deleted) = if is_binary {
                        (0, 0)
                    } else {
                        line_diff(&old_obj.data, &new_obj.data)
                    };
                    files.push(FileStats {
                        path: location.to_string(),
                        added_lines: added,
                        deleted_lines: deleted,
                        is_binary,
                    });
                }
                (true, false) => files.push(self.whole_file(location.to_string(), previous_id, false)?),
                (false, true) => files.push(self.whole_file(location.to_string(), id, true)?),
                (false, false) => {}
            },
            // rewrite tracking is off, count one like a deletion plus an addition
            ChangeDetached::Rewrite {
                source_location,
                source_entry_mode,
                source_id,
                entry_mode,
                id,
                location,
                copy,
                ..
            } => {
                if !copy && source_entry_mode.is_blob() {
                    files.push(self.whole_file(source_location.to_string(), source_id, false)?);
                }
                if entry_mode.is_blob() {
                    files.push(self.whole_file(location.to_string(), id, true)?);
                }
            }
        }
        Ok(())
    }

    /// Stats for a blob that was added (`added`) or deleted as a whole.
    fn whole_file(&self, path: String, id: ObjectId, added: bool) -> Result<FileStats> {
        let obj = self.repo.find_object(id)?;
        let is_binary = is_binary(&obj.data);
        let lines = if is_binary { 0 } else { count_lines(&obj.data) };
        Ok(FileStats {
            path,
            added_lines: if added { lines } else { 0 },
            deleted_lines: if added { 0 } else { lines },
            is_binary,
        })
    }
}

impl ChangeStats for GitRepo {
    fn file_stats(&self, commit: &Commit) -> Result<Vec<FileStats>> {
        let oid = ObjectId::from_hex(commit.hash.as_bytes())
            .map_err(|e| WrappedError::Parse(format!("Invalid commit ID {}: {e}", commit.hash)))?;
        self.compute_file_stats(oid)
    }
}

/// Lazy depth-first walk over commit history. The progress spinner is cleared
/// when the walk is dropped, however iteration ended.
pub struct CommitWalk<'repo> {
    repo: &'repo Repository,
    seen: HashSet<ObjectId>,
    stack: Vec<ObjectId>,
    progress: ProgressBar,
}

impl CommitWalk<'_> {
    fn load(&mut self, commit_id: ObjectId) -> Result<Commit> {
        let repo = self.repo;
        let commit = repo.find_commit(commit_id)?;
        self.stack.extend(commit.parent_ids().map(|id| -> ObjectId { id.into() }));

        let author = commit.author()?;
        let timestamp = to_datetime(author.time()?)?;
        let message = String::from_utf8_lossy(commit.message_raw()?).into_owned();

        Ok(Commit {
            hash: commit_id.to_string(),
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            timestamp,
            message,
        })
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            self.progress.inc(1);
            return Some(self.load(commit_id));
        }
        None
    }
}

impl Drop for CommitWalk<'_> {
    fn drop(&mut self) {
        debug!(visited = self.seen.len(), "commit walk finished");
        self.progress.finish_and_clear();
    }
}

fn to_datetime(time: gix::date::Time) -> Result<DateTime<FixedOffset>> {
    offset_datetime(time.seconds, time.offset)
}

fn offset_datetime(seconds: i64, offset_secs: i32) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| WrappedError::InvalidDate(format!("Invalid UTC offset: {offset_secs}")))?;
    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| WrappedError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}

/// Plain tree diff with paths. Rename and copy detection stay off whatever
/// `diff.renames` says, so a rename counts as a full delete plus add.
fn diff_options() -> gix::diff::Options {
    let mut options = gix::diff::Options::default();
    options.track_path().with_rewrites(None);
    options
}

fn reference_error(err: impl std::fmt::Display) -> WrappedError {
    WrappedError::References(err.to_string())
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(8192).any(|&b| b == 0)
}

fn count_lines(data: &[u8]) -> u32 {
    String::from_utf8_lossy(data).lines().count() as u32
}

fn line_diff(old: &[u8], new: &[u8]) -> (u32, u32) {
    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());

    let mut added = 0u32;
    let mut deleted = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_diff_counts_replaced_lines_on_both_sides() {
        let (added, deleted) = line_diff(b"a\nb\nc\n", b"a\nB\nc\nd\n");
        assert_eq!((added, deleted), (2, 1));
    }

    #[test]
    fn binary_detection_looks_for_nul() {
        assert!(is_binary(b"PNG\0\x01"));
        assert!(!is_binary(b"plain text\n"));
        assert_eq!(count_lines(b"one\ntwo\nthree"), 3);
    }

    #[test]
    fn non_utf8_text_still_counts_lines() {
        assert_eq!(count_lines(b"caf\xe9\nthird\n"), 2);
        assert_eq!(line_diff(b"", b"caf\xe9\nthird\n"), (2, 0));
    }

    #[test]
    fn author_time_keeps_its_offset() {
        let ts = offset_datetime(1_672_560_000, 3600).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3600);
        assert_eq!(ts.timestamp(), 1_672_560_000);
        assert!(offset_datetime(0, 86_400).is_err());
    }
}
