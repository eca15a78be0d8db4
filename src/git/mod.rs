pub mod repo;

pub use repo::{ChangeStats, CommitWalk, GitRepo};
