pub mod aggregate;
pub mod cli;
pub mod error;
pub mod filter;
pub mod git;
pub mod model;
pub mod report;
pub mod util;
pub mod wrapped;
