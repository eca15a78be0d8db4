use crate::model::AuthorSet;
use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-wrapped")]
#[command(about = "Yearly commit summary for one author in a git repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub args: WrappedArgs,
}

#[derive(Args, Clone, Debug)]
pub struct WrappedArgs {
    #[arg(long, help = "The path to the repository to be analyzed")]
    pub path: PathBuf,

    #[arg(
        long,
        help = "The year for which the wrapped should be generated",
        default_value_t = 2023,
        value_parser = clap::value_parser!(i32).range(1..=9999)
    )]
    pub year: i32,

    #[arg(
        long,
        help = "A comma separated list of emails to identify the author",
        value_parser = parse_authors
    )]
    pub emails: AuthorSet,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

fn parse_authors(input: &str) -> std::result::Result<AuthorSet, String> {
    AuthorSet::parse(input).map_err(|e| e.to_string())
}

impl Cli {
    pub fn try_parse() -> std::result::Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::wrapped::exec(self.args)
    }
}
