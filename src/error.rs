use thiserror::Error;

pub type Result<T> = std::result::Result<T, WrappedError>;

#[derive(Error, Debug)]
pub enum WrappedError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("unable to generate a git-wrapped for the provided author, no commits were found!")]
    NoCommits,
    #[error("Failed to compute change statistics for commit {hash}")]
    Stats {
        hash: String,
        #[source]
        source: Box<WrappedError>,
    },
    #[error("Reference error: {0}")]
    References(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("{0}")]
    Open(#[from] Box<gix::open::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] Box<gix::date::parse::Error>),
}

// gix errors are large, keep the enum small by boxing them on the way in
impl From<gix::open::Error> for WrappedError {
    fn from(err: gix::open::Error) -> Self {
        WrappedError::Open(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for WrappedError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        WrappedError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for WrappedError {
    fn from(err: gix::object::commit::Error) -> Self {
        WrappedError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for WrappedError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        WrappedError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for WrappedError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        WrappedError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for WrappedError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        WrappedError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for WrappedError {
    fn from(err: gix::objs::decode::Error) -> Self {
        WrappedError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for WrappedError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        WrappedError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::date::parse::Error> for WrappedError {
    fn from(err: gix::date::parse::Error) -> Self {
        WrappedError::SignatureTime(Box::new(err))
    }
}
