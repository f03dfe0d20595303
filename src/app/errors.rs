#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("already bookmarked")]
    AlreadyBookmarked,

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}
