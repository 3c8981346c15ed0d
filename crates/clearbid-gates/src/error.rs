use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The text to scan was empty or whitespace-only.
    #[error("cannot match patterns against empty text")]
    EmptyText,
}
