use thiserror::Error;

/// Failures an engine operation can report.
///
/// Operations never partially commit: on any error the model the caller
/// passed in is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("feature {0} does not exist in this model")]
    FeatureNotFound(u64),

    #[error("business model {0} does not exist in this model")]
    BusinessModelNotFound(u64),

    #[error("the dependency edge already exists")]
    DuplicateDependency,

    #[error("the dependency edge does not exist")]
    DependencyNotFound,

    #[error("{0}")]
    InvalidArgument(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
