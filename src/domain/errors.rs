#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    Storage(String),
    Serialization(String),
    InvalidChoice { field: String, value: String },
    NotAtFinalStep,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Storage(msg) => {
                write!(f, "Storage error: {}", msg)
            }
            DomainError::Serialization(msg) => {
                write!(f, "Serialization failed: {}", msg)
            }
            DomainError::InvalidChoice { field, value } => {
                write!(f, "Invalid choice '{}' for {}", value, field)
            }
            DomainError::NotAtFinalStep => {
                write!(f, "Application can only be submitted from the last step")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
