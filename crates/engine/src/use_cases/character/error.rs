//! Character service errors.

use charsmith_domain::{CharacterId, DomainError};

use crate::infrastructure::export::ExportError;
use crate::infrastructure::ports::RepoError;

/// Errors that stop a character command before anything is published.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
