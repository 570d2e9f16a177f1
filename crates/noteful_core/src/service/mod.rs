//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before any repository call.
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP layers decoupled from storage details.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - "Not found" is an explicit `None`/`false` result, not an error.

use crate::db::DbError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod named_service;
pub mod note_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error taxonomy shared by notes, folders and tags.
///
/// `Display` renders the client-facing message for the validation variants.
#[derive(Debug)]
pub enum ServiceError {
    /// A supplied identifier is malformed.
    InvalidIdentifier { field: &'static str },
    /// A required field is absent or empty.
    MissingRequiredField { field: &'static str },
    /// A unique field already holds this value.
    DuplicateKey { field: &'static str },
    /// Any other persistence failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { field: "tags" } => {
                write!(f, "The `tags` array contains an invalid `id`")
            }
            Self::InvalidIdentifier { field } => write!(f, "The `{field}` is not valid"),
            Self::MissingRequiredField { field } => {
                write!(f, "Missing `{field}` in request body")
            }
            Self::DuplicateKey { field } => write!(f, "The `{field}` already exists"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Duplicate { field } => Self::DuplicateKey { field },
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
