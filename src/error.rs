//! Error types for metadata loading, lookups and computed inputs

use std::fmt;

use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DmmfError>;

/// Collection a failed lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Model,
    Enum,
    InputType,
    OutputType,
    Mapping,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Model => "model",
            LookupKind::Enum => "enum",
            LookupKind::InputType => "input type",
            LookupKind::OutputType => "output type",
            LookupKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// Metadata document errors
#[derive(Error, Debug)]
pub enum DmmfError {
    #[error("Could not load metadata document from {reference}: {reason}")]
    Load { reference: String, reason: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: LookupKind, name: String },

    #[error("Field {field} is not declared on input type {input_type}")]
    UnknownField { input_type: String, field: String },

    #[error("Invalid mutation arguments: {0}")]
    InvalidArgs(String),
}

impl DmmfError {
    pub(crate) fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        DmmfError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether this error is a lookup fault (missing name or field)
    pub fn is_lookup_fault(&self) -> bool {
        matches!(self, DmmfError::NotFound { .. } | DmmfError::UnknownField { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_collection() {
        let err = DmmfError::not_found(LookupKind::InputType, "UserCreateInput");
        assert_eq!(err.to_string(), "input type not found: UserCreateInput");
        assert!(err.is_lookup_fault());
    }

    #[test]
    fn test_load_error_is_not_lookup_fault() {
        let err = DmmfError::Load {
            reference: "./client".to_string(),
            reason: "missing".to_string(),
        };
        assert!(!err.is_lookup_fault());
    }
}
