// ABOUTME: Error taxonomy for record store operations.
// ABOUTME: Validation failures carry a specific subkind; lookups, sorts, and queries have their own variants.

use std::fmt;

use thiserror::Error;

/// Why an `add` was rejected. Every check runs before the store is touched,
/// so a rejected add never leaves a partial record behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the scores list must contain {expected} scores, got {found}")]
    WrongScoreCount { expected: usize, found: usize },

    #[error("{field} is {len} characters long, limit is {limit}")]
    FieldTooLong {
        field: Field,
        len: usize,
        limit: usize,
    },

    #[error("score {score} is longer than {limit} digits")]
    ScoreTooLong { score: i32, limit: usize },

    #[error("a student with the name {0} already exists")]
    DuplicateName(String),

    #[error("a student with the ID {0} already exists")]
    DuplicateId(i64),
}

/// The length-limited fields of a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Id,
    Department,
    Major,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Id => write!(f, "ID"),
            Field::Department => write!(f, "department"),
            Field::Major => write!(f, "major"),
        }
    }
}

/// The key a record was looked up by, kept for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Name(String),
    Id(i64),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Name(name) => write!(f, "name {}", name),
            RecordKey::Id(id) => write!(f, "ID {}", id),
        }
    }
}

/// Errors returned by `RecordStore` operations. None of them are fatal;
/// the store is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("student with {0} not found")]
    NotFound(RecordKey),

    #[error("invalid course index {0}, expected 1 to 5")]
    InvalidIndex(usize),

    #[error("invalid student reference")]
    InvalidReference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_key() {
        let by_name = StoreError::NotFound(RecordKey::Name("Bob".to_string()));
        let by_id = StoreError::NotFound(RecordKey::Id(42));

        assert_eq!(by_name.to_string(), "student with name Bob not found");
        assert_eq!(by_id.to_string(), "student with ID 42 not found");
    }

    #[test]
    fn validation_error_converts_into_store_error() {
        let err: StoreError = ValidationError::DuplicateId(7).into();
        assert_eq!(
            err,
            StoreError::Validation(ValidationError::DuplicateId(7))
        );
        assert_eq!(err.to_string(), "a student with the ID 7 already exists");
    }

    #[test]
    fn field_too_long_message_includes_limit() {
        let err = ValidationError::FieldTooLong {
            field: Field::Department,
            len: 12,
            limit: 11,
        };
        assert_eq!(
            err.to_string(),
            "department is 12 characters long, limit is 11"
        );
    }
}
