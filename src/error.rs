use std::num::ParseIntError;

use thiserror::Error;

/// Represents errors that can occur while generating or parsing identifiers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdGenError {
    /// A raw value cannot be converted to the field's integer representation
    #[error("field {field} cannot encode {value:?}: {reason}")]
    Encode {
        field: String,
        value: String,
        reason: String,
    },
    /// A decoded integer falls outside the field's valid range
    #[error("field {field} number {number} is out of range: {reason}")]
    Range {
        field: String,
        number: u64,
        reason: String,
    },
    /// A field's integer exceeds its bit mask during composition
    #[error("field {field} number {number} is out of its bits range ({bits} bits, 0 ~ {mask})")]
    Assemble {
        field: String,
        number: u64,
        bits: u8,
        mask: u64,
    },
    /// Disassembly left set bits above the declared layout
    #[error("the highest unused part is not 0, but {remainder}")]
    MalformedId { remainder: u64 },
    /// The supplied identifier is not a well-formed integer
    #[error("identifier {input:?} is not a valid integer: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseIntError,
    },
    /// The number of parts does not match the number of fields
    #[error("the number of parts ({actual}) must be the same with fields ({expected})")]
    PartCount { expected: usize, actual: usize },
    /// A sequence key names a field missing from the generation context
    #[error("field {field} needs {key} in context, but it has not been generated")]
    MissingContext { field: String, key: String },
    /// The counter store failed to read or write
    #[error("counter store error: {0}")]
    Store(String),
}

pub type Result<T, E = IdGenError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let assemble = IdGenError::Assemble {
            field: "sequence".to_string(),
            number: 70000,
            bits: 16,
            mask: 65535,
        };
        assert_eq!(
            assemble.to_string(),
            "field sequence number 70000 is out of its bits range (16 bits, 0 ~ 65535)"
        );

        let malformed = IdGenError::MalformedId { remainder: 3 };
        assert_eq!(
            malformed.to_string(),
            "the highest unused part is not 0, but 3"
        );
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = "abc".parse::<u64>().unwrap_err();
        let err = IdGenError::Parse {
            input: "abc".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("identifier \"abc\" is not a valid integer"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_clone() {
        let original = IdGenError::Range {
            field: "placeholder".to_string(),
            number: 0,
            reason: "expected 1 ~ 1".to_string(),
        };
        assert_eq!(original.clone(), original);
    }
}
