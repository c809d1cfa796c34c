use std::{
    ffi::OsString,
    num::{ParseFloatError, ParseIntError},
};

use error_derive::Error;

use crate::DecimalError;

/// Reasons why the command line could not be evaluated.
///
/// Any of these aborts the whole evaluation, there is no partial result.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvaluationError {
    #[msg = "unknown option {flag}"]
    UnknownOption { flag: String },

    #[msg = "option {flag} requires a value"]
    MissingValue { flag: String },

    #[msg = "invalid value {value:?} for option {flag}: {source}"]
    InvalidValue {
        flag: String,
        value: String,
        source: ValueError,
    },

    #[msg = "option {flag} does not take a value"]
    UnexpectedValue { flag: String },

    #[msg = "command {token:?} is ambiguous, it could be any of {candidates:?}"]
    AmbiguousCommand {
        token: String,
        candidates: Vec<String>,
    },

    #[msg = "option {flag} is ambiguous, it could be any of {candidates:?}"]
    AmbiguousOption {
        flag: String,
        candidates: Vec<String>,
    },

    /// Only the last flag of a cluster like `-abc` may take a value
    #[msg = "option -{flag} requires a value and must be the last flag in {cluster}"]
    InvalidClustering { cluster: String, flag: char },

    #[msg = "argument {argument:?} is not valid unicode"]
    NotUnicode { argument: OsString },
}

impl EvaluationError {
    /// The names that an ambiguous abbreviation could have referred to.
    ///
    /// Empty for errors that are not caused by ambiguity.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::AmbiguousCommand { candidates, .. } | Self::AmbiguousOption { candidates, .. } => {
                candidates
            },
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    #[msg = "missing value"]
    Missing,

    #[msg = "unexpected value"]
    Unexpected,

    #[msg = "not a valid integer"]
    Int(ParseIntError),

    #[msg = "not a valid float"]
    Float(ParseFloatError),

    #[msg = "not a valid decimal"]
    Decimal(DecimalError),
}

/// Mistakes in the definition of a [Command](crate::Command).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[msg = "option {key:?} is defined more than once"]
    DuplicateOption { key: String },

    #[msg = "short flag -{short} is used by both {first:?} and {second:?}"]
    DuplicateShort {
        short: char,
        first: String,
        second: String,
    },

    #[msg = "long flag --{long} is used by both {first:?} and {second:?}"]
    DuplicateLong {
        long: String,
        first: String,
        second: String,
    },

    #[msg = "command {name:?} is defined more than once"]
    DuplicateCommand { name: String },

    #[msg = "option {key:?} has neither a short nor a long flag"]
    Unreachable { key: String },

    #[msg = "option {key:?} has an invalid short flag {short:?}"]
    InvalidShort { key: String, short: char },

    #[msg = "option {key:?} has an invalid long flag {long:?}"]
    InvalidLong { key: String, long: String },

    #[msg = "{name:?} is not a valid command name"]
    InvalidCommandName { name: String },

    #[msg = "the default value of option {key:?} does not match its kind"]
    DefaultMismatch { key: String },
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn named_fields_are_interpolated() {
        let error = EvaluationError::AmbiguousCommand {
            token: "s".to_string(),
            candidates: vec!["stack".to_string(), "stash".to_string()],
        };

        assert_eq!(
            error.to_string(),
            r#"command "s" is ambiguous, it could be any of ["stack", "stash"]"#
        );
        assert_eq!(error.candidates(), ["stack", "stash"]);
    }

    #[test]
    fn invalid_value_reports_source() {
        let source = ValueError::from("x".parse::<i64>().unwrap_err());
        let error = EvaluationError::InvalidValue {
            flag: "--count".to_string(),
            value: "x".to_string(),
            source,
        };

        assert_eq!(
            error.to_string(),
            r#"invalid value "x" for option --count: not a valid integer"#
        );
        assert!(error.source().is_some());
        assert!(error.source().unwrap().source().is_some());
    }

    #[test]
    fn errors_without_source() {
        let error = EvaluationError::UnknownOption {
            flag: "-x".to_string(),
        };
        assert_eq!(error.to_string(), "unknown option -x");
        assert!(error.source().is_none());
        assert!(error.candidates().is_empty());
    }
}
