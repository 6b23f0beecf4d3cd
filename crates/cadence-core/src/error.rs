use thiserror::Error;

/// Failure to read a repeat rule. Messages are shown to end users verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported repeat format: '{0}'")]
    UnsupportedFormat(String),

    #[error("repeat rule '{0}' requires an argument")]
    MissingArgument(&'static str),

    #[error("unexpected argument '{0}' in repeat rule")]
    UnexpectedArgument(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("{kind} '{value}' is out of range ({allowed})")]
    OutOfRange {
        kind: &'static str,
        value: i64,
        allowed: &'static str,
    },

    #[error("empty element in list '{0}'")]
    EmptyElement(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid date '{0}': expected DD.MM.YYYY")]
    InvalidDate(String),

    #[error("invalid repeat rule: {0}")]
    Validation(String),

    #[error("repeat rule '{rule}' has no occurrence within {horizon_years} years")]
    Unsatisfiable { rule: String, horizon_years: u32 },
}
