use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::IndentationError { .. } => "IndentationError",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
            ErrorImpl::TypeError { .. } => "TypeError",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::ArityError { .. } => "ArityError",
            ErrorImpl::UnsupportedCall { .. } => "UnsupportedCall",
        }
    }

    /// Whether the error was raised by the front end (tokenizer or parser).
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::UnexpectedTokenDetailed { .. }
                | ErrorImpl::NumberParseError { .. }
                | ErrorImpl::IndentationError { .. }
        )
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::IndentationError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::UnsupportedConstruct { construct, reason } => ErrorTip::Suggestion(
                format!("`{}` is not supported: {}", construct, reason),
            ),
            ErrorImpl::TypeError {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Cannot apply `{}` to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::UnsupportedOperation {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` is not supported between `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::ArityError {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} argument(s), received {}",
                function, expected, received
            )),
            ErrorImpl::UnsupportedCall { function } => {
                ErrorTip::Suggestion(format!("Call to `{}` is not supported", function))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get_tip() {
            ErrorTip::None => write!(f, "{}: {}", self.get_error_name(), self.internal_error),
            tip => write!(f, "{} ({})", self.get_error_name(), tip),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("indentation error: {message}")]
    IndentationError { message: String },
    #[error("unsupported construct {construct}: {reason}")]
    UnsupportedConstruct { construct: String, reason: String },
    #[error("cannot apply {operator} to {left} and {right}")]
    TypeError {
        operator: String,
        left: String,
        right: String,
    },
    #[error("unsupported operation {operator} between {left} and {right}")]
    UnsupportedOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("{function} expects {expected} argument(s), received {received}")]
    ArityError {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("unsupported call to {function}")]
    UnsupportedCall { function: String },
}
