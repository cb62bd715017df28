//! Reflex runtime errors

use thiserror::Error;

/// Errors raised by reflective operations
///
/// These are unrecoverable-at-the-call-site conditions; lookup operations
/// return `Option`/empty results instead of erroring.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectError {
    /// An operation required an instance and got null
    #[error("{message}")]
    NullReference {
        /// Failure description
        message: String,
    },

    /// A required argument was missing
    #[error("Value cannot be null.\nParameter name: {param}")]
    ArgumentNull {
        /// Name of the missing parameter
        param: String,
    },

    /// An argument was outside its valid range
    #[error("Value is out of range.\nParameter name: {param}")]
    ArgumentOutOfRange {
        /// Name of the offending parameter
        param: String,
    },

    /// A type coercion failed
    #[error("Cannot cast object to type {type_name}")]
    InvalidCast {
        /// Full name of the target type
        type_name: String,
    },
}

impl ReflectError {
    /// A [`ReflectError::NullReference`] with the default message
    pub fn null_reference() -> Self {
        ReflectError::NullReference {
            message: "Object is null.".to_string(),
        }
    }

    /// A [`ReflectError::NullReference`] with a specific message
    pub fn null_reference_msg(message: impl Into<String>) -> Self {
        ReflectError::NullReference {
            message: message.into(),
        }
    }

    /// An [`ReflectError::ArgumentNull`] for `param`
    pub fn argument_null(param: impl Into<String>) -> Self {
        ReflectError::ArgumentNull {
            param: param.into(),
        }
    }
}
