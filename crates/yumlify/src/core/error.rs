//! Core error types for diagram generation
//!
//! This module defines the error type shared by the type registry, the model
//! loader, the fragment builder and the URI resolver.

use thiserror::Error;

use super::TypeRef;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown type handle: {type_ref}")]
    UnknownType { type_ref: TypeRef },

    #[error("Model error: {message}")]
    Model { message: String },

    #[error("Type expression error: {message} in `{expression}`")]
    TypeExpression { message: String, expression: String },

    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Malformed response from diagram service: {body:?}")]
    MalformedResponse { body: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new unknown type error
    pub fn unknown_type(type_ref: TypeRef) -> Self {
        Self::UnknownType { type_ref }
    }

    /// Create a new model error
    pub fn model_error(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    /// Create a new type expression error
    pub fn type_expression_error(
        message: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self::TypeExpression {
            message: message.into(),
            expression: expression.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed_response(body: impl Into<String>) -> Self {
        Self::MalformedResponse { body: body.into() }
    }
}
