use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::escaped_json;

/// Field-level validation failures, in the order they were found.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<(String, String)>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push((field.to_string(), message.into()));
    }

    /// Require `value` to be a non-blank JSON string, recording the failure
    /// against `field` otherwise.
    pub fn required_string(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                self.add(field, format!("The {field} field is required."));
                None
            }
            Some(_) => {
                self.add(field, format!("The {field} field must be a string."));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    fn summary(&self) -> String {
        match self.0.split_first() {
            None => "The given data was invalid.".to_string(),
            Some(((_, first), [])) => first.clone(),
            Some(((_, first), rest)) => {
                let more = rest.len();
                let noun = if more == 1 { "error" } else { "errors" };
                format!("{first} (and {more} more {noun})")
            }
        }
    }

    fn to_json(&self) -> Value {
        let mut fields: Map<String, Value> = Map::new();
        for (field, message) in &self.0 {
            let entry = fields
                .entry(field.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = entry {
                list.push(Value::String(message.clone()));
            }
        }
        Value::Object(fields)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.summary())]
    Validation(ValidationErrors),

    #[error("Unauthenticated.")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Not Found")]
    RouteNotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation(ValidationErrors::single(
            "body",
            "The request body must be a valid JSON object.",
        ))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected query string");
        AppError::Validation(ValidationErrors::single(
            "query",
            "The query string could not be parsed.",
        ))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::ProductNotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors.to_json(),
            }),
            AppError::Internal(cause) => {
                error!(error = ?cause, "internal error");
                json!({ "message": self.to_string() })
            }
            _ => json!({ "message": self.to_string() }),
        };
        escaped_json(status, &body)
    }
}
