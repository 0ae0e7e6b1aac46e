use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::services::is_valid_email;
use crate::error::{AppError, ValidationErrors};

/// Raw login body; fields stay untyped until [`LoginRequest::validate`].
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub password: Option<Value>,
}

/// Login input that passed validation.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let mut errors = ValidationErrors::new();

        let email = errors
            .required_string("email", self.email)
            .map(|e| e.trim().to_lowercase());
        if let Some(email) = &email {
            if !is_valid_email(email) {
                errors.add("email", "The email field must be a valid email address.");
            }
        }
        let password = errors.required_string("password", self.password);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(Credentials { email, password })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}
