use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, ValidationErrors};

pub const MAX_CONTENT_CHARS: usize = 1000;

/// Raw comment body; `content` is checked by [`CommentRequest::validate`].
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: Option<Value>,
}

/// Comment text that passed validation, still unescaped.
#[derive(Debug)]
pub struct NewComment {
    pub content: String,
}

impl CommentRequest {
    pub fn validate(self) -> Result<NewComment, AppError> {
        let mut errors = ValidationErrors::new();
        let content = errors.required_string("content", self.content);
        if let Some(text) = &content {
            if text.chars().count() > MAX_CONTENT_CHARS {
                errors.add(
                    "content",
                    format!(
                        "The content field must not be greater than {MAX_CONTENT_CHARS} characters."
                    ),
                );
            }
        }
        match content {
            Some(content) if errors.is_empty() => Ok(NewComment { content }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub message: &'static str,
    pub comment: Comment,
}
