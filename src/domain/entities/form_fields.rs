use actix_multipart::form::text::Text;

use crate::errors::AppError;

// Helpers turning raw multipart text parts into typed, optional values.
// A part that is missing or blank is treated as "not provided".

pub fn text(field: Option<Text<String>>) -> Option<String> {
    field
        .map(Text::into_inner)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accepts `true/false`, `yes/no` and `1/0`, case-insensitively.
pub fn flag(field: Option<Text<String>>, name: &str) -> Result<Option<bool>, AppError> {
    match text(field) {
        None => Ok(None),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(AppError::validation(name, format!("{} must be true or false", name))),
        },
    }
}

pub fn integer(field: Option<Text<String>>, name: &str) -> Result<Option<i16>, AppError> {
    match text(field) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i16>()
            .map(Some)
            .map_err(|_| AppError::validation(name, format!("{} must be a whole number", name))),
    }
}

/// Comma-separated list; blank entries are dropped.
pub fn list(field: Option<Text<String>>) -> Option<Vec<String>> {
    text(field)
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty())
}
