//! Custom validators for configuration fields

use validator::ValidationError;

/// Validate the API path joined onto the base URL
///
/// Must be a non-empty relative path with no scheme, query, fragment or whitespace.
/// A scheme would let the join replace the configured host.
pub fn validate_api_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_api_path"));
    }
    if path.starts_with('/') || path.contains(':') || url::Url::parse(path).is_ok() {
        return Err(ValidationError::new("absolute_api_path"));
    }
    if path.contains(['?', '#']) || path.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("invalid_api_path_characters"));
    }
    Ok(())
}

/// Validate a tracing log level
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon is allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
