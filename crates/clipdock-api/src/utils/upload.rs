//! Common utilities for file upload handlers

use axum::extract::Multipart;
use bytes::Bytes;
use clipdock_core::AppError;

/// Extract file data and content type from a multipart form.
/// Exactly one field with the expected name is accepted, and it must be a
/// file part (carry a filename); duplicates are rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<(Bytes, String), AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == field_name {
            if file_data.is_some() {
                return Err(AppError::BadRequest(format!(
                    "Multiple '{}' fields are not allowed",
                    field_name
                )));
            }

            if field.file_name().is_none() {
                return Err(AppError::BadRequest(format!(
                    "'{}' is not a file",
                    field_name
                )));
            }

            content_type = field.content_type().map(|s| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data);
        }
    }

    let file_data = file_data
        .ok_or_else(|| AppError::BadRequest(format!("No '{}' file provided", field_name)))?;
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, content_type))
}

/// Validate file size against a ceiling.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::BadRequest("Max upload size exceeded".to_string()));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against an allowlist. Compares the normalized MIME
/// type only (no parameter bypass).
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::BadRequest(format!(
            "Not a valid MIME type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}
