use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::invalid_argument(format!(
            "{}: URL cannot be empty",
            field_name
        )));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::invalid_argument(format!(
                "{}: unsupported URL scheme: {}",
                field_name, scheme
            ))),
        },
        Err(e) => Err(EtlError::invalid_argument(format!(
            "{}: invalid URL format '{}': {}",
            field_name, url_str, e
        ))),
    }
}

pub fn validate_prefix(field_name: &str, value: &str, prefix: &str) -> Result<()> {
    if !value.starts_with(prefix) {
        return Err(EtlError::invalid_argument(format!(
            "{}: '{}' must start with {}",
            field_name, value, prefix
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::invalid_argument(format!(
            "{}: path cannot be empty",
            field_name
        )));
    }

    if path.contains('\0') {
        return Err(EtlError::invalid_argument(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_extension(field_name: &str, path: &str, extension: &str) -> Result<()> {
    if !path.ends_with(extension) {
        return Err(EtlError::invalid_argument(format!(
            "{}: '{}' must have the {} extension",
            field_name, path, extension
        )));
    }
    Ok(())
}

/// Checks the two positional inputs before any network access.
pub fn validate_locators(
    source_url: &str,
    output_path: &str,
    required_prefix: &str,
    extension: &str,
) -> Result<()> {
    validate_url("source_url", source_url)?;
    validate_prefix("source_url", source_url, required_prefix)?;
    validate_path("output_file", output_path)?;
    validate_extension("output_file", output_path, extension)?;
    Ok(())
}
