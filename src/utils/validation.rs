use crate::utils::error::{MapError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MapError::invalid_value(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MapError::invalid_value(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(MapError::invalid_value(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MapError::invalid_value(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(MapError::invalid_value(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(MapError::invalid_value(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(MapError::invalid_value(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(MapError::invalid_value(
            field_name,
            file,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MapError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MapError::invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不會落在任何區間內
    if !(value >= min && value <= max) {
        return Err(MapError::invalid_value(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("tiles.url", "https://example.com/1/2/3.png").is_ok());
        assert!(validate_url("tiles.url", "http://example.com").is_ok());
        assert!(validate_url("tiles.url", "").is_err());
        assert!(validate_url("tiles.url", "invalid-url").is_err());
        assert!(validate_url("tiles.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "map.html").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "ma\0p.html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("output.path", "map.html", &["html", "htm"]).is_ok());
        assert!(validate_file_extension("output.path", "out/MAP.HTM", &["html", "htm"]).is_ok());
        assert!(validate_file_extension("output.path", "map.png", &["html", "htm"]).is_err());
        assert!(validate_file_extension("output.path", "map", &["html", "htm"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("map.latitude", 40.723204, -90.0, 90.0).is_ok());
        assert!(validate_range("map.latitude", 90.5, -90.0, 90.0).is_err());
        assert!(validate_range("map.latitude", f64::NAN, -90.0, 90.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("attr".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("tiles.attribution", &present).unwrap(), "attr");
        assert!(matches!(
            validate_required_field("tiles.attribution", &missing),
            Err(MapError::MissingConfigError { .. })
        ));
    }
}
