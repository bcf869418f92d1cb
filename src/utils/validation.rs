use crate::utils::error::{CheckError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(()),
            "http" | "https" => Err(CheckError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: "URL has no host".to_string(),
            }),
            scheme => Err(CheckError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Accepts `host:port`, `host`, or a full `http(s)://` URL, the forms
/// `FIRESTORE_EMULATOR_HOST` is set to in practice.
pub fn emulator_base_url(field_name: &str, host: &str) -> Result<Url> {
    let trimmed = host.trim().trim_end_matches('/');
    validate_non_empty_string(field_name, trimmed)?;

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    validate_url(field_name, &candidate)?;
    Url::parse(&candidate).map_err(|e| CheckError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: host.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("emulator_host", "https://example.com").is_ok());
        assert!(validate_url("emulator_host", "http://localhost:8080").is_ok());
        assert!(validate_url("emulator_host", "").is_err());
        assert!(validate_url("emulator_host", "invalid-url").is_err());
        assert!(validate_url("emulator_host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_emulator_base_url_forms() {
        let url = emulator_base_url("emulator_host", "localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");

        let url = emulator_base_url("emulator_host", "http://127.0.0.1:9090/").unwrap();
        assert_eq!(url.port(), Some(9090));

        assert!(emulator_base_url("emulator_host", "   ").is_err());
        assert!(emulator_base_url("emulator_host", "local host:80").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_ms", 2000u64, 1, 600_000).is_ok());
        assert!(validate_range("timeout_ms", 0u64, 1, 600_000).is_err());
        assert!(validate_range("timeout_ms", 600_001u64, 1, 600_000).is_err());
    }
}
