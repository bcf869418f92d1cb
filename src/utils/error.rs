use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Emulator request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Emulator returned {status}: {message}")]
    Emulator { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CheckError {
    /// Full diagnostic including the source chain, e.g. the connection cause
    /// behind a reqwest error.
    pub fn diagnostic(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Error, Debug)]
    #[error("tcp connect error")]
    struct ConnectFailure(#[source] io::Error);

    #[test]
    fn test_diagnostic_appends_source_chain() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        let err = CheckError::Io(io::Error::new(
            io::ErrorKind::Other,
            ConnectFailure(refused),
        ));

        assert_eq!(err.to_string(), "IO error: tcp connect error");
        assert_eq!(
            err.diagnostic(),
            "IO error: tcp connect error: connection refused"
        );
    }

    #[test]
    fn test_diagnostic_without_source_is_display() {
        let err = CheckError::Emulator {
            status: 403,
            message: "denied".to_string(),
        };
        assert_eq!(err.diagnostic(), err.to_string());
    }
}
