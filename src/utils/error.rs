use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No municipalities found at {url}")]
    EmptyResult { url: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Output,
}

impl EtlError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::Config { .. } => ErrorCategory::Input,
            Self::Fetch { .. } => ErrorCategory::Network,
            Self::EmptyResult { .. } => ErrorCategory::Data,
            Self::Write { .. } | Self::Csv(_) => ErrorCategory::Output,
        }
    }

    /// 單行、給使用者看的錯誤說明
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => message.clone(),
            Self::Config { message } => format!("Invalid settings: {}", message),
            Self::Fetch { url, source } => format!("Could not download {}: {}", url, source),
            Self::EmptyResult { url } => format!(
                "No municipality was found at {}. Check the source URL.",
                url
            ),
            Self::Write { path, source } => format!("Could not write {}: {}", path, source),
            Self::Csv(e) => format!("Could not write CSV output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Usage: volby-etl <SOURCE_URL> <OUTPUT_FILE.csv>, e.g. \
                 volby-etl \"https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103\" olomoucko.csv"
            }
            ErrorCategory::Network => "Check the network connection and that the page exists",
            ErrorCategory::Data => "Use a district listing page (ps32) as the source URL",
            ErrorCategory::Output => "Check that the output location is writable",
        }
    }

    /// Every fatal error maps to the same exit status.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            EtlError::invalid_argument("bad").category(),
            ErrorCategory::Input
        );
        assert_eq!(
            EtlError::EmptyResult {
                url: "https://volby.cz/pls/ps2017nss/x".to_string()
            }
            .category(),
            ErrorCategory::Data
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            EtlError::Write {
                path: "out.csv".to_string(),
                source: io
            }
            .category(),
            ErrorCategory::Output
        );
    }

    #[test]
    fn test_exit_code_is_always_one() {
        assert_eq!(EtlError::invalid_argument("x").exit_code(), 1);
        assert_eq!(
            EtlError::EmptyResult {
                url: String::new()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_user_friendly_message_is_single_line() {
        let err = EtlError::EmptyResult {
            url: "https://volby.cz/pls/ps2017nss/ps32".to_string(),
        };
        let msg = err.user_friendly_message();
        assert!(!msg.contains('\n'));
        assert!(msg.contains("ps32"));
    }
}
