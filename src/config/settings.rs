use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REPORT_URL: &str = "https://volby.cz/pls/ps2017nss/";
pub const DEFAULT_OUTPUT_EXTENSION: &str = ".csv";
pub const DEFAULT_DELIMITER: char = ';';
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Decimal separator, quote and record terminators would corrupt the CSV.
const FORBIDDEN_DELIMITERS: [char; 4] = [',', '"', '\n', '\r'];

/// Tunables for one run. Everything defaults to the 2017 parliamentary report family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Source URLs must start with this.
    pub required_prefix: String,
    /// Relative detail links are appended to this.
    pub base_url: String,
    pub output_extension: String,
    pub delimiter: char,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_prefix: DEFAULT_REPORT_URL.to_string(),
            base_url: DEFAULT_REPORT_URL.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            delimiter: DEFAULT_DELIMITER,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("volby-etl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定，未填欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).map_err(|e| EtlError::Config {
            message: format!("TOML parsing error: {}", e),
        })?;
        settings.check()?;
        Ok(settings)
    }

    /// Byte form of the delimiter for the CSV writer.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() && !FORBIDDEN_DELIMITERS.contains(&self.delimiter) {
            Ok(self.delimiter as u8)
        } else {
            Err(EtlError::Config {
                message: format!(
                    "delimiter must be a single ASCII character other than , \" CR or LF, got {:?}",
                    self.delimiter
                ),
            })
        }
    }

    fn check(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.timeout_seconds == 0 {
            return Err(EtlError::Config {
                message: "timeout_seconds must be at least 1".to_string(),
            });
        }
        if self.base_url.is_empty() || self.required_prefix.is_empty() {
            return Err(EtlError::Config {
                message: "base_url and required_prefix cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
