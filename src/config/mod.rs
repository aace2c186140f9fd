pub mod settings;

#[cfg(feature = "cli")]
pub use cli_config::{parse_error_message, CliConfig};

#[cfg(feature = "cli")]
mod cli_config {
    use super::settings::Settings;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::{EtlError, Result};
    use crate::utils::validation::{validate_locators, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "volby-etl")]
    #[command(version)]
    #[command(about = "Scrape 2017 Czech parliamentary election results into one CSV per district")]
    pub struct CliConfig {
        /// District listing page, e.g. https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103
        pub source_url: String,

        /// Output CSV file
        pub output_path: String,

        /// Optional TOML settings file
        #[arg(long)]
        pub config: Option<String>,

        /// Per-request timeout in seconds (overrides the settings file)
        #[arg(long)]
        pub timeout: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(skip)]
        pub settings: Settings,
    }

    impl CliConfig {
        /// Builds a config from already-parsed inputs with default settings.
        pub fn new(source_url: impl Into<String>, output_path: impl Into<String>) -> Self {
            Self {
                source_url: source_url.into(),
                output_path: output_path.into(),
                config: None,
                timeout: None,
                verbose: false,
                settings: Settings::default(),
            }
        }

        /// Loads the settings file (if any) and applies command-line overrides.
        pub fn resolve_settings(mut self) -> Result<Self> {
            if let Some(path) = &self.config {
                self.settings = Settings::from_file(path)?;
            }
            if let Some(timeout) = self.timeout {
                if timeout == 0 {
                    return Err(EtlError::Config {
                        message: "--timeout must be at least 1 second".to_string(),
                    });
                }
                self.settings.timeout_seconds = timeout;
            }
            Ok(self)
        }
    }

    /// Flattens a clap parse error to one line, keeping the offending argument names.
    pub fn parse_error_message(err: &clap::Error) -> String {
        let rendered = err.to_string();
        let message = rendered
            .lines()
            .take_while(|line| !line.starts_with("Usage:"))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        message
            .strip_prefix("error: ")
            .map(str::to_string)
            .unwrap_or(message)
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_locators(
                &self.source_url,
                &self.output_path,
                &self.settings.required_prefix,
                &self.settings.output_extension,
            )
        }
    }

    impl ConfigProvider for CliConfig {
        fn source_url(&self) -> &str {
            &self.source_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn settings(&self) -> &Settings {
            &self.settings
        }
    }

}
