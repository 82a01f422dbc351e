use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::nav::{parse_link, LinkError, ParamValue, QueryParams};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "m9s", about = "k9s-style terminal UI for a mail-delivery server")]
pub struct Cli {
    /// Mail server API base URL
    #[arg(long, env = "M9S_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Initial view, as m9s://mail/server?... or a bare query string
    #[arg(long)]
    pub link: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Rows per page when the link does not set one
    #[arg(long)]
    pub length: Option<u64>,

    /// Log file path
    #[arg(long, env = "M9S_LOG_FILE")]
    pub log_file: Option<String>,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Params the listing mounts with.
    pub fn initial_params(&self) -> Result<QueryParams, LinkError> {
        let mut params = match self.link.as_deref() {
            Some(link) => parse_link(link)?,
            None => QueryParams::new(),
        };
        if let Some(length) = self.length {
            if !params.contains_key(crate::nav::query::LENGTH) {
                params.insert(crate::nav::query::LENGTH, ParamValue::Int(length));
            }
        }
        Ok(params)
    }
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub default_length: Option<u64>,
}

impl ConfigFile {
    pub fn path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("m9s").join("config.toml"))
    }

    pub fn load() -> Option<Self> {
        let content = std::fs::read_to_string(Self::path()?).ok()?;
        match Self::parse(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring malformed config file: {}", e);
                None
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Fill in values the command line left at their defaults.
    pub fn merge_into(&self, cli: &mut Cli) {
        if cli.base_url == DEFAULT_BASE_URL {
            if let Some(ref base_url) = self.base_url {
                cli.base_url = base_url.clone();
            }
        }
        if cli.timeout == DEFAULT_TIMEOUT_SECS {
            if let Some(timeout) = self.timeout {
                cli.timeout = timeout;
            }
        }
        if cli.length.is_none() {
            cli.length = self.default_length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["m9s"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn file_fills_only_defaults() {
        let file = ConfigFile::parse(
            "base_url = \"https://mail.internal/api\"\ntimeout = 10\ndefault_length = 50\n",
        )
        .expect("parse config");

        let mut explicit = cli(&["--base-url", "http://other/api", "--timeout", "5"]);
        file.merge_into(&mut explicit);
        assert_eq!(explicit.base_url, "http://other/api");
        assert_eq!(explicit.timeout, 5);
        assert_eq!(explicit.length, Some(50));

        let mut defaults = Cli {
            base_url: DEFAULT_BASE_URL.to_string(),
            link: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            length: Some(10),
            log_file: None,
        };
        file.merge_into(&mut defaults);
        assert_eq!(defaults.base_url, "https://mail.internal/api");
        assert_eq!(defaults.timeout, 10);
        assert_eq!(defaults.length, Some(10));
    }

    #[test]
    fn empty_file_is_valid() {
        assert_eq!(ConfigFile::parse("").expect("parse"), ConfigFile::default());
        assert!(ConfigFile::parse("timeout = \"soon\"").is_err());
    }

    #[test]
    fn initial_params_prefer_link_length() {
        let with_link = cli(&["--link", "m9s://mail/server?length=10", "--length", "50"]);
        let params = with_link.initial_params().expect("params");
        assert_eq!(params.get_text("length").as_deref(), Some("10"));

        let bare = cli(&["--link", "status=error", "--length", "50"]);
        let params = bare.initial_params().expect("params");
        assert_eq!(params.get_text("length").as_deref(), Some("50"));
        assert_eq!(params.get_text("status").as_deref(), Some("error"));

        let foreign = cli(&["--link", "https://example.com/?a=b"]);
        assert_eq!(foreign.initial_params(), Err(LinkError::InvalidScheme));
    }
}
