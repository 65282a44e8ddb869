//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Organization printed at the top of every report.
pub const DEFAULT_ORG_NAME: &str = "YAFT İNŞAAT VE TİCARET A.Ş.";

/// Prefix of exported file names (`<prefix>_<date>.pdf`).
pub const DEFAULT_FILE_PREFIX: &str = "YAFT";

/// Where the report font is fetched from when it is not cached yet.
pub const DEFAULT_FONT_URL: &str =
    "https://cdn.jsdelivr.net/npm/dejavu-fonts-ttf@2.37.3/ttf/DejaVuSans.ttf";

/// File name of the cached report font.
pub const FONT_FILE_NAME: &str = "DejaVuSans.ttf";

/// Upper bound on the one-time font download.
pub const DEFAULT_FONT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(8 * 60 * 60);

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Organization name for the report title (from LUMBER_ORG_NAME)
    pub org_name: String,
    /// Export file name prefix (from LUMBER_FILE_PREFIX)
    pub file_prefix: String,
    /// Idle time after which a session's records are dropped (from LUMBER_SESSION_IDLE_SECS)
    pub session_idle: Duration,
    pub font: FontConfig,
}

/// Where the embeddable report font comes from.
#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Cached font file (from LUMBER_FONT_PATH). `None` disables the embedded font.
    pub cache_path: Option<PathBuf>,
    /// Download location used when the cache file is missing (from LUMBER_FONT_URL).
    /// `None` never touches the network (LUMBER_FONT_FETCH=0).
    pub url: Option<String>,
    /// Deadline for the download, connect included (from LUMBER_FONT_TIMEOUT_SECS).
    pub download_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let org_name = std::env::var("LUMBER_ORG_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORG_NAME.to_string());

        let file_prefix = std::env::var("LUMBER_FILE_PREFIX")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string());

        let session_idle = secs_from_env("LUMBER_SESSION_IDLE_SECS").unwrap_or(DEFAULT_SESSION_IDLE);

        Self {
            org_name,
            file_prefix,
            session_idle,
            font: FontConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            org_name: DEFAULT_ORG_NAME.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            session_idle: DEFAULT_SESSION_IDLE,
            font: FontConfig::disabled(),
        }
    }
}

impl FontConfig {
    pub fn from_env() -> Self {
        let cache_path = std::env::var("LUMBER_FONT_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(default_font_path);

        let fetch_enabled = std::env::var("LUMBER_FONT_FETCH")
            .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        let url = if fetch_enabled {
            Some(std::env::var("LUMBER_FONT_URL").unwrap_or_else(|_| DEFAULT_FONT_URL.to_string()))
        } else {
            None
        };

        Self {
            cache_path,
            url,
            download_timeout: secs_from_env("LUMBER_FONT_TIMEOUT_SECS").unwrap_or(DEFAULT_FONT_TIMEOUT),
        }
    }

    /// No embedded font: reports always use the builtin fallback.
    pub fn disabled() -> Self {
        Self {
            cache_path: None,
            url: None,
            download_timeout: DEFAULT_FONT_TIMEOUT,
        }
    }

    /// Use an already present font file, never downloading.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: Some(path.into()),
            url: None,
            download_timeout: DEFAULT_FONT_TIMEOUT,
        }
    }

    /// Cache at `path`, downloading from `url` when the file is missing.
    pub fn remote(path: impl Into<PathBuf>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            cache_path: Some(path.into()),
            url: Some(url.into()),
            download_timeout: timeout,
        }
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn default_font_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "lumber-ledger")?;
    Some(dirs.cache_dir().join(FONT_FILE_NAME))
}
