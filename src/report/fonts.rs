//! Report font acquisition and registration.
//!
//! The builtin PDF fonts only cover WinAnsi, so Turkish letters such as `ş`,
//! `ğ` and `İ` need an embedded TrueType font. The font is acquired at most once
//! per process (cache file, else download) and every report falls back to
//! builtin Helvetica when it is unavailable.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use printpdf::{BuiltinFont, IndirectFontRef, PdfDocument, PdfDocumentReference};
use thiserror::Error;
use tokio::sync::OnceCell;

use super::ReportError;
use crate::config::FontConfig;

/// Why no embeddable font could be acquired.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("no font source configured")]
    NotConfigured,

    #[error("font file {path} not found and downloading is disabled")]
    NotCached { path: PathBuf },

    #[error("failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("font data rejected: {0}")]
    Rejected(String),
}

/// Outcome of registering the report font with a document.
pub enum FontChoice {
    Embedded(IndirectFontRef),
    Fallback {
        font: IndirectFontRef,
        reason: FallbackReason,
    },
}

impl FontChoice {
    pub fn font(&self) -> &IndirectFontRef {
        match self {
            Self::Embedded(font) => font,
            Self::Fallback { font, .. } => font,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The provider had no font bytes to offer.
    Unavailable,
    /// The bytes could not be registered with this document.
    Rejected(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "embedded font unavailable"),
            Self::Rejected(msg) => write!(f, "embedded font rejected: {}", msg),
        }
    }
}

/// Register `bytes` as the document font, or builtin Helvetica when that is
/// not possible. Only a failure to add the builtin font is an error.
pub fn register(
    doc: &PdfDocumentReference,
    bytes: Option<&[u8]>,
) -> Result<FontChoice, ReportError> {
    let reason = match bytes {
        Some(bytes) => match doc.add_external_font(Cursor::new(bytes)) {
            Ok(font) => return Ok(FontChoice::Embedded(font)),
            Err(e) => FallbackReason::Rejected(e.to_string()),
        },
        None => FallbackReason::Unavailable,
    };

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    Ok(FontChoice::Fallback { font, reason })
}

/// Acquires the embeddable font once and hands the bytes to every report.
#[derive(Clone)]
pub struct FontProvider {
    config: FontConfig,
    client: reqwest::Client,
    bytes: Arc<OnceCell<Option<Arc<[u8]>>>>,
}

impl FontProvider {
    pub fn new(config: FontConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(config.download_timeout)
            .timeout(config.download_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Font download client without timeouts: {}", e);
                reqwest::Client::new()
            });

        Self {
            config,
            client,
            bytes: Arc::new(OnceCell::new()),
        }
    }

    /// A provider that never offers a font.
    pub fn disabled() -> Self {
        Self::new(FontConfig::disabled())
    }

    /// Font bytes, acquiring them on first use. Failures are logged once and
    /// remembered, so later calls return `None` without retrying.
    pub async fn font_bytes(&self) -> Option<Arc<[u8]>> {
        self.bytes
            .get_or_init(|| async {
                match self.acquire().await {
                    Ok(bytes) => {
                        tracing::info!(size = bytes.len(), "Embedded report font ready");
                        Some(Arc::from(bytes))
                    }
                    Err(FontError::NotConfigured) => {
                        tracing::debug!("No report font configured, using builtin font");
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Report font unavailable, using builtin font: {}", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    async fn acquire(&self) -> Result<Vec<u8>, FontError> {
        let path = self.config.cache_path.as_ref().ok_or(FontError::NotConfigured)?;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let url = self
                    .config
                    .url
                    .as_ref()
                    .ok_or_else(|| FontError::NotCached { path: path.clone() })?;
                let bytes = self.download(url).await?;
                probe(&bytes)?;
                self.store(path, &bytes).await;
                return Ok(bytes);
            }
            Err(source) => {
                return Err(FontError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        probe(&bytes)?;
        Ok(bytes)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FontError> {
        tracing::info!("Downloading report font from {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn store(&self, path: &Path, bytes: &[u8]) {
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!("Could not create font cache directory: {}", e);
                return;
            }
        }
        match tokio::fs::write(path, bytes).await {
            Ok(()) => tracing::debug!("Cached report font at {}", path.display()),
            Err(e) => tracing::warn!("Could not cache report font: {}", e),
        }
    }
}

/// Trial registration so unusable bytes are caught at acquisition time.
fn probe(bytes: &[u8]) -> Result<(), FontError> {
    let doc = PdfDocument::empty("font probe");
    doc.add_external_font(Cursor::new(bytes))
        .map(|_| ())
        .map_err(|e| FontError::Rejected(e.to_string()))
}
