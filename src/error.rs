//! Validation errors raised by the provider and preset factories, plus configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected factory arguments. Resolution itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdnError {
  /// The repository owner was empty after trimming.
  #[error("{provider}: owner is required")]
  MissingOwner {
    /// Provider that rejected the options.
    provider: &'static str,
  },
  /// The repository name was empty after trimming.
  #[error("{provider}: repo is required")]
  MissingRepo {
    /// Provider that rejected the options.
    provider: &'static str,
  },
  /// The dev CDN project name was empty after trimming.
  #[error("dev-cdn preset: project is required")]
  MissingProject,
  /// The dev CDN assets directory was empty after trimming.
  #[error("dev-cdn preset: assets directory must not be empty")]
  EmptyAssetsDir,
}

/// Result alias for factory operations.
pub type Result<T> = std::result::Result<T, CdnError>;

/// Errors raised while loading or applying a resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the configuration file.
  #[error("failed to parse {}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
  /// Failed to parse an in-memory configuration document.
  #[error("failed to parse resolver configuration")]
  Json(#[from] serde_json::Error),
  /// A configured provider or preset rejected its options.
  #[error("invalid resolver configuration")]
  Invalid(#[from] CdnError),
}
