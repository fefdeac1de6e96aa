#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the portfolio crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Three families of failures live here:
//!
//! * [`Error`] covers the loader and CLI (files, YAML, JSON output, client
//!   construction). These abort the binary.
//! * [`FetchFailure`] describes a single failed read against a remote API. It
//!   is never fatal on its own; the orchestrator decides whether it ends the
//!   page or only a section.
//! * [`InvalidConfig`] is the sanitizer's rejection. It carries no partially
//!   sanitized data.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Unified error type returned by the configuration loader and CLI.
#[derive(Debug, masterror::Error)]
pub enum Error
{
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Location of the file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error,
    },
    /// Wraps JSON errors raised while writing view output or theme state.
    #[error("failed to serialize document: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// Returned when user input violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String,
    },
    /// Service errors raised while preparing API clients.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String,
    },
}

impl Error
{
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Constructs a service error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the service error.
    pub fn service<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Service {
            message: message.into(),
        }
    }

    /// Formats the error for diagnostics without the variant name.
    pub fn to_display_string(&self,) -> String
    {
        format!("{self}")
    }
}

impl From<serde_yaml::Error,> for Error
{
    fn from(source: serde_yaml::Error,) -> Self
    {
        Self::Parse {
            source,
        }
    }
}

impl From<serde_json::Error,> for Error
{
    fn from(source: serde_json::Error,) -> Self
    {
        Self::Serialize {
            source,
        }
    }
}

impl From<InvalidConfig,> for Error
{
    fn from(invalid: InvalidConfig,) -> Self
    {
        Self::validation(invalid.to_string(),)
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error,) -> Error
{
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reason a raw configuration was rejected by the sanitizer.
///
/// The sanitizer returns this instead of a partially populated view model;
/// callers must not attempt to render anything from the rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, masterror::Error,)]
pub enum InvalidConfig
{
    /// The `github` section is absent or not a mapping.
    #[error("the github section is missing")]
    MissingGithub,
    /// `github.username` is absent or blank.
    #[error("github.username must be provided")]
    MissingUsername,
    /// `github.username` contains whitespace, `/`, `?` or `#`.
    #[error("github.username cannot contain whitespace or URL delimiters")]
    MalformedUsername,
}

/// Outcome of a failed read against a remote API.
#[derive(Debug, Clone, PartialEq, Eq, masterror::Error,)]
pub enum FetchFailure
{
    /// The remote answered with a non-success status code.
    #[error("request failed with HTTP status {status}")]
    Http {
        /// Numeric HTTP status code.
        status:               u16,
        /// Raw `x-ratelimit-reset` header (epoch seconds), when present.
        rate_limit_reset:     Option<String,>,
        /// Raw `x-ratelimit-remaining` header, when present.
        rate_limit_remaining: Option<String,>,
    },
    /// The request never produced a response.
    #[error("transport failure: {message}")]
    Transport {
        /// Description reported by the HTTP client.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Description reported by the decoder.
        message: String,
    },
    /// No response arrived within the configured budget.
    #[error("request timed out after {after:?}")]
    Timeout {
        /// Budget that elapsed.
        after: Duration,
    },
}

impl FetchFailure
{
    /// Builds an [`FetchFailure::Http`] without rate-limit headers.
    pub fn status(status: u16,) -> Self
    {
        Self::Http {
            status,
            rate_limit_reset: None,
            rate_limit_remaining: None,
        }
    }

    /// HTTP status carried by the failure, if the remote answered at all.
    pub fn status_code(&self,) -> Option<u16,>
    {
        match self {
            Self::Http {
                status, ..
            } => Some(*status,),
            Self::Transport {
                ..
            }
            | Self::Decode {
                ..
            }
            | Self::Timeout {
                ..
            } => None,
        }
    }
}
