// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Maps fetch failures onto the user-facing error panel.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::FetchFailure;

/// Category of a page-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind
{
    InvalidConfiguration,
    InvalidUsername,
    RateLimited,
    GenericFailure,
}

/// Content of the error panel that replaces the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor
{
    pub kind:     ErrorKind,
    /// HTTP-like status shown on the panel.
    pub status:   u16,
    pub title:    String,
    pub subtitle: String,
    /// Humanized time until the rate limit resets (`"in 12 minutes"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_in: Option<String,>,
}

impl ErrorDescriptor
{
    /// Panel shown when the configuration could not be sanitized.
    pub fn invalid_configuration() -> Self
    {
        Self {
            kind:     ErrorKind::InvalidConfiguration,
            status:   500,
            title:    "Invalid Config!".to_owned(),
            subtitle: "Please provide correct config in the configuration file.".to_owned(),
            reset_in: None,
        }
    }

    /// Panel shown when the profile lookup answered 404.
    pub fn invalid_username() -> Self
    {
        Self {
            kind:     ErrorKind::InvalidUsername,
            status:   404,
            title:    "Invalid GitHub Username!".to_owned(),
            subtitle: "Please provide correct github username in the configuration file."
                .to_owned(),
            reset_in: None,
        }
    }

    /// Panel shown when the remote refused the request for rate limiting.
    ///
    /// Without a duration the subtitle only says to try again later.
    pub fn rate_limited(reset_in: Option<String,>,) -> Self
    {
        let subtitle = match &reset_in {
            Some(duration,) => format!("Oh no, you hit the rate limit! Try again {duration}."),
            None => "Oh no, you hit the rate limit! Try again later.".to_owned(),
        };
        Self {
            kind: ErrorKind::RateLimited,
            status: 429,
            title: "Too Many Requests!".to_owned(),
            subtitle,
            reset_in,
        }
    }

    /// Panel shown for every other failure.
    pub fn generic() -> Self
    {
        Self {
            kind:     ErrorKind::GenericFailure,
            status:   500,
            title:    "Oops!!".to_owned(),
            subtitle: "Something went wrong.".to_owned(),
            reset_in: None,
        }
    }
}

/// Classifies a failure against the current wall clock.
///
/// See [`classify_at`].
pub fn classify(failure: &FetchFailure,) -> ErrorDescriptor
{
    classify_at(failure, SystemTime::now(),)
}

/// Classifies a failure, measuring rate-limit resets relative to `now`.
///
/// 404 maps to an invalid username and 403 to rate limiting; every other
/// status and every non-HTTP failure is generic. A missing or unparsable
/// reset header only drops the duration from the rate-limit panel.
///
/// # Examples
///
/// ```
/// use gitfolio::{ErrorKind, FetchFailure, classify};
///
/// assert_eq!(classify(&FetchFailure::status(404,),).kind, ErrorKind::InvalidUsername);
/// assert_eq!(classify(&FetchFailure::status(502,),).kind, ErrorKind::GenericFailure);
/// ```
pub fn classify_at(failure: &FetchFailure, now: SystemTime,) -> ErrorDescriptor
{
    match failure {
        FetchFailure::Http {
            status: 404, ..
        } => ErrorDescriptor::invalid_username(),
        FetchFailure::Http {
            status: 403,
            rate_limit_reset,
            ..
        } => {
            let reset_in = rate_limit_reset
                .as_deref()
                .and_then(|raw| reset_delay(raw, now,),)
                .map(humanize_delay,);
            ErrorDescriptor::rate_limited(reset_in,)
        }
        _ => ErrorDescriptor::generic(),
    }
}

/// Time remaining until the epoch-seconds `raw` reset, clamped at zero.
fn reset_delay(raw: &str, now: SystemTime,) -> Option<Duration,>
{
    let reset = raw.trim().parse::<u64,>().ok()?;
    let reset_at = UNIX_EPOCH.checked_add(Duration::from_secs(reset,),)?;
    Some(reset_at.duration_since(now,).unwrap_or(Duration::ZERO,),)
}

/// Renders a future delay the way relative-time formatters do
/// (`in less than a minute`, `in about 2 hours`, ...).
fn humanize_delay(delay: Duration,) -> String
{
    const MINUTES_IN_DAY: u64 = 1_440;

    let seconds = delay.as_secs();
    let minutes = (seconds + 30) / 60;

    let distance = match minutes {
        0 => "less than a minute".to_owned(),
        1 => "1 minute".to_owned(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_owned(),
        90..MINUTES_IN_DAY => format!("about {} hours", (minutes + 30) / 60),
        MINUTES_IN_DAY..2_520 => "1 day".to_owned(),
        _ => format!("{} days", (minutes + MINUTES_IN_DAY / 2) / MINUTES_IN_DAY),
    };
    format!("in {distance}")
}
