// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tracking setup events emitted once per successful configuration load.

use serde::Serialize;
use tracing::{debug, info};

use crate::sanitizer::SanitizedConfig;

/// Tracking integration requested by the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum AnalyticsEvent
{
    HotjarSetup
    {
        id:              u64,
        snippet_version: u32,
    },
    GoogleAnalyticsSetup
    {
        id: String,
    },
}

/// Sink for [`AnalyticsEvent`]s.
pub trait Analytics
{
    fn emit(&self, event: &AnalyticsEvent,);
}

/// Records analytics events as structured log lines.
#[derive(Debug, Default, Clone, Copy,)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics
{
    fn emit(&self, event: &AnalyticsEvent,)
    {
        match event {
            AnalyticsEvent::HotjarSetup {
                id,
                snippet_version,
            } => info!("Hotjar tracking enabled for site {} (snippet v{})", id, snippet_version),
            AnalyticsEvent::GoogleAnalyticsSetup {
                id,
            } => info!("Google Analytics tracking enabled for {}", id),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy,)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics
{
    fn emit(&self, _event: &AnalyticsEvent,) {}
}

/// Lists the setup events implied by the configuration.
///
/// A Hotjar id that is not a positive integer is skipped.
pub fn setup_events(config: &SanitizedConfig,) -> Vec<AnalyticsEvent,>
{
    let mut events = Vec::new();

    if let Some(raw,) = config.hotjar.id.as_deref() {
        match raw.trim().parse::<u64,>() {
            Ok(id,) if id > 0 => events.push(AnalyticsEvent::HotjarSetup {
                id,
                snippet_version: config.hotjar.snippet_version,
            },),
            _ => debug!("Skipping Hotjar setup for non-numeric id {}", raw),
        }
    }

    if let Some(id,) = config.google_analytics.id.as_deref() {
        events.push(AnalyticsEvent::GoogleAnalyticsSetup {
            id: id.to_owned(),
        },);
    }

    events
}
