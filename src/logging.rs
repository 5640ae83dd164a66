// ABOUTME: Logging configuration and structured logging setup for the server and CLI
// ABOUTME: Configures log levels, formatters, noise filters, and output destinations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging built on `tracing-subscriber`

use std::env;
use std::io;

use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
    /// Where log lines go
    pub output: LogOutput,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl LogFormat {
    /// Parse `LOG_FORMAT`, defaulting to pretty
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Log destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Server default
    Stdout,
    /// CLI default, keeps stdout for command output
    Stderr,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::FITPLAN_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
            output: LogOutput::Stdout,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = LogFormat::from_str_or_default(&env::var("LOG_FORMAT").unwrap_or_default());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::FITPLAN_SERVER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
            output: LogOutput::Stdout,
        }
    }

    /// Terminal client configuration: compact, quiet, on stderr
    #[must_use]
    pub fn for_cli(verbose: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "warn" }.into(),
            format: LogFormat::Compact,
            service_name: service_names::FITPLAN_CLI.into(),
            output: LogOutput::Stderr,
            ..Self::default()
        }
    }

    /// Build the filter with noise reduction for HTTP internals
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());
        let directives = [
            "hyper=warn".to_owned(),
            "hyper::proto=warn".to_owned(),
            "reqwest=warn".to_owned(),
            "tower_http=info".to_owned(),
            format!("fitplan_server={}", self.level),
            format!("fitplan_providers={}", self.level),
        ];

        directives
            .iter()
            .fold(EnvFilter::new(base), |filter, directive| {
                match directive.parse() {
                    Ok(directive) => filter.add_directive(directive),
                    Err(_) => filter.add_directive(tracing::Level::INFO.into()),
                }
            })
    }

    fn writer(&self) -> BoxMakeWriter {
        match self.output {
            LogOutput::Stdout => BoxMakeWriter::new(io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(self.writer())
                        .with_span_events(self.span_events())
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(self.writer())
                        .with_span_events(self.span_events()),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(self.writer())
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        if self.output == LogOutput::Stdout {
            self.log_startup_info();
        }
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "FitPlan server starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!("Configuration loaded: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Install a test-writer subscriber once; later calls are no-ops
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(
            env::var("TEST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// Domain event logging helpers
pub struct AppLogger;

impl AppLogger {
    /// Log how a plan request was answered
    pub fn log_plan_outcome(user: &str, source: &str, reason: Option<&str>, duration_ms: u64) {
        info!(
            plan.user = %user,
            plan.source = %source,
            plan.fallback_reason = reason.unwrap_or(""),
            plan.duration_ms = %duration_ms,
            "Plan generated"
        );
    }

    /// Log which image method answered a request
    pub fn log_image_outcome(kind: &str, method: &str, fallback: bool, duration_ms: u64) {
        info!(
            image.kind = %kind,
            image.method = %method,
            image.fallback = %fallback,
            image.duration_ms = %duration_ms,
            "Image resolved"
        );
    }

    /// Log a finished HTTP request inside its request span
    pub fn log_request_completed(status: u16, duration_ms: u64) {
        if status >= 500 {
            warn!(http.status = %status, http.duration_ms = %duration_ms, "HTTP request failed");
        } else {
            info!(http.status = %status, http.duration_ms = %duration_ms, "HTTP request");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default("whatever"), LogFormat::Pretty);
    }

    #[test]
    fn test_cli_config_logs_to_stderr() {
        let config = LoggingConfig::for_cli(false);
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.level, "warn");
        assert_eq!(config.service_name, service_names::FITPLAN_CLI);
    }
}
