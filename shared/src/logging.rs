//! Shared logging utilities for consistent tracing across the pipeline

use crate::types::Stage;
use chrono::{DateTime, Utc};
use tracing::info;

/// Crates whose events pass the filter at the requested level
const PIPELINE_TARGETS: &[&str] = &["startup_intel", "orchestrator", "agents", "shared"];

/// Build the filter directive string for a base level
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    let mut directives: Vec<String> = PIPELINE_TARGETS
        .iter()
        .map(|target| format!("{target}={base_level}"))
        .collect();
    directives.push("reqwest=warn".to_string());
    directives.push("hyper=warn".to_string());
    directives.join(",")
}

/// Initialize the stdout tracing subscriber with an optional log level
///
/// `RUST_LOG` wins over the computed directives when it is set.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for stage-aware info logging
#[macro_export]
macro_rules! stage_info {
    ($stage:expr, $($arg:tt)*) => {
        tracing::info!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware warning logging
#[macro_export]
macro_rules! stage_warn {
    ($stage:expr, $($arg:tt)*) => {
        tracing::warn!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware error logging
#[macro_export]
macro_rules! stage_error {
    ($stage:expr, $($arg:tt)*) => {
        tracing::error!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware debug logging
#[macro_export]
macro_rules! stage_debug {
    ($stage:expr, $($arg:tt)*) => {
        tracing::debug!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(stage: Stage, details: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(stage: Stage, reason: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(stage: Stage, context: &str, error: &dyn std::fmt::Display) {
    crate::stage_error!(stage, error = %error, "❌ {} failed", context);
}

/// Contextual logging helper for success conditions
pub fn log_success(stage: Stage, message: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(stage: Stage, action: &str, details: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_filter_directives_use_level() {
        let directives = filter_directives(Some("debug"));
        assert!(directives.contains("orchestrator=debug"));
        assert!(directives.contains("agents=debug"));
        assert!(directives.contains("reqwest=warn"));
    }

    #[test]
    fn test_filter_directives_default_to_info() {
        assert!(filter_directives(None).contains("shared=info"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_error_carries_stage_and_error() {
        let output = capture(|| log_error(Stage::Processing, "Summarize", &"model timed out"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("stage=processing"));
        assert!(output.contains("error=model timed out"));
        assert!(output.contains("❌ Summarize failed"));
    }

    #[test]
    fn test_progress_and_shutdown_lines() {
        let output = capture(|| {
            log_progress(Stage::Research, "Running stage", "research for 'ai'");
            log_shutdown(Stage::Cli, "command finished");
        });
        assert!(output.contains("📋 Running stage: research for 'ai'"));
        assert!(output.contains("stage=cli"));
        assert!(output.contains("🛑 Shutting down: command finished"));
    }
}
