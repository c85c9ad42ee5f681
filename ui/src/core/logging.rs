//! Tracing subscriber setup shared by the launchers.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use super::config::LogConfig;

/// Dependencies that are chatty at `info`.
const QUIET_DIRECTIVES: &[&str] = &["dioxus_core=warn", "dioxus_desktop=warn", "tao=warn", "wry=warn"];

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Calling this twice is harmless; the second install is ignored.
pub fn init(config: &LogConfig) {
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for directive in QUIET_DIRECTIVES {
        if let Ok(parsed) = directive.parse::<Directive>() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stdout);

    if let Err(err) = Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("[logging] subscriber already installed ({err})");
    }
}
