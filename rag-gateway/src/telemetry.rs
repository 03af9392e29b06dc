//! Tracing setup for the proxy.
//!
//! Every forward runs inside a `rag_forward` span; the gateway fills in the
//! upstream `status` and `latency_ms` once the response is in, and the span
//! close event carries the totals.

use std::io::{self, IsTerminal};

use serde_json::Value;
use tracing::Span;
use tracing::field::Empty;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Filter used when `RUST_LOG` is unset or unparsable: request traces from
/// `tower_http`, debug detail for the proxy crates.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,api=debug,rag_gateway=debug";

/// Builds the filter from a `RUST_LOG` value, falling back to
/// [`DEFAULT_DIRECTIVES`].
pub fn filter_from(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// [`filter_from`] applied to the process environment.
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

/// Single-line formatter for the proxy binary.
///
/// Closing `rag_forward` spans are printed, so each forward logs its status and
/// latency once. ANSI colors only on a TTY.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_span_events(FmtSpan::CLOSE)
}

/// Span wrapping one `POST <base_url>/chat`.
///
/// `status` and `latency_ms` start empty and are recorded by the gateway.
pub fn forward_span(url: &str, top_k: &Value) -> Span {
    tracing::info_span!(
        target: "rag_gateway::forward",
        "rag_forward",
        url = %url,
        top_k = %top_k,
        status = Empty,
        latency_ms = Empty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_proxy_crates() {
        let rendered = filter_from(None).to_string().to_lowercase();
        for directive in ["tower_http=info", "api=debug", "rag_gateway=debug"] {
            assert!(rendered.contains(directive), "{rendered}");
        }
    }

    #[test]
    fn rust_log_wins_unless_it_does_not_parse() {
        let custom = filter_from(Some("warn,api=trace")).to_string().to_lowercase();
        assert!(custom.contains("api=trace"), "{custom}");
        assert!(!custom.contains("rag_gateway"), "{custom}");

        let fallback = filter_from(Some("api=loud")).to_string().to_lowercase();
        assert!(fallback.contains("rag_gateway=debug"), "{fallback}");
    }
}
