use std::env;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "projectivity_core=info";

/// Filter for the given `RUST_LOG` value. A missing, blank or unparsable
/// value falls back to showing the crate's own events at `info`.
fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` replaces the default filter entirely when set. Safe to call
/// more than once, and a subscriber installed by the host application is
/// left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(env::var("RUST_LOG").ok().as_deref());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
