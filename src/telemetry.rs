//! Log output setup
//!
//! Browser builds install `tracing-wasm` from the wasm start hook in `lib.rs`.
//! Native hosts (tests, tooling, server-side rendering) call [`init_native`].

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "interactive_bio=info";

/// Install a formatted subscriber honouring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_native() -> bool {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
