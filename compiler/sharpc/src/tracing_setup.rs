//! Debug output for synthesis.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times; only the first call does anything, and it
/// does nothing unless `RUST_LOG` is set. Enable with
/// `RUST_LOG=sharp_symbols=debug` or `RUST_LOG=sharp_symbols=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_writer(std::io::stderr);
        // A host that installed its own subscriber keeps it.
        let installed = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree)
            .try_init();
        if installed.is_ok() {
            tracing::debug!("tracing initialized");
        }
    });
}
