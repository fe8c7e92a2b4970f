//! TSelfGeneric command-line driver.
//!
//! ```text
//! paths ──► discover_sources ──► load_workspace (.editorconfig options)
//!                                     │
//!                                     ▼
//!                          analyze_all (parallel per document)
//!                           │                          │
//!                           ▼                          ▼
//!                 check: emit report          fix: fix_all ──► write files
//! ```

pub mod commands;
mod error;
mod project;

use std::sync::Once;

pub use error::DriverError;
pub use project::{discover_sources, load_workspace};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=tsg_analyzer=debug` or `RUST_LOG=trace`; set
/// `TSG_LOG_TREE=1` to render nested spans as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("TSG_LOG_TREE").is_ok_and(|value| value == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true)
                        .with_bracketed_fields(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
