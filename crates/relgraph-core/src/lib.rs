#![forbid(unsafe_code)]
//! relgraph-core library.
//!
//! Builds a release-blocking graph from a package catalog, narrows it with
//! closure filters, ranks the packages that can ship next, and renders the
//! result as DOT, a ranked report, or a checkout manifest.
//!
//! ```text
//! YAML catalog
//!        ↓  graph::Catalog::from_yaml_str()
//! Catalog (name → Package, loader order)
//!        ↓  closure::derive_* (optional)
//!        ↓  filter::filter_by_depth / filter_by_targets (optional)
//! Catalog (subset)
//!        ├─ rank::who_is_next()      → Vec<NextRelease>
//!        └─ export::{dot_graph, ranked_report, manifest}
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums where callers branch on the failure,
//!   `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod closure;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod rank;

pub use error::CatalogError;
pub use graph::{BlockingGraph, Catalog, Package};
pub use rank::NextRelease;
