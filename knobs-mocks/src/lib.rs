//! knobs mocks - text shell for browsing component mocks
//!
//! Each example reads its knobs from a shared registry and renders a
//! one-line preview. Knob values can come from a shared link's URL args,
//! a preset, or `--set` edits.

pub mod catalog;
pub mod config;
pub mod mocks;
pub mod panel;
pub mod session;

pub use catalog::{Catalog, MockExample};
pub use config::{ConfigError, MocksConfig};
pub use session::{MockSession, SessionError, Snapshot};
