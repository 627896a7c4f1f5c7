// src/services/mod.rs

//! Service layer for lookup operations.
//!
//! - `fetcher`: one outbound request per lookup, or a canned record in mock mode
//! - `mapper`: best-effort canonical field mapping
//! - `presenter`: console rendering of lookup reports

pub mod fetcher;
pub mod mapper;
pub mod mock;
pub mod presenter;

pub use fetcher::{Fetcher, HttpSource, LookupSource, fetch};
pub use mapper::map_fields;
pub use mock::MockSource;
pub use presenter::{RenderOptions, render_json, render_text};
