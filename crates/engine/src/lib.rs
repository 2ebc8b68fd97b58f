//! Catalog Engine library.
//!
//! Server-side code for the content catalog: storage, the list cache and the
//! HTTP API.
//!
//! ## Structure
//!
//! - `repositories/` - Record operations wrapping the storage port
//! - `use_cases/` - Cached reads, mutations and genre edits
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
