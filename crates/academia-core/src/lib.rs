//! Data layer between `academia-api` and the terminal UI.
//!
//! - **[`StoreContext`]**: one explicit object owning the enrollment,
//!   faculty, academic-year and course stores. Each store is an
//!   `EntityCollection<T>` (`DashMap` + `tokio::sync::watch`), read through
//!   cheap `Arc` snapshots.
//!
//! - **[`EntityStream<T>`]**: subscription handle vended by the context,
//!   with `current()` / `changed()` for reactive rendering.
//!
//! - **[`DataSource`]**: where stores come from. [`SourceSpec`] picks a REST
//!   backend, a directory of JSON files, or the built-in demo catalog.
//!
//! - **[`load_all`]**: concurrent startup load of every store, bounded by a
//!   timeout and cancellable, reporting per-store outcomes in a
//!   [`LoadReport`].

pub mod convert;
pub mod error;
pub mod loader;
pub mod model;
pub mod source;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use loader::{LoadOptions, LoadReport, LoadStatus, SourceOutcome, load_all};
pub use source::{AnySource, ApiSource, DataSource, FileSource, SourceSpec, StaticSource};
pub use store::StoreContext;
pub use stream::EntityStream;

pub use model::{AcademicYear, Course, Enrollment, Entity, Faculty, StoreKind};
