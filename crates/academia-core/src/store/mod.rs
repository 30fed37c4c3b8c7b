// ── Client-side stores ──
//
// Concurrent entity storage with push-based change notification.

mod collection;
mod context;

pub use collection::EntityCollection;
pub use context::StoreContext;
