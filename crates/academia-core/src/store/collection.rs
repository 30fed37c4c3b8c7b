// ── Reactive entity collection ──
//
// DashMap lookups by id plus an ordered snapshot broadcast over a `watch`
// channel. Snapshot order is source order, so option lists render in the
// order the backend returned them.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::warn;

use crate::model::Entity;

/// A concurrent, reactive collection for a single entity type.
///
/// Every mutation rebuilds the snapshot that subscribers receive.
pub struct EntityCollection<T: Entity> {
    /// id -> entity.
    by_id: DashMap<String, Arc<T>>,

    /// Ordered view, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Entity> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_id: DashMap::new(),
            snapshot,
        }
    }

    /// Replace the whole collection. Returns the number of entities kept.
    ///
    /// Duplicate ids keep their first occurrence.
    pub(crate) fn replace_all(&self, items: Vec<T>) -> usize {
        let mut seen = HashSet::with_capacity(items.len());
        let mut ordered = Vec::with_capacity(items.len());
        let mut dropped = 0usize;

        for item in items {
            if seen.insert(item.id().to_owned()) {
                ordered.push(Arc::new(item));
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(dropped, "ignored entities with duplicate ids");
        }

        self.by_id.clear();
        for item in &ordered {
            self.by_id.insert(item.id().to_owned(), Arc::clone(item));
        }

        let kept = ordered.len();
        self.snapshot.send_modify(|snap| *snap = Arc::new(ordered));
        kept
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn clear(&self) {
        self.by_id.clear();
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Course;

    fn course(id: &str, code: &str) -> Course {
        Course {
            id: id.into(),
            code: code.into(),
            title: format!("{code} title"),
            credits: None,
        }
    }

    fn codes(col: &EntityCollection<Course>) -> Vec<String> {
        col.snapshot().iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn replace_all_preserves_source_order() {
        let col = EntityCollection::new();
        col.replace_all(vec![course("3", "C"), course("1", "A"), course("2", "B")]);
        assert_eq!(codes(&col), ["C", "A", "B"]);
        assert_eq!(col.get("1").unwrap().code, "A");
    }

    #[test]
    fn replace_all_keeps_first_duplicate() {
        let col = EntityCollection::new();
        let kept = col.replace_all(vec![course("1", "A"), course("1", "A2"), course("2", "B")]);
        assert_eq!(kept, 2);
        assert_eq!(codes(&col), ["A", "B"]);
        assert_eq!(col.get("1").unwrap().code, "A");
    }

    #[test]
    fn replace_all_drops_previous_contents() {
        let col = EntityCollection::new();
        col.replace_all(vec![course("1", "A")]);
        col.replace_all(vec![course("2", "B")]);
        assert!(col.get("1").is_none());
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn subscribers_see_mutations() {
        let col = EntityCollection::new();
        let mut rx = col.subscribe();
        assert!(!rx.has_changed().unwrap());

        col.replace_all(vec![course("1", "A")]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        col.clear();
        assert!(rx.borrow_and_update().is_empty());
        assert!(col.is_empty());
    }
}
