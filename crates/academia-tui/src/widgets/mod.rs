//! Reusable widgets shared across screens.

pub mod language_selector;
pub mod multi_select;
