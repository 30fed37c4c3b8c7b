//! Screen identifiers.

use std::fmt;

/// Identifies each TUI screen. Number keys switch between tab-bar screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Startup throbber; not in the tab bar.
    #[default]
    Loading,
    Enrollments, // 1
    Overview,    // 2
}

impl ScreenId {
    /// Tab-bar screens in order.
    pub const TABS: [ScreenId; 2] = [Self::Enrollments, Self::Overview];

    /// Numeric key for this screen; 0 for screens outside the tab bar.
    pub fn number(self) -> u8 {
        match self {
            Self::Loading => 0,
            Self::Enrollments => 1,
            Self::Overview => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::TABS.into_iter().find(|s| s.number() == n)
    }

    /// Translation key of the tab label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Loading => "loading.message",
            Self::Enrollments => "screen.enrollments",
            Self::Overview => "screen.overview",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Enrollments => "enrollments",
            Self::Overview => "overview",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_map_to_tabs() {
        assert_eq!(ScreenId::from_number(1), Some(ScreenId::Enrollments));
        assert_eq!(ScreenId::from_number(2), Some(ScreenId::Overview));
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(3), None);
    }
}
