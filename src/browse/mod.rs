//! Filter, ordering, and spotlight rules for the meme grid.

mod filter;
mod random;
mod stats;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogItem, Vibe};

pub use filter::{compute_visible, matches_query, matching_indices, surprise, Surprise, VisibleList};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use stats::{aggregate_stats, CatalogStats};

pub const SURPRISE_TOAST_MS: u32 = 1_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VibeFilter {
    #[default]
    All,
    Wholesome,
    Chaotic,
    Savage,
    Classic,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vibe filter: {0}")]
pub struct UnknownVibeFilter(pub String);

impl VibeFilter {
    pub const ALL: [VibeFilter; 5] = [
        Self::All,
        Self::Wholesome,
        Self::Chaotic,
        Self::Savage,
        Self::Classic,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Wholesome => "wholesome",
            Self::Chaotic => "chaotic",
            Self::Savage => "savage",
            Self::Classic => "classic",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All vibes",
            Self::Wholesome => "Wholesome",
            Self::Chaotic => "Chaotic",
            Self::Savage => "Savage",
            Self::Classic => "Classics",
        }
    }

    /// `Classic` tests the classic flag rather than the vibe category.
    pub fn matches(self, item: &CatalogItem) -> bool {
        match self {
            Self::All => true,
            Self::Classic => item.classic,
            Self::Wholesome => item.vibe == Some(Vibe::Wholesome),
            Self::Chaotic => item.vibe == Some(Vibe::Chaotic),
            Self::Savage => item.vibe == Some(Vibe::Savage),
        }
    }
}

impl FromStr for VibeFilter {
    type Err = UnknownVibeFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.id().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVibeFilter(value.to_string()))
    }
}

impl fmt::Display for VibeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Browsing state. Every transition returns a new record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseState {
    query: String,
    vibe_filter: VibeFilter,
    spotlight: Option<usize>,
}

impl BrowseState {
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            query: String::new(),
            vibe_filter: VibeFilter::All,
            spotlight: (!catalog.is_empty()).then_some(0),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn vibe_filter(&self) -> VibeFilter {
        self.vibe_filter
    }

    /// Catalog index of the spotlight item.
    pub fn spotlight(&self) -> Option<usize> {
        self.spotlight
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_vibe_filter(&self, vibe_filter: VibeFilter) -> Self {
        Self {
            vibe_filter,
            ..self.clone()
        }
    }

    pub fn with_spotlight(&self, index: usize) -> Self {
        Self {
            spotlight: Some(index),
            ..self.clone()
        }
    }

    pub fn wholesome_only(&self) -> Self {
        self.with_vibe_filter(VibeFilter::Wholesome)
    }

    pub fn reset_filters(&self) -> Self {
        self.with_vibe_filter(VibeFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_item;

    #[test]
    fn vibe_filter_parses_ids_case_insensitively() {
        assert_eq!("all".parse::<VibeFilter>(), Ok(VibeFilter::All));
        assert_eq!("Classic".parse::<VibeFilter>(), Ok(VibeFilter::Classic));
        assert_eq!(" savage ".parse::<VibeFilter>(), Ok(VibeFilter::Savage));
        assert_eq!(
            "spicy".parse::<VibeFilter>(),
            Err(UnknownVibeFilter("spicy".to_string()))
        );
    }

    #[test]
    fn classic_filter_uses_flag_not_vibe() {
        let classic_chaotic = test_item("A", &[], Some(Vibe::Chaotic), true);
        let plain_wholesome = test_item("B", &[], Some(Vibe::Wholesome), false);
        assert!(VibeFilter::Classic.matches(&classic_chaotic));
        assert!(!VibeFilter::Classic.matches(&plain_wholesome));
        assert!(VibeFilter::Chaotic.matches(&classic_chaotic));
        assert!(!VibeFilter::Wholesome.matches(&classic_chaotic));
    }

    #[test]
    fn all_filter_accepts_items_without_vibe() {
        let untagged = test_item("A", &[], None, false);
        assert!(VibeFilter::All.matches(&untagged));
        assert!(!VibeFilter::Savage.matches(&untagged));
    }

    #[test]
    fn transitions_leave_original_state_untouched() {
        let catalog = Catalog::new(vec![test_item("A", &[], None, false)]).unwrap();
        let initial = BrowseState::initial(&catalog);
        let next = initial.with_query("doge").wholesome_only();

        assert_eq!(initial.query(), "");
        assert_eq!(initial.vibe_filter(), VibeFilter::All);
        assert_eq!(next.query(), "doge");
        assert_eq!(next.vibe_filter(), VibeFilter::Wholesome);
        assert_eq!(next.reset_filters().vibe_filter(), VibeFilter::All);
        assert_eq!(next.spotlight(), Some(0));
    }

    #[test]
    fn initial_state_of_empty_catalog_has_no_spotlight() {
        let state = BrowseState::initial(&Catalog::default());
        assert_eq!(state.spotlight(), None);
    }
}
