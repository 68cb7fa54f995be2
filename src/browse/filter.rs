use crate::catalog::{Catalog, CatalogItem};

use super::{BrowseState, RandomSource, VibeFilter};

/// Ordered grid contents: the spotlight first, then matching items in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleList<'a> {
    entries: Vec<&'a CatalogItem>,
    spotlight: Option<&'a CatalogItem>,
    matching: usize,
}

impl<'a> VisibleList<'a> {
    pub fn entries(&self) -> &[&'a CatalogItem] {
        &self.entries
    }

    pub fn spotlight(&self) -> Option<&'a CatalogItem> {
        self.spotlight
    }

    /// Size of the filtered set, spotlight excluded unless it matches on its own.
    pub fn matching_count(&self) -> usize {
        self.matching
    }

    /// Empty-state detection looks at the filtered set, never at `entries`,
    /// which always holds the spotlight.
    pub fn is_empty_state(&self) -> bool {
        self.matching == 0
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.entries.iter().map(|item| item.title.as_str()).collect()
    }
}

/// Case-insensitive substring match on the title or any tag. An empty query matches.
pub fn matches_query(item: &CatalogItem, query: &str) -> bool {
    let needle = query.to_lowercase();
    item.title.to_lowercase().contains(&needle)
        || item
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

pub fn matching_indices(catalog: &Catalog, query: &str, vibe_filter: VibeFilter) -> Vec<usize> {
    catalog
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_query(item, query) && vibe_filter.matches(item))
        .map(|(index, _)| index)
        .collect()
}

pub fn compute_visible<'a>(catalog: &'a Catalog, state: &BrowseState) -> VisibleList<'a> {
    let matching = matching_indices(catalog, state.query(), state.vibe_filter());
    let spotlight = state.spotlight().and_then(|index| catalog.get(index));

    let mut entries = Vec::with_capacity(matching.len() + 1);
    entries.extend(spotlight);
    entries.extend(
        matching
            .iter()
            .filter_map(|&index| catalog.get(index))
            .filter(|item| spotlight.is_none_or(|spot| spot.title != item.title)),
    );

    VisibleList {
        entries,
        spotlight,
        matching: matching.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surprise {
    pub state: BrowseState,
    pub index: usize,
    pub message: String,
}

/// Picks a new spotlight from the filtered set, or from the whole catalog
/// when the filters exclude everything.
pub fn surprise(
    catalog: &Catalog,
    state: &BrowseState,
    random: &mut dyn RandomSource,
) -> Option<Surprise> {
    if catalog.is_empty() {
        return None;
    }

    let filtered = matching_indices(catalog, state.query(), state.vibe_filter());
    let index = if filtered.is_empty() {
        pick(random, catalog.len())
    } else {
        filtered[pick(random, filtered.len())]
    };
    let item = catalog.get(index)?;
    tracing::debug!(
        title = %item.title,
        pool = filtered.len(),
        fallback = filtered.is_empty(),
        "surprise spotlight picked"
    );

    Some(Surprise {
        state: state.with_spotlight(index),
        index,
        message: format!("Brought {} back to the stage.", item.title),
    })
}

fn pick(random: &mut dyn RandomSource, len: usize) -> usize {
    random.pick_index(len).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::SeededRandom;
    use crate::catalog::{test_item, Vibe};

    struct ScriptedRandom(Vec<usize>);

    impl RandomSource for ScriptedRandom {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.0.remove(0)
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            test_item("Doge", &["dog", "wow"], Some(Vibe::Wholesome), true),
            test_item("Success Kid", &["win"], Some(Vibe::Wholesome), true),
            test_item("Mocking SpongeBob", &["sarcasm"], Some(Vibe::Savage), false),
            test_item("Surprised Pikachu", &["Shock"], Some(Vibe::Chaotic), false),
            test_item("Is This a Pigeon?", &["anime"], None, false),
        ])
        .unwrap()
    }

    #[test]
    fn spotlight_leads_and_matching_items_follow() {
        let catalog =
            Catalog::new(vec![test_item("Doge", &[], None, false), test_item("Success Kid", &[], None, false)])
                .unwrap();
        let state = BrowseState::initial(&catalog).with_query("succ");

        let visible = compute_visible(&catalog, &state);
        assert_eq!(visible.titles(), vec!["Doge", "Success Kid"]);
        assert_eq!(visible.matching_count(), 1);
        assert!(!visible.is_empty_state());
    }

    #[test]
    fn every_non_spotlight_entry_matches_title_or_tag() {
        let catalog = sample_catalog();
        for query in ["o", "WIN", "shock", "pi", "zzz"] {
            let state = BrowseState::initial(&catalog).with_query(query);
            let visible = compute_visible(&catalog, &state);
            for item in &visible.entries()[1..] {
                assert!(
                    matches_query(item, query),
                    "{} should match {query}",
                    item.title
                );
            }
        }
    }

    #[test]
    fn spotlight_appears_exactly_once_first_regardless_of_filters() {
        let catalog = sample_catalog();
        let base = BrowseState::initial(&catalog).with_spotlight(2);
        let states = [
            base.clone(),
            base.with_query("mock"),
            base.with_query("doge"),
            base.with_vibe_filter(VibeFilter::Classic),
            base.with_vibe_filter(VibeFilter::Savage),
        ];
        for state in states {
            let visible = compute_visible(&catalog, &state);
            assert_eq!(visible.titles()[0], "Mocking SpongeBob");
            let count = visible
                .entries()
                .iter()
                .filter(|item| item.title == "Mocking SpongeBob")
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn empty_state_checks_matching_set_not_entries() {
        let catalog = sample_catalog();
        let state = BrowseState::initial(&catalog).with_query("no such meme");

        let visible = compute_visible(&catalog, &state);
        assert_eq!(visible.titles(), vec!["Doge"]);
        assert!(visible.is_empty_state());
    }

    #[test]
    fn classic_filter_keeps_catalog_order() {
        let catalog = sample_catalog();
        let state = BrowseState::initial(&catalog)
            .with_spotlight(4)
            .with_vibe_filter(VibeFilter::Classic);

        let visible = compute_visible(&catalog, &state);
        assert_eq!(
            visible.titles(),
            vec!["Is This a Pigeon?", "Doge", "Success Kid"]
        );
    }

    #[test]
    fn surprise_picks_from_filtered_pool() {
        let catalog = sample_catalog();
        let state = BrowseState::initial(&catalog).with_vibe_filter(VibeFilter::Wholesome);
        let pool = matching_indices(&catalog, state.query(), state.vibe_filter());
        let mut random = SeededRandom::new(7);

        for _ in 0..32 {
            let pick = surprise(&catalog, &state, &mut random).expect("non-empty catalog");
            assert!(pool.contains(&pick.index));
            assert_eq!(pick.state.spotlight(), Some(pick.index));
        }
    }

    #[test]
    fn surprise_falls_back_to_full_catalog_when_pool_empty() {
        let catalog = sample_catalog();
        let state = BrowseState::initial(&catalog).with_query("nothing matches");
        let mut random = ScriptedRandom(vec![3]);

        let pick = surprise(&catalog, &state, &mut random).expect("fallback pick");
        assert_eq!(pick.index, 3);
        assert_eq!(pick.message, "Brought Surprised Pikachu back to the stage.");
    }

    #[test]
    fn surprise_clamps_out_of_range_picks() {
        let catalog = sample_catalog();
        let state = BrowseState::initial(&catalog).with_vibe_filter(VibeFilter::Savage);
        let mut random = ScriptedRandom(vec![99]);

        let pick = surprise(&catalog, &state, &mut random).unwrap();
        assert_eq!(pick.index, 2);
    }

    #[test]
    fn surprise_on_empty_catalog_is_none() {
        let catalog = Catalog::default();
        let mut random = SeededRandom::new(1);
        assert!(surprise(&catalog, &BrowseState::initial(&catalog), &mut random).is_none());
    }
}
