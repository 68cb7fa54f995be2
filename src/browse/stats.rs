use std::collections::HashSet;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub distinct_vibes: usize,
    pub classics: usize,
}

/// Computed over the whole catalog; filters never affect it.
/// Items without a vibe form one bucket of their own.
pub fn aggregate_stats(catalog: &Catalog) -> CatalogStats {
    let vibes: HashSet<_> = catalog.items().iter().map(|item| item.vibe).collect();
    CatalogStats {
        total: catalog.len(),
        distinct_vibes: vibes.len(),
        classics: catalog.items().iter().filter(|item| item.classic).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{test_item, Vibe};

    #[test]
    fn absent_vibe_counts_as_its_own_bucket() {
        let catalog = Catalog::new(vec![
            test_item("A", &[], Some(Vibe::Wholesome), true),
            test_item("B", &[], Some(Vibe::Wholesome), false),
            test_item("C", &[], None, false),
            test_item("D", &[], None, true),
        ])
        .unwrap();

        assert_eq!(
            aggregate_stats(&catalog),
            CatalogStats {
                total: 4,
                distinct_vibes: 2,
                classics: 2,
            }
        );
    }

    #[test]
    fn no_absent_bucket_when_every_item_has_a_vibe() {
        let catalog = Catalog::new(vec![
            test_item("A", &[], Some(Vibe::Chaotic), false),
            test_item("B", &[], Some(Vibe::Savage), false),
        ])
        .unwrap();
        assert_eq!(aggregate_stats(&catalog).distinct_vibes, 2);
    }

    #[test]
    fn bundled_catalog_stats() {
        let catalog = Catalog::bundled().unwrap();
        let stats = aggregate_stats(&catalog);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.distinct_vibes, 4);
        assert_eq!(stats.classics, 3);
    }

    #[test]
    fn empty_catalog_has_zero_stats() {
        assert_eq!(aggregate_stats(&Catalog::default()), CatalogStats::default());
    }
}
