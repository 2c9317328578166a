use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::ExtractedEntity;

/// Summary counts over one extraction result.
///
/// Derived on demand from an entity sequence and discarded with it; never
/// stored apart from the entities it was computed from. `entity_types` keeps
/// first-seen order and only contains types that actually occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_entities: usize,
    pub entity_types: IndexMap<String, usize>,
}

impl Statistics {
    /// Single pass; cannot fail. An empty sequence yields zero counts.
    #[must_use]
    pub fn aggregate(entities: &[ExtractedEntity]) -> Self {
        let mut stats = Self::default();
        for entity in entities {
            stats.total_entities += 1;
            *stats
                .entity_types
                .entry(entity.entity_type.clone())
                .or_insert(0) += 1;
        }
        stats
    }
}
