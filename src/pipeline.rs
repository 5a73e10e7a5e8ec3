//! Sequential resolve/check/classify loop over category members.

use log::{info, warn};

use crate::model::{CategoryMember, EntityLink, ResolvedArtist};
use crate::sources::MetadataCatalog;
use crate::throttle::RequestGate;

/// Wikidata property key for the MusicBrainz artist id.
pub const MUSICBRAINZ_ARTIST_PROPERTY: &str = "P434";

const PROGRESS_INTERVAL: usize = 10;

/// Classifies every member in order, keeping those that lack the MusicBrainz
/// artist claim. Per-member failures are downgraded to tagged report rows and
/// never abort the batch. The request gate is acquired after each member.
pub fn filter_members_without_claim(
    catalog: &dyn MetadataCatalog,
    members: &[CategoryMember],
    gate: &dyn RequestGate,
) -> Vec<ResolvedArtist> {
    let total = members.len();
    info!("Checking {total} artists for MusicBrainz IDs");

    let mut missing = Vec::new();
    for (index, member) in members.iter().enumerate() {
        let processed = index + 1;
        if processed % PROGRESS_INTERVAL == 0 {
            info!(
                "Progress: {processed}/{total} ({:.1}%)",
                processed as f64 / total as f64 * 100.0
            );
        }

        match classify_member(catalog, member) {
            Ok(Some(resolved)) => missing.push(resolved),
            Ok(None) => {}
            Err(cause) => {
                warn!("Error checking {}: {cause}", member.title);
                missing.push(ResolvedArtist {
                    title: member.title.clone(),
                    pageid: member.pageid,
                    link: EntityLink::ResolutionFailed(cause),
                });
            }
        }

        gate.acquire();
    }
    missing
}

/// Returns `Ok(None)` when the member already carries the tracked claim.
fn classify_member(
    catalog: &dyn MetadataCatalog,
    member: &CategoryMember,
) -> Result<Option<ResolvedArtist>, String> {
    let Some(entity_id) = catalog.wikibase_item(&member.title)? else {
        // No linked entity means no MusicBrainz claim either.
        return Ok(Some(ResolvedArtist {
            title: member.title.clone(),
            pageid: member.pageid,
            link: EntityLink::NotLinked,
        }));
    };

    if catalog.entity_has_claim(&entity_id, MUSICBRAINZ_ARTIST_PROPERTY)? {
        return Ok(None);
    }

    Ok(Some(ResolvedArtist {
        title: member.title.clone(),
        pageid: member.pageid,
        link: EntityLink::Found(entity_id),
    }))
}

#[cfg(test)]
mod tests {
    use super::{filter_members_without_claim, MUSICBRAINZ_ARTIST_PROPERTY};
    use crate::model::{CategoryMember, EntityLink};
    use crate::sources::{CategoryPage, MetadataCatalog};
    use crate::throttle::NoGate;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeCatalog {
        // title -> linked entity id; absent title resolves to no link.
        links: HashMap<String, String>,
        // entity ids that carry the MusicBrainz artist claim.
        claimed: Vec<String>,
        // titles whose resolution fails.
        failing_titles: Vec<String>,
        claim_calls: Cell<usize>,
    }

    impl FakeCatalog {
        fn with_link(mut self, title: &str, entity_id: &str) -> Self {
            self.links.insert(title.to_string(), entity_id.to_string());
            self
        }

        fn with_claim(mut self, entity_id: &str) -> Self {
            self.claimed.push(entity_id.to_string());
            self
        }

        fn with_failure(mut self, title: &str) -> Self {
            self.failing_titles.push(title.to_string());
            self
        }
    }

    impl MetadataCatalog for FakeCatalog {
        fn category_members_page(
            &self,
            _category: &str,
            _continue_token: Option<&str>,
        ) -> Result<CategoryPage, String> {
            Ok(CategoryPage {
                members: Vec::new(),
                continue_token: None,
            })
        }

        fn wikibase_item(&self, title: &str) -> Result<Option<String>, String> {
            if self.failing_titles.iter().any(|failing| failing == title) {
                return Err("socket timeout".to_string());
            }
            Ok(self.links.get(title).cloned())
        }

        fn entity_has_claim(&self, entity_id: &str, property: &str) -> Result<bool, String> {
            self.claim_calls.set(self.claim_calls.get() + 1);
            assert_eq!(property, MUSICBRAINZ_ARTIST_PROPERTY);
            Ok(self.claimed.iter().any(|claimed| claimed == entity_id))
        }
    }

    fn member(title: &str, pageid: u64) -> CategoryMember {
        CategoryMember {
            title: title.to_string(),
            pageid,
        }
    }

    #[test]
    fn test_unlinked_member_skips_claim_lookup() {
        let catalog = FakeCatalog::default();
        let members = vec![member("Unlinked Singer", 1)];

        let missing = filter_members_without_claim(&catalog, &members, &NoGate);

        assert_eq!(catalog.claim_calls.get(), 0);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].link, EntityLink::NotLinked);
    }

    #[test]
    fn test_member_with_claim_is_excluded() {
        let catalog = FakeCatalog::default()
            .with_link("Known Singer", "Q1")
            .with_claim("Q1");
        let members = vec![member("Known Singer", 1)];

        let missing = filter_members_without_claim(&catalog, &members, &NoGate);

        assert!(missing.is_empty());
        assert_eq!(catalog.claim_calls.get(), 1);
    }

    #[test]
    fn test_member_without_claim_keeps_entity_id() {
        let catalog = FakeCatalog::default().with_link("Gap Singer", "Q2");
        let members = vec![member("Gap Singer", 7)];

        let missing = filter_members_without_claim(&catalog, &members, &NoGate);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].pageid, 7);
        assert_eq!(missing[0].link, EntityLink::Found("Q2".to_string()));
    }

    #[test]
    fn test_failed_member_is_tagged_and_batch_continues() {
        let catalog = FakeCatalog::default()
            .with_failure("Broken Singer")
            .with_link("Gap Singer", "Q2");
        let members = vec![member("Broken Singer", 1), member("Gap Singer", 2)];

        let missing = filter_members_without_claim(&catalog, &members, &NoGate);

        assert_eq!(missing.len(), 2);
        assert_eq!(
            missing[0].link,
            EntityLink::ResolutionFailed("socket timeout".to_string())
        );
        assert_eq!(missing[1].link, EntityLink::Found("Q2".to_string()));
    }

    #[test]
    fn test_output_preserves_input_order_minus_exclusions() {
        let catalog = FakeCatalog::default()
            .with_link("A", "Q1")
            .with_claim("Q1")
            .with_link("B", "Q2")
            .with_link("C", "Q3");
        let members = vec![member("C", 3), member("A", 1), member("B", 2)];

        let missing = filter_members_without_claim(&catalog, &members, &NoGate);

        let titles: Vec<&str> = missing.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B"]);
    }

    #[test]
    fn test_category_scenario_end_to_end() {
        // A carries the claim (excluded), B is linked without it (kept with
        // its id), C has no linked entity (kept as not linked).
        let catalog = FakeCatalog::default()
            .with_link("A", "Q1")
            .with_claim("Q1")
            .with_link("B", "Q2");
        let members = vec![member("A", 1), member("B", 2), member("C", 3)];

        let mut missing = filter_members_without_claim(&catalog, &members, &NoGate);
        missing.sort_by(|left, right| left.title.cmp(&right.title));

        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0].title, "B");
        assert_eq!(missing[0].link, EntityLink::Found("Q2".to_string()));
        assert_eq!(missing[1].title, "C");
        assert_eq!(missing[1].link, EntityLink::NotLinked);
    }
}
