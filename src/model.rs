//! Pipeline data types shared by enumeration, filtering, and rendering.

/// Article-namespace member of the scanned category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMember {
    pub title: String,
    pub pageid: u64,
}

/// Outcome of resolving a member's Wikidata link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLink {
    /// Linked entity exists but lacks the MusicBrainz artist claim.
    Found(String),
    /// The article has no linked Wikidata entity.
    NotLinked,
    /// Lookup failed; the cause is retained for the report.
    ResolutionFailed(String),
}

impl EntityLink {
    /// Console label used by the end-of-run preview.
    pub fn status_label(&self) -> String {
        match self {
            Self::Found(entity_id) => entity_id.clone(),
            Self::NotLinked => "No Wikidata".to_string(),
            Self::ResolutionFailed(_) => "error".to_string(),
        }
    }
}

/// Report row: a category member together with its link classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    pub title: String,
    pub pageid: u64,
    pub link: EntityLink,
}

#[cfg(test)]
mod tests {
    use super::EntityLink;

    #[test]
    fn test_status_labels() {
        assert_eq!(
            EntityLink::Found("Q42".to_string()).status_label(),
            "Q42"
        );
        assert_eq!(EntityLink::NotLinked.status_label(), "No Wikidata");
        assert_eq!(
            EntityLink::ResolutionFailed("timeout".to_string()).status_label(),
            "error"
        );
    }
}
