//! Metadata-source abstractions and the category enumeration loop.

pub mod mediawiki;

use crate::model::CategoryMember;

/// Main (article) namespace id in category listings.
const ARTICLE_NAMESPACE: i64 = 0;

/// Listing entry as delivered by the category endpoint, before filtering.
#[derive(Debug, Clone)]
pub struct RawCategoryMember {
    pub title: String,
    pub pageid: u64,
    pub namespace: i64,
}

/// One page of category-member listings.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub members: Vec<RawCategoryMember>,
    pub continue_token: Option<String>,
}

/// Interface implemented by concrete metadata-source adapters.
pub trait MetadataCatalog {
    /// Fetches one page of category members, resuming from `continue_token`.
    fn category_members_page(
        &self,
        category: &str,
        continue_token: Option<&str>,
    ) -> Result<CategoryPage, String>;

    /// Resolves the Wikidata entity id linked to an article title, if any.
    fn wikibase_item(&self, title: &str) -> Result<Option<String>, String>;

    /// Reports whether the entity's claim set contains `property`.
    fn entity_has_claim(&self, entity_id: &str, property: &str) -> Result<bool, String>;
}

/// Collects every article-namespace member of `category`, following the
/// continuation token until the listing is exhausted. Members are returned
/// in API-delivered order. Listing failures propagate to the caller.
pub fn collect_category_members(
    catalog: &dyn MetadataCatalog,
    category: &str,
) -> Result<Vec<CategoryMember>, String> {
    let mut members = Vec::new();
    let mut continue_token: Option<String> = None;

    loop {
        let page = catalog.category_members_page(category, continue_token.as_deref())?;
        members.extend(page.members.into_iter().filter_map(|member| {
            (member.namespace == ARTICLE_NAMESPACE).then(|| CategoryMember {
                title: member.title,
                pageid: member.pageid,
            })
        }));
        match page.continue_token {
            Some(token) => continue_token = Some(token),
            None => break,
        }
    }

    Ok(members)
}
