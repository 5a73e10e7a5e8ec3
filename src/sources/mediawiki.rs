//! MediaWiki-backed metadata catalog speaking to Wikipedia and Wikidata.

use std::time::Duration;

use serde_json::Value;

use crate::sources::{CategoryPage, MetadataCatalog, RawCategoryMember};

const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";
const API_USER_AGENT: &str =
    "brainzgap/0.1.0 (https://github.com/brainzgap/brainzgap; contact: category reports)";

/// Wikipedia/Wikidata adapter backed by `ureq`.
pub struct MediaWikiCatalog {
    http_client: ureq::Agent,
    wikipedia_api_url: String,
}

impl MediaWikiCatalog {
    /// Creates an adapter bound to one Wikipedia language edition.
    pub fn new(language: &str) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(15))
            .timeout_write(Duration::from_secs(15))
            .build();
        Self {
            http_client,
            wikipedia_api_url: format!("https://{language}.wikipedia.org/w/api.php"),
        }
    }

    fn api_url(base: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{base}?");
        for (index, (key, value)) in params.iter().enumerate() {
            if index > 0 {
                url.push('&');
            }
            url.push_str(key);
            url.push('=');
            url.push_str(urlencoding::encode(value).as_ref());
        }
        url
    }

    fn request_json(
        &self,
        base: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, String> {
        let url = Self::api_url(base, params);
        let response = self
            .http_client
            .get(&url)
            .set("User-Agent", API_USER_AGENT)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| format!("MediaWiki request failed ({action}): {err}"))?;
        response
            .into_json()
            .map_err(|err| format!("MediaWiki response parse failed ({action}): {err}"))
    }

    fn parse_member_page(payload: &Value) -> Result<CategoryPage, String> {
        let entries = payload
            .get("query")
            .and_then(|value| value.get("categorymembers"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                "categorymembers payload missing query.categorymembers".to_string()
            })?;

        let members = entries
            .iter()
            .filter_map(|entry| {
                Some(RawCategoryMember {
                    title: entry.get("title")?.as_str()?.to_string(),
                    pageid: entry.get("pageid")?.as_u64()?,
                    namespace: entry.get("ns").and_then(Value::as_i64).unwrap_or(-1),
                })
            })
            .collect();

        let continue_token = payload
            .get("continue")
            .and_then(|value| value.get("cmcontinue"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        Ok(CategoryPage {
            members,
            continue_token,
        })
    }

    fn parse_wikibase_item(payload: &Value) -> Option<String> {
        // The query can surface several page entries (redirects, missing-page
        // placeholders); the first property-bearing entry in iteration order
        // wins. The upstream API does not guarantee a stronger ordering.
        let pages = payload
            .get("query")
            .and_then(|value| value.get("pages"))
            .and_then(Value::as_object)?;
        for page in pages.values() {
            if let Some(item) = page
                .get("pageprops")
                .and_then(|props| props.get("wikibase_item"))
                .and_then(Value::as_str)
            {
                return Some(item.to_string());
            }
        }
        None
    }

    fn claim_present(payload: &Value, entity_id: &str, property: &str) -> bool {
        // A missing entity or claims collection reads as claim absent.
        payload
            .get("entities")
            .and_then(|entities| entities.get(entity_id))
            .and_then(|entity| entity.get("claims"))
            .and_then(|claims| claims.get(property))
            .is_some()
    }
}

impl MetadataCatalog for MediaWikiCatalog {
    fn category_members_page(
        &self,
        category: &str,
        continue_token: Option<&str>,
    ) -> Result<CategoryPage, String> {
        let prefixed_title = format!("Category:{category}");
        let mut params = vec![
            ("action", "query"),
            ("list", "categorymembers"),
            ("cmtitle", prefixed_title.as_str()),
            ("cmlimit", "max"),
            ("format", "json"),
        ];
        if let Some(token) = continue_token {
            params.push(("cmcontinue", token));
        }
        let payload = self.request_json(&self.wikipedia_api_url, "categorymembers", &params)?;
        Self::parse_member_page(&payload)
    }

    fn wikibase_item(&self, title: &str) -> Result<Option<String>, String> {
        let payload = self.request_json(
            &self.wikipedia_api_url,
            "pageprops",
            &[
                ("action", "query"),
                ("prop", "pageprops"),
                ("titles", title),
                ("format", "json"),
            ],
        )?;
        Ok(Self::parse_wikibase_item(&payload))
    }

    fn entity_has_claim(&self, entity_id: &str, property: &str) -> Result<bool, String> {
        let payload = self.request_json(
            WIKIDATA_API_URL,
            "wbgetentities",
            &[
                ("action", "wbgetentities"),
                ("ids", entity_id),
                ("props", "claims"),
                ("format", "json"),
            ],
        )?;
        Ok(Self::claim_present(&payload, entity_id, property))
    }
}
