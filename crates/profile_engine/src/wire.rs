//! JSON contracts of the profile service endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /search-linkedin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub name: String,
    pub university: String,
    pub degree_status: String,
}

/// One element of the `/search-linkedin` response array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateRecord {
    pub url: String,
    pub title: String,
}

/// Body of `POST /profile-details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DetailParams<'a> {
    pub linkedin_url: &'a str,
}

/// Raw `/profile-details` response. Both the generic `social_links` list and
/// the older named `github_url`/`personal_website` fields are accepted.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailResponse {
    pub summary: String,
    #[serde(default)]
    pub social_links: Option<Vec<String>>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub personal_website: Option<String>,
}

/// Profile detail with every link flattened into one ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub summary: String,
    pub links: Vec<String>,
}

impl From<DetailResponse> for ProfileRecord {
    fn from(raw: DetailResponse) -> Self {
        let named = [raw.github_url, raw.personal_website];
        let mut links: Vec<String> = Vec::new();
        for link in raw.social_links.into_iter().flatten().chain(named.into_iter().flatten()) {
            let link = link.trim();
            if link.is_empty() || links.iter().any(|seen| seen == link) {
                continue;
            }
            links.push(link.to_string());
        }
        Self {
            summary: raw.summary,
            links,
        }
    }
}
