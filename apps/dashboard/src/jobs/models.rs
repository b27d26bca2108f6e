use serde::{Deserialize, Deserializer, Serialize};

/// A single posting as returned by the listing service. Read-only once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub company_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub category: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub candidate_required_location: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub url: String,
}

impl JobPosting {
    /// Text handed to the embedder: title followed by description.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Body of the listing endpoint. A missing `jobs` key is an empty listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
