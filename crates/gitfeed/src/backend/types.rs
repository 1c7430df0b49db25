//! Backend API data types.

use serde::Deserialize;

/// One author record from the backend's paginated author listing.
///
/// Fetched fresh every polling cycle, never cached across cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub host: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    /// GitHub profile URL, or empty when the author has none.
    #[serde(default)]
    pub github: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: String,
}

/// Response body of the author listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthorsPage {
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// Response body of the polling-status endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct PollingStatus {
    pub poll: String,
}

impl PollingStatus {
    pub(crate) fn is_enabled(&self) -> bool {
        self.poll == "True"
    }
}

/// Response body of the duplicate-check endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ExistsResponse {
    pub exists: bool,
}

/// Post visibility understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
}

impl Visibility {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
        }
    }
}

/// A normalized post payload, constructed once by the transformer and
/// consumed by the duplicate check and (if novel) post creation.
///
/// Construction goes through [`PostPayload::new`] so a payload always
/// carries every field the backend requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPayload {
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub content: String,
    pub visibility: Visibility,
    pub author_id: String,
}

impl PostPayload {
    /// Build a plain-text public post for an author.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            content_type: "text/plain".to_string(),
            content: content.into(),
            visibility: Visibility::Public,
            author_id: author_id.into(),
        }
    }

    /// Encode the payload as `application/x-www-form-urlencoded`,
    /// the body shape both backend POST endpoints consume.
    #[must_use]
    pub fn to_form_body(&self) -> String {
        let pairs = [
            ("title", self.title.as_str()),
            ("author_id", self.author_id.as_str()),
            ("description", self.description.as_str()),
            ("contentType", self.content_type.as_str()),
            ("content", self.content.as_str()),
            ("visibility", self.visibility.as_str()),
        ];
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The post created by the backend, as much of it as the pipeline
/// cares about. The full response body is logged at creation time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
