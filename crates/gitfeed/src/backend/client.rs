//! Client for the post-sharing backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::types::{Author, AuthorsPage, CreatedPost, ExistsResponse, PollingStatus, PostPayload};
use crate::http::{HttpRequest, HttpTransport};
use crate::ingest::progress::{IngestProgress, ProgressCallback, emit};

/// Client for the backend endpoints the pipeline consumes: polling
/// status, the paginated author listing, the duplicate check, and
/// per-author post creation.
///
/// Mutating requests carry the CSRF token supplied at construction in
/// an `X-CSRFToken` header; the token itself is opaque to this crate.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    csrf_token: String,
}

impl BackendClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Whether GitHub polling is currently enabled, queried once per
    /// scheduler tick.
    pub async fn polling_enabled(&self) -> Result<bool, BackendError> {
        let url = format!("{}/github/polling/", self.base_url);
        let status: PollingStatus = self.get_json(&url).await?;
        Ok(status.is_enabled())
    }

    /// Fetch one page of the author listing.
    pub async fn authors_page(&self, page: u32, size: usize) -> Result<Vec<Author>, BackendError> {
        let url = format!("{}/api/authors/?page={}&size={}", self.base_url, page, size);
        let body: AuthorsPage = self.get_json(&url).await?;
        Ok(body.authors)
    }

    /// Enumerate all authors, page by page.
    ///
    /// Pages are accumulated until one comes back with fewer than
    /// `page_size` entries. A failure mid-walk propagates: the caller
    /// does not yet know the full author set, so the tick aborts.
    pub async fn all_authors(
        &self,
        page_size: usize,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<Vec<Author>, BackendError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let authors = self.authors_page(page, page_size).await?;
            let count = authors.len();
            all.extend(authors);

            emit(on_progress, IngestProgress::AuthorsPageFetched { page, count });

            if count < page_size {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Ask the backend whether an equivalent post already exists for
    /// the payload's author.
    pub async fn post_exists(&self, payload: &PostPayload) -> Result<bool, BackendError> {
        let url = format!("{}/api/post-exists/", self.base_url);
        let response: ExistsResponse = self.post_form(&url, payload).await?;
        Ok(response.exists)
    }

    /// Create a post for an author. A non-2xx response yields
    /// [`BackendError::Rejected`] carrying the backend's error body.
    pub async fn create_post(
        &self,
        author_id: &str,
        payload: &PostPayload,
    ) -> Result<CreatedPost, BackendError> {
        let url = format!(
            "{}/api/authors/{}/posts/",
            self.base_url,
            urlencoding::encode(author_id)
        );

        let request = self.form_request(&url, payload);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(BackendError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!(%url, body = %response.body, "post created");
        serde_json::from_str(&response.body).map_err(|e| BackendError::Decode {
            url,
            message: e.to_string(),
        })
    }

    fn form_request(&self, url: &str, payload: &PostPayload) -> HttpRequest {
        HttpRequest::post(url, payload.to_form_body())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-CSRFToken", self.csrf_token.clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let response = self.transport.send(HttpRequest::get(url)).await?;
        if !response.is_success() {
            return Err(BackendError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        serde_json::from_str(&response.body).map_err(|e| BackendError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &PostPayload,
    ) -> Result<T, BackendError> {
        let response = self.transport.send(self.form_request(url, payload)).await?;
        if !response.is_success() {
            return Err(BackendError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        serde_json::from_str(&response.body).map_err(|e| BackendError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse, MockTransport};

    const BASE: &str = "http://backend.test";

    fn client(mock: &MockTransport) -> BackendClient {
        BackendClient::new(Arc::new(mock.clone()), BASE, "csrf-tok")
    }

    fn authors_json(count: usize, offset: usize) -> String {
        let entries: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":"http://host/authors/{n}","host":"http://host/","displayName":"a{n}","github":"","profileImage":""}}"#,
                    n = i + offset
                )
            })
            .collect();
        format!(r#"{{"authors":[{}]}}"#, entries.join(","))
    }

    #[tokio::test]
    async fn polling_enabled_parses_literal_strings() {
        let mock = MockTransport::new();
        let url = format!("{BASE}/github/polling/");
        mock.push_json(HttpMethod::Get, &url, r#"{"poll":"True"}"#);
        mock.push_json(HttpMethod::Get, &url, r#"{"poll":"False"}"#);

        let client = client(&mock);
        assert!(client.polling_enabled().await.expect("enabled"));
        assert!(!client.polling_enabled().await.expect("disabled"));
    }

    #[tokio::test]
    async fn all_authors_stops_after_short_page() {
        let mock = MockTransport::new();
        mock.push_json(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=1&size=50"),
            authors_json(50, 0),
        );
        mock.push_json(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=2&size=50"),
            authors_json(50, 50),
        );
        mock.push_json(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=3&size=50"),
            authors_json(13, 100),
        );

        let authors = client(&mock).all_authors(50, None).await.expect("authors");
        assert_eq!(authors.len(), 113);
        // Page sizes [50, 50, 13] mean exactly 3 fetches.
        assert_eq!(mock.request_count_with_prefix(&format!("{BASE}/api/authors/")), 3);
    }

    #[tokio::test]
    async fn all_authors_stops_on_empty_first_page() {
        let mock = MockTransport::new();
        mock.push_json(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=1&size=50"),
            r#"{"authors":[]}"#,
        );

        let authors = client(&mock).all_authors(50, None).await.expect("authors");
        assert!(authors.is_empty());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn all_authors_propagates_mid_walk_failure() {
        let mock = MockTransport::new();
        mock.push_json(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=1&size=50"),
            authors_json(50, 0),
        );
        mock.push_response(
            HttpMethod::Get,
            format!("{BASE}/api/authors/?page=2&size=50"),
            HttpResponse::new(502, "bad gateway"),
        );

        let err = client(&mock).all_authors(50, None).await.expect_err("failure");
        assert!(matches!(err, BackendError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn post_exists_sends_form_payload_with_csrf_header() {
        let mock = MockTransport::new();
        mock.push_json(
            HttpMethod::Post,
            format!("{BASE}/api/post-exists/"),
            r#"{"exists":true}"#,
        );

        let payload = PostPayload::new("t", "d", "c", "http://host/authors/1");
        let exists = client(&mock).post_exists(&payload).await.expect("exists");
        assert!(exists);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value("x-csrftoken"), Some("csrf-tok"));
        assert_eq!(
            requests[0].header_value("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(requests[0].body.contains("visibility=PUBLIC"));
    }

    #[tokio::test]
    async fn create_post_escapes_author_id_in_route() {
        let mock = MockTransport::new();
        let author_id = "http://host/authors/1";
        let url = format!(
            "{BASE}/api/authors/{}/posts/",
            urlencoding::encode(author_id)
        );
        mock.push_json(HttpMethod::Post, &url, r#"{"id":"post-1","title":"t"}"#);

        let payload = PostPayload::new("t", "d", "c", author_id);
        let created = client(&mock)
            .create_post(author_id, &payload)
            .await
            .expect("created");
        assert_eq!(created.id.as_deref(), Some("post-1"));
    }

    #[tokio::test]
    async fn create_post_rejection_keeps_error_body() {
        let mock = MockTransport::new();
        let author_id = "a1";
        let url = format!("{BASE}/api/authors/a1/posts/");
        mock.push_response(
            HttpMethod::Post,
            &url,
            HttpResponse::new(400, r#"{"error":"title required"}"#),
        );

        let payload = PostPayload::new("t", "d", "c", author_id);
        let err = client(&mock)
            .create_post(author_id, &payload)
            .await
            .expect_err("rejected");
        match err {
            BackendError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("title required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
