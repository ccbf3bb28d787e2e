//! HTTP client wrapper for interacting with Qdrant.

use crate::config::Config;
use crate::qdrant::admin::CollectionAdmin;
use crate::qdrant::types::{
    CollectionInfo, CollectionSpec, ListCollectionsResponse, Probe, QdrantError,
    parse_collection_info,
};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

const USER_AGENT: &str = concat!("docqa-ops/", env!("CARGO_PKG_VERSION"));

/// Lightweight HTTP client for Qdrant operations.
#[derive(Clone)]
pub struct QdrantService {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
}

impl QdrantService {
    /// Construct a client for the Qdrant instance described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, QdrantError> {
        Self::with_base_url(
            &config.qdrant_url(),
            config.qdrant_api_key.clone(),
            config.request_timeout,
        )
    }

    /// Construct a client against an explicit base URL.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, QdrantError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let base_url = normalize_base_url(base_url).map_err(QdrantError::InvalidUrl)?;
        tracing::debug!(
            url = %base_url,
            has_api_key = %api_key
                .as_deref()
                .map(|value| !value.is_empty())
                .unwrap_or(false),
            timeout_secs = timeout.as_secs(),
            "Initialized Qdrant HTTP client"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Copy of this client that never sends the API key.
    pub fn without_api_key(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: None,
        }
    }

    /// Normalized base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and return the status and body regardless of the status code.
    ///
    /// Only transport failures surface as errors.
    pub async fn probe(&self, path: &str) -> Result<Probe, QdrantError> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(path, status = %status, "Probe completed");
        Ok(Probe { status, body })
    }

    /// Retrieve the names of all collections present in Qdrant.
    pub async fn list_collections(&self) -> Result<Vec<String>, QdrantError> {
        let response = self.request(Method::GET, "collections").send().await?;

        if response.status().is_success() {
            let payload: ListCollectionsResponse = response.json().await?;
            let names = payload
                .result
                .collections
                .into_iter()
                .map(|collection| collection.name)
                .collect();
            Ok(names)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = QdrantError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Failed to list collections");
            Err(error)
        }
    }

    /// Drop a collection.
    pub async fn delete_collection(&self, collection_name: &str) -> Result<(), QdrantError> {
        let response = self
            .request(Method::DELETE, &format!("collections/{collection_name}"))
            .send()
            .await?;

        self.ensure_success(response, || {
            tracing::debug!(collection = collection_name, "Collection deleted");
        })
        .await
    }

    /// Create a collection with the vector configuration in `spec`.
    pub async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), QdrantError> {
        tracing::debug!(
            collection = %spec.name,
            vector_size = spec.vectors.size,
            distance = %spec.vectors.distance,
            "Creating collection"
        );
        let response = self
            .request(Method::PUT, &format!("collections/{}", spec.name))
            .json(&spec.create_body())
            .send()
            .await?;

        self.ensure_success(response, || {
            tracing::debug!(collection = %spec.name, "Collection created");
        })
        .await
    }

    /// Fetch status, counts and configuration of a collection.
    pub async fn get_collection(
        &self,
        collection_name: &str,
    ) -> Result<CollectionInfo, QdrantError> {
        let response = self
            .request(Method::GET, &format!("collections/{collection_name}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let error = QdrantError::UnexpectedStatus { status, body };
            tracing::error!(collection = collection_name, error = %error, "Failed to read collection");
            return Err(error);
        }
        parse_collection_info(&body)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format_endpoint(&self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(api_key) = &self.api_key
            && !api_key.is_empty()
        {
            req = req.header("api-key", api_key);
        }
        req
    }

    async fn ensure_success<F>(
        &self,
        response: reqwest::Response,
        on_success: F,
    ) -> Result<(), QdrantError>
    where
        F: FnOnce(),
    {
        if response.status().is_success() {
            on_success();
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = QdrantError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Qdrant request failed");
            Err(error)
        }
    }
}

#[async_trait]
impl CollectionAdmin for QdrantService {
    async fn list_collections(&self) -> Result<Vec<String>, QdrantError> {
        QdrantService::list_collections(self).await
    }

    async fn delete_collection(&self, name: &str) -> Result<(), QdrantError> {
        QdrantService::delete_collection(self, name).await
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), QdrantError> {
        QdrantService::create_collection(self, spec).await
    }

    async fn get_collection(&self, name: &str) -> Result<CollectionInfo, QdrantError> {
        QdrantService::get_collection(self, name).await
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

fn format_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qdrant::types::{CollectionStatus, Distance};
    use httpmock::{
        Method::{DELETE, GET, PUT},
        MockServer,
    };
    use serde_json::json;

    fn service(server: &MockServer, api_key: Option<&str>) -> QdrantService {
        QdrantService::with_base_url(
            &server.base_url(),
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        assert_eq!(
            format_endpoint("http://localhost:6333/", "/collections/docs"),
            "http://localhost:6333/collections/docs"
        );
        assert_eq!(
            normalize_base_url("http://localhost:6333/").expect("url"),
            "http://localhost:6333/"
        );
        assert!(normalize_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn lists_collection_names() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/collections");
                then.status(200).json_body(json!({
                    "status": "ok",
                    "time": 0.0,
                    "result": { "collections": [{ "name": "a" }, { "name": "b" }] }
                }));
            })
            .await;

        let names = service(&server, None)
            .list_collections()
            .await
            .expect("names");
        mock.assert_async().await;
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn create_sends_vector_params_and_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/collections/docs")
                    .header("api-key", "secret")
                    .json_body(json!({ "vectors": { "size": 1536, "distance": "Cosine" } }));
                then.status(200)
                    .json_body(json!({ "status": "ok", "time": 0.0, "result": true }));
            })
            .await;

        service(&server, Some("secret"))
            .create_collection(&CollectionSpec::new("docs", 1536))
            .await
            .expect("create");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_surfaces_unexpected_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/collections/docs");
                then.status(500).body("storage failure");
            })
            .await;

        let err = service(&server, None)
            .delete_collection("docs")
            .await
            .unwrap_err();
        match err {
            QdrantError::UnexpectedStatus { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "storage failure");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_collection_decodes_info() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/collections/docs");
                then.status(200).json_body(json!({
                    "status": "ok",
                    "time": 0.0,
                    "result": {
                        "status": "green",
                        "points_count": 3,
                        "vectors_count": 3,
                        "config": { "params": { "vectors": { "size": 8, "distance": "Dot" } } }
                    }
                }));
            })
            .await;

        let info = service(&server, None)
            .get_collection("docs")
            .await
            .expect("info");
        assert_eq!(info.status, CollectionStatus::Green);
        assert_eq!(info.points_count, Some(3));
        assert_eq!(info.vector_params().map(|p| p.distance), Some(Distance::Dot));
    }

    #[tokio::test]
    async fn probe_returns_non_success_status_without_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/collections/missing");
                then.status(404).body("Not found");
            })
            .await;

        let probe = service(&server, None)
            .probe("collections/missing")
            .await
            .expect("probe");
        assert_eq!(probe.status.as_u16(), 404);
        assert_eq!(probe.body, "Not found");
    }

    #[tokio::test]
    async fn without_api_key_omits_header() {
        let server = MockServer::start_async().await;
        let keyed = server
            .mock_async(|when, then| {
                when.method(GET).path("/health").header_exists("api-key");
                then.status(200).body("ok");
            })
            .await;

        let keyless = service(&server, Some("secret"))
            .without_api_key()
            .probe("health")
            .await
            .expect("probe");
        assert_eq!(keyless.status.as_u16(), 404);
        keyed.assert_hits_async(0).await;

        let keyed_probe = service(&server, Some("secret"))
            .probe("health")
            .await
            .expect("probe");
        assert_eq!(keyed_probe.status.as_u16(), 200);
        keyed.assert_hits_async(1).await;
    }
}
