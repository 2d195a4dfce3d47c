//! API client for the backup monitor service

use anyhow::{anyhow, Context, Result};
use monitor_lib::{
    filter::SearchResults,
    views::{
        AlertsView, ClusterDetailView, ClustersView, DashboardView, ReportsView,
        WorkflowDetailView, WorkflowsView,
    },
    Alert,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the monitor's view endpoints
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API URL: {}", base_url);
        }

        Ok(Self { client, base_url })
    }

    /// Build `<base>/<segments...>?<query>`, percent-encoding every part
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a request, accepting `accept` in addition to any 2xx status
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        accept: Option<StatusCode>,
    ) -> Result<T> {
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() && Some(status) != accept {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(segments, query)?;
        self.send(self.client.get(url), None).await
    }

    /// Make a POST request without a body
    pub async fn post<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments, &[])?;
        self.send(self.client.post(url), None).await
    }

    pub async fn dashboard(&self) -> Result<DashboardView> {
        self.get(&["api", "v1", "dashboard"], &[]).await
    }

    pub async fn clusters(&self, search: Option<&str>) -> Result<ClustersView> {
        self.get(&["api", "v1", "clusters"], &optional("q", search))
            .await
    }

    pub async fn cluster(&self, id: &str, tab: Option<&str>) -> Result<ClusterDetailView> {
        self.get(&["api", "v1", "clusters", id], &optional("tab", tab))
            .await
    }

    pub async fn workflows(&self, search: Option<&str>) -> Result<WorkflowsView> {
        self.get(&["api", "v1", "workflows"], &optional("q", search))
            .await
    }

    /// Workflow detail; a 404 still carries the not-found view
    pub async fn workflow(&self, slug: &str) -> Result<WorkflowDetailView> {
        let url = self.endpoint(&["api", "v1", "workflows", slug], &[])?;
        self.send(self.client.get(url), Some(StatusCode::NOT_FOUND))
            .await
    }

    pub async fn alerts(&self, tab: Option<&str>) -> Result<AlertsView> {
        self.get(&["api", "v1", "alerts"], &optional("tab", tab))
            .await
    }

    pub async fn acknowledge_alert(&self, id: u32) -> Result<Alert> {
        let id = id.to_string();
        self.post(&["api", "v1", "alerts", &id, "acknowledge"]).await
    }

    pub async fn reports(&self, tab: Option<&str>) -> Result<ReportsView> {
        self.get(&["api", "v1", "reports"], &optional("tab", tab))
            .await
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        self.get(&["api", "v1", "search"], &[("q", query)]).await
    }
}

fn optional<'a>(key: &'a str, value: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    value.map(|v| vec![(key, v)]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const WORKFLOW_NOT_FOUND_BODY: &str =
        r#"{"state":"not_found","slug":"missing","message":"Workflow not found"}"#;

    #[test]
    fn test_endpoint_encodes_segments_and_query() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        let url = client
            .endpoint(&["api", "v1", "workflows", "a b"], &[("q", "us west")])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/workflows/a%20b?q=us+west"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::new("http://monitor.internal/proxy").unwrap();
        let url = client.endpoint(&["api", "v1", "dashboard"], &[]).unwrap();

        assert_eq!(url.as_str(), "http://monitor.internal/proxy/api/v1/dashboard");
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/search")
            .match_query(Matcher::UrlEncoded("q".into(), "storage".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"query":"storage","clusters":[],"workflows":[],"alerts":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let results = client.search("storage").await.unwrap();

        assert_eq!(results.query, "storage");
        assert_eq!(results.total(), 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_workflow_not_found_is_a_view() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/workflows/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(WORKFLOW_NOT_FOUND_BODY)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let view = client.workflow("missing").await.unwrap();

        assert!(!view.is_found());
    }

    #[tokio::test]
    async fn test_error_status_becomes_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/clusters/nowhere")
            .with_status(404)
            .with_body(r#"{"error":{"code":"CLUSTER_NOT_FOUND","message":"No cluster exists with id 'nowhere'"}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.cluster("nowhere", None).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("CLUSTER_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_acknowledge_posts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/alerts/2/acknowledge")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":2,"title":"Backup Job Failed","severity":"Critical","category":"Backup",
                "source":"Exchange Database Backup","time":"15 min ago",
                "description":"Exchange backup failed","acknowledged":true}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let alert = client.acknowledge_alert(2).await.unwrap();

        assert!(alert.acknowledged);
        mock.assert_async().await;
    }
}
