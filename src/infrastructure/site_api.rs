//! 사이트 콘텐츠 디렉터리 API 연동 구현.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::application::ports::ContentDirectory;

const PAGES_ENDPOINT: &str = "/api/v1/pages";
const BLOGS_ENDPOINT: &str = "/api/v1/blogs";

/// `GET /api/v1/pages`, `GET /api/v1/blogs`를 호출하는 클라이언트.
pub struct SiteApiClient {
    client: Client,
    base_url: Url,
}

impl SiteApiClient {
    /// 요청 타임아웃을 적용한 클라이언트를 생성한다.
    pub fn new(base_url: Url, timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("siteterm/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self
            .base_url
            .join(endpoint)
            .with_context(|| format!("invalid endpoint {endpoint}"))?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("{endpoint}: request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("{endpoint} returned {status}");
        }

        let body = resp
            .text()
            .await
            .with_context(|| format!("{endpoint}: failed to read body"))?;
        serde_json::from_str(&body).with_context(|| format!("{endpoint}: invalid JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct PagesResponse {
    pages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BlogsResponse {
    blogs: Vec<String>,
}

#[async_trait]
impl ContentDirectory for SiteApiClient {
    async fn list_pages(&self) -> Result<Vec<String>> {
        let resp: PagesResponse = self.get_json(PAGES_ENDPOINT).await?;
        Ok(resp.pages)
    }

    async fn list_blogs(&self) -> Result<Vec<String>> {
        let resp: BlogsResponse = self.get_json(BLOGS_ENDPOINT).await?;
        Ok(resp.blogs)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> SiteApiClient {
        SiteApiClient::new(Url::parse(&server.uri()).unwrap(), 2000).unwrap()
    }

    #[tokio::test]
    async fn lists_pages_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"pages": ["videos", "projects", "about"]})),
            )
            .mount(&server)
            .await;

        let pages = client_for(&server).await.list_pages().await.unwrap();

        assert_eq!(pages, vec!["videos", "projects", "about"]);
    }

    #[tokio::test]
    async fn lists_blogs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blogs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"blogs": ["Alpha", "Beta"]})),
            )
            .mount(&server)
            .await;

        let blogs = client_for(&server).await.list_blogs().await.unwrap();

        assert_eq!(blogs, vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blogs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).await.list_blogs().await.unwrap_err();

        assert!(format!("{err:#}").contains("/api/v1/blogs returned 500"));
    }

    #[tokio::test]
    async fn payload_without_expected_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.list_pages().await.unwrap_err();

        assert!(format!("{err:#}").contains("invalid JSON"));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let client = SiteApiClient::new(Url::parse("http://127.0.0.1:9/").unwrap(), 500).unwrap();

        assert!(client.list_pages().await.is_err());
    }
}
