use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::{FetchMiss, RawResponse, Transport};

/// [`Transport`] backed by a shared `reqwest` client. Redirects are followed.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, url: &Url) -> Result<RawResponse, reqwest::Error> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, FetchMiss>> + Send {
        async move {
            self.send(url)
                .await
                .map_err(|e| FetchMiss::Transport(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::LicenseFetcher;
    use crate::models::DependencyDescriptor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(Duration::from_secs(5), "license-fetchr-test").unwrap()
    }

    fn descriptor(server: &MockServer) -> DependencyDescriptor {
        let location = format!("{}/owner/repo.git", server.uri());
        DependencyDescriptor::new("repo", Url::parse(&location).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_falls_back_to_main_branch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/owner/repo/raw/master/LICENSE"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html>Not Found</html>", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/owner/repo/raw/main/LICENSE"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("MIT License\n", "text/plain; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/owner/repo/raw/master/LICENSE.md"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("md", "text/plain"))
            .expect(0)
            .mount(&server)
            .await;

        let fetcher = LicenseFetcher::new(transport());
        let license = fetcher.fetch_license(&descriptor(&server)).await.unwrap();

        assert_eq!(license.text, "MIT License\n");
        assert_eq!(license.source_url.path(), "/owner/repo/raw/main/LICENSE");
    }

    #[tokio::test]
    async fn test_not_found_everywhere() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(4)
            .mount(&server)
            .await;

        let fetcher = LicenseFetcher::new(transport());
        assert!(fetcher.fetch_license(&descriptor(&server)).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_miss() {
        let location = Url::parse("http://127.0.0.1:1/owner/repo").unwrap();
        let dep = DependencyDescriptor::new("repo", location).unwrap();

        let fetcher = LicenseFetcher::new(transport());
        assert!(fetcher.fetch_license(&dep).await.is_none());
    }
}
