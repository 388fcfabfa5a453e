//! Catalog API client.

use std::time::Duration;

use async_trait::async_trait;
use ferjo_catalog::catalog::ProductRecord;

use crate::endpoint::ApiEndpoint;
use crate::error::LoadError;
use crate::source::{parse_body, ProductSource};

/// Source that fetches `?path=products` from the catalog web endpoint.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    endpoint: ApiEndpoint,
    http: reqwest::Client,
}

impl HttpProductSource {
    /// Create a source. `timeout` bounds the whole request when set.
    pub fn new(endpoint: ApiEndpoint, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, LoadError> {
        let url = self.endpoint.products_url();
        tracing::debug!(%url, "fetching catalog");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
                url,
            });
        }

        // The sheet endpoint often labels JSON as text/plain or text/html.
        let body = resp.text().await?;
        let products = parse_body(&body)?;
        tracing::info!(count = products.len(), "catalog loaded");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn source_for(server: &Server, suffix: &str) -> HttpProductSource {
        let endpoint = ApiEndpoint::new(&format!("{}{}", server.url(), suffix)).unwrap();
        HttpProductSource::new(endpoint, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_products_with_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/exec")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("path".into(), "products".into()),
                Matcher::Regex("t=\\d+".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"products":[{"nombre":"Martillo","categoria":"Herramientas"}]}"#)
            .create_async()
            .await;

        let products = source_for(&server, "/exec/").fetch_products().await.unwrap();
        mock.assert_async().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category(), "Herramientas");
    }

    #[tokio::test]
    async fn test_json_labelled_as_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/exec")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(r#"{"products":[{"nombre":"Clavo"}]}"#)
            .create_async()
            .await;

        let products = source_for(&server, "/exec").fetch_products().await.unwrap();
        assert_eq!(products[0].display_name(), "Clavo");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/exec")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = source_for(&server, "/exec").fetch_products().await.unwrap_err();
        assert!(matches!(err, LoadError::Http { status: 500, .. }));
        assert!(!err.is_configuration());
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/exec")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>login required</html>")
            .create_async()
            .await;

        let err = source_for(&server, "/exec").fetch_products().await.unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let endpoint = ApiEndpoint::new("http://127.0.0.1:9").unwrap();
        let source = HttpProductSource::new(endpoint, Some(Duration::from_secs(2))).unwrap();
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }
}
