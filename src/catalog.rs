use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{FetchError, ShelfError};
use crate::types::Product;

/// Read side of the remote product API
#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    async fn list_products(&self, offset: u64, limit: u32) -> Result<Vec<Product>, FetchError>;
    async fn get_product(&self, id: &str) -> Result<Product, FetchError>;
}

pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShelfError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: &str) -> crate::error::Result<Self> {
        Self::new(base_url, Duration::from_secs(30))
    }

    fn api_url(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            tracing::error!("invalid API URL {}{}: {}", self.base_url, path, e);
            FetchError::Network(e.to_string())
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!("request to {} failed: {}", url, e);
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_products(&self, offset: u64, limit: u32) -> Result<Vec<Product>, FetchError> {
        let mut url = self.api_url("/products")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        self.get_json(url).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, FetchError> {
        let url = self.api_url(&format!("/products/{}", urlencoding::encode(id)))?;

        self.get_json(url).await.map_err(|e| match e {
            FetchError::Http { status } if status == StatusCode::NOT_FOUND.as_u16() => {
                FetchError::NotFound(id.to_string())
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListKey;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PRODUCT_JSON: &str = r#"{
        "id": 7,
        "title": "Sleek Chair",
        "price": 120,
        "description": "Sits well.",
        "images": ["https://img.example/7a.png", "https://img.example/7b.png"],
        "category": {"id": 3, "name": "Furniture"}
    }"#;

    fn catalog(server: &MockServer) -> HttpCatalog {
        HttpCatalog::with_base_url(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn list_products_sends_offset_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("offset", "18"))
            .and(query_param("limit", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("[{}]", PRODUCT_JSON)))
            .expect(1)
            .mount(&server)
            .await;

        let products = catalog(&server).list_products(18, 6).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Sleek Chair");
    }

    #[tokio::test]
    async fn list_products_sends_offset_beyond_u32() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("offset", "5999999994"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let key = ListKey::new(1_000_000_000, 6);
        let products = catalog(&server)
            .list_products(key.offset(), key.limit)
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn list_products_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let products = catalog(&server).list_products(600, 6).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn list_products_server_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = catalog(&server).list_products(6, 6).await.unwrap_err();
        assert_eq!(err, FetchError::Http { status: 500 });
    }

    #[tokio::test]
    async fn get_product_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_JSON))
            .mount(&server)
            .await;

        let product = catalog(&server).get_product("7").await.unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.category.name, "Furniture");
    }

    #[tokio::test]
    async fn get_product_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = catalog(&server).get_product("999").await.unwrap_err();
        assert_eq!(err, FetchError::NotFound("999".to_string()));
    }

    #[tokio::test]
    async fn get_product_bad_request_stays_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/abc"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = catalog(&server).get_product("abc").await.unwrap_err();
        assert_eq!(err, FetchError::Http { status: 400 });
    }

    #[tokio::test]
    async fn get_product_null_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let err = catalog(&server).get_product("5").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn get_product_encodes_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/a%2Fb"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = catalog(&server).get_product("a/b").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let catalog = HttpCatalog::with_base_url("http://127.0.0.1:9").unwrap();
        let err = catalog.list_products(0, 6).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
