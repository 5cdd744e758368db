// cravingo-admin/src/appwrite/client.rs
// Appwrite HTTP client - TablesDB and Storage endpoints

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{AppwriteError, AppwriteResult, Query, RowList, StorageApi, TablesApi};
use crate::core::AppwriteConfig;

/// Error body returned by Appwrite
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Appwrite REST client authenticated with a server API key
#[derive(Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
}

impl fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}

impl AppwriteClient {
    pub fn new(config: &AppwriteConfig, timeout: Duration) -> AppwriteResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn rows_url(&self, table_id: &str) -> String {
        format!(
            "{}/tablesdb/{}/tables/{}/rows",
            self.endpoint, self.database_id, table_id
        )
    }

    fn row_url(&self, table_id: &str, row_id: &str) -> String {
        format!("{}/{}", self.rows_url(table_id), row_id)
    }

    fn file_url(&self, bucket_id: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}",
            self.endpoint, bucket_id, file_id
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> AppwriteResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let (message, kind) = match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(body) if !body.message.is_empty() => (body.message, body.kind),
            _ => (text, String::new()),
        };
        tracing::debug!(status = status.as_u16(), kind = %kind, "Appwrite request rejected");
        Err(AppwriteError::Api {
            status: status.as_u16(),
            kind,
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppwriteResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppwriteError::InvalidResponse(e.to_string()))
    }
}

/// Encode queries as repeated `queries[]` parameters
fn query_params(queries: &[Query]) -> AppwriteResult<Vec<(&'static str, String)>> {
    queries
        .iter()
        .map(|q| -> AppwriteResult<_> { Ok(("queries[]", q.to_param()?)) })
        .collect()
}

#[async_trait]
impl TablesApi for AppwriteClient {
    async fn list_rows(&self, table_id: &str, queries: &[Query]) -> AppwriteResult<RowList> {
        let params = query_params(queries)?;
        let request = self
            .request(Method::GET, &self.rows_url(table_id))
            .query(&params);
        self.send_json(request).await
    }

    async fn create_row(&self, table_id: &str, data: Value) -> AppwriteResult<Value> {
        let body = json!({ "rowId": "unique()", "data": data });
        let request = self
            .request(Method::POST, &self.rows_url(table_id))
            .json(&body);
        self.send_json(request).await
    }

    async fn update_row(&self, table_id: &str, row_id: &str, data: Value) -> AppwriteResult<Value> {
        let body = json!({ "data": data });
        let request = self
            .request(Method::PATCH, &self.row_url(table_id, row_id))
            .json(&body);
        self.send_json(request).await
    }

    async fn delete_row(&self, table_id: &str, row_id: &str) -> AppwriteResult<()> {
        let request = self.request(Method::DELETE, &self.row_url(table_id, row_id));
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageApi for AppwriteClient {
    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> AppwriteResult<()> {
        let request = self.request(Method::DELETE, &self.file_url(bucket_id, file_id));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AppwriteClient {
        let config = AppwriteConfig {
            endpoint: "https://appwrite.test/v1/".into(),
            project_id: "proj".into(),
            api_key: "key".into(),
            database_id: "main".into(),
        };
        AppwriteClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_urls() {
        let c = client();
        assert_eq!(c.endpoint(), "https://appwrite.test/v1");
        assert_eq!(
            c.rows_url("orders"),
            "https://appwrite.test/v1/tablesdb/main/tables/orders/rows"
        );
        assert_eq!(
            c.row_url("menu", "p1"),
            "https://appwrite.test/v1/tablesdb/main/tables/menu/rows/p1"
        );
        assert_eq!(
            c.file_url("images", "f1"),
            "https://appwrite.test/v1/storage/buckets/images/files/f1"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let printed = format!("{:?}", client());
        assert!(printed.contains("https://appwrite.test/v1"));
        assert!(!printed.contains("\"key\""));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_request_uses_repeated_query_params() {
        let c = client();
        let params = query_params(&[Query::limit(10), Query::order_desc("$updatedAt")]).unwrap();
        let request = c
            .request(Method::GET, &c.rows_url("menu"))
            .query(&params)
            .build()
            .unwrap();

        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(k, _)| k == "queries[]"));
        assert_eq!(pairs[0].1, r#"{"method":"limit","values":[10]}"#);

        let headers = request.headers();
        assert_eq!(headers["X-Appwrite-Project"], "proj");
        assert_eq!(headers["X-Appwrite-Key"], "key");
    }
}
