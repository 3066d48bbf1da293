use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;

pub mod http;

pub use http::HttpDataSource;

pub const ASSIGNMENTS_PATH: &str = "/assignments";
pub const COURSES_PATH: &str = "/courses";

/// Data-access capability the roster reads through.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Read a full collection. The returned value is the response body.
    async fn request(&self, path: &str) -> Result<Value, FetchError>;

    /// Remove a single resource.
    async fn delete(&self, path: &str) -> Result<(), FetchError>;
}

/// Read `path` and decode the body as a list of `T`.
pub async fn fetch_collection<T: DeserializeOwned>(
    source: &dyn DataSource,
    path: &str,
) -> Result<Vec<T>, FetchError> {
    let body = source.request(path).await?;
    serde_json::from_value(body).map_err(|source| FetchError::Decode {
        path: path.to_string(),
        source,
    })
}

pub fn assignment_path(id: i64) -> String {
    format!("{}/{}", ASSIGNMENTS_PATH, id)
}
