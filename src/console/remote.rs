//! Remote adapter: console stores speaking the catalog REST API.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::store::{CatalogBackend, EntityStore, ServiceError};
use crate::config::Config;
use crate::errors::ErrorDetails;
use crate::models::{DegreeView, Department, Record, SemesterView, SubjectView};

/// Maps a record type to its REST collection.
pub trait Collection {
    const PATH: &'static str;
}

impl Collection for Department {
    const PATH: &'static str = "departments";
}

impl Collection for DegreeView {
    const PATH: &'static str = "degrees";
}

impl Collection for SemesterView {
    const PATH: &'static str = "semesters";
}

impl Collection for SubjectView {
    const PATH: &'static str = "subjects";
}

/// Catalog backend reached over HTTP.
#[derive(Clone)]
pub struct RemoteCatalog {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl RemoteCatalog {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url)
    }

    fn table<R>(&self) -> RemoteTable<R> {
        RemoteTable {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl CatalogBackend for RemoteCatalog {
    type Departments = RemoteTable<Department>;
    type Degrees = RemoteTable<DegreeView>;
    type Semesters = RemoteTable<SemesterView>;
    type Subjects = RemoteTable<SubjectView>;

    fn departments(&self) -> Self::Departments {
        self.table()
    }

    fn degrees(&self) -> Self::Degrees {
        self.table()
    }

    fn semesters(&self) -> Self::Semesters {
        self.table()
    }

    fn subjects(&self) -> Self::Subjects {
        self.table()
    }
}

/// One REST collection.
pub struct RemoteTable<R> {
    client: reqwest::Client,
    base_url: Arc<str>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Collection> RemoteTable<R> {
    fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, R::PATH)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, R::PATH, id)
    }
}

#[async_trait]
impl<R> EntityStore for RemoteTable<R>
where
    R: Record + Collection + DeserializeOwned + 'static,
    R::Draft: Serialize,
{
    type Draft = R::Draft;
    type Record = R;

    async fn list_all(&self) -> Result<Vec<R>, ServiceError> {
        let response = self.client.get(self.collection_url()).send().await?;
        decode(response).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ServiceError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, ServiceError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        decode::<Option<serde_json::Value>>(response).await?;
        Ok(())
    }
}

/// Response envelope as written by the service, success or error.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorDetails>,
}

/// Unwrap the envelope, folding every failure into a message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|err| {
        tracing::debug!(%status, %err, "undecodable catalog response");
        ServiceError::new(format!("Unexpected response ({}): {}", status, body.trim()))
    })?;

    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope {
            success: true,
            data: None,
            ..
        } => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ServiceError::new(format!("Empty response ({})", status))),
        Envelope {
            error: Some(error), ..
        } => Err(ServiceError::new(error.message)),
        Envelope { .. } => Err(ServiceError::new(format!("Request failed ({})", status))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let catalog = RemoteCatalog::new("http://localhost:9000/");
        let degrees = catalog.degrees();
        assert_eq!(degrees.collection_url(), "http://localhost:9000/api/degrees");
        assert_eq!(
            catalog.subjects().item_url("abc"),
            "http://localhost:9000/api/subjects/abc"
        );
    }

    #[test]
    fn test_from_config_uses_api_url() {
        let config = Config {
            db_path: "catalog.sqlite".into(),
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            log_level: "info".to_string(),
            log_json: false,
            api_url: "http://catalog.internal:8080".to_string(),
        };
        let catalog = RemoteCatalog::from_config(&config);
        assert_eq!(
            catalog.departments().collection_url(),
            "http://catalog.internal:8080/api/departments"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_service_error() {
        // Port 9 (discard) is not listening in test environments.
        let catalog = RemoteCatalog::new("http://127.0.0.1:9");
        let err = catalog.departments().list_all().await.unwrap_err();
        assert!(err.message().starts_with("Request failed"));
    }
}
