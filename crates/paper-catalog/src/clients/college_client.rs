//! # College Client
//!
//! Wraps a `ResourceClient<College>`. Colleges have no parents, so reads return the
//! stored documents as they are.

use super::found;
use crate::error::{CatalogError, Resource};
use crate::model::{College, CollegeCreate, CollegeId};
use async_trait::async_trait;
use catalog_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CollegeClient {
    inner: ResourceClient<College>,
}

impl CollegeClient {
    pub fn new(inner: ResourceClient<College>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, params: CollegeCreate) -> Result<College, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// All colleges, by name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<College>, CatalogError> {
        self.inner.list(()).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: CollegeId) -> Result<College, CatalogError> {
        found(self.fetch(id).await?, Resource::College)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: CollegeId,
        params: CollegeCreate,
    ) -> Result<College, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, params).await.map_err(Self::map_error)
    }

    /// Removes the college. Its courses are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CollegeId) -> Result<(), CatalogError> {
        self.remove(id, ()).await
    }
}

#[async_trait]
impl ActorClient<College> for CollegeClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<College> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        CatalogError::from_framework(e, Resource::College)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_framework::mock::MockClient;

    fn college(name: &str, code: &str) -> College {
        College::new(
            CollegeId::new(),
            CollegeCreate {
                name: name.into(),
                code: code.into(),
                location: None,
            },
        )
    }

    #[tokio::test]
    async fn missing_college_is_not_found() {
        let mut mock = MockClient::<College>::new();
        let id = CollegeId::new();
        mock.expect_get(id).return_ok(None);

        let client = CollegeClient::new(mock.client());
        let err = client.get(id).await.unwrap_err();
        assert_eq!(err.to_string(), "College not found");
        mock.verify();
    }

    #[tokio::test]
    async fn duplicate_names_report_a_conflict() {
        let mut mock = MockClient::<College>::new();
        mock.expect_create().return_err(FrameworkError::Conflict {
            index: "name",
            value: "Tech U".into(),
        });

        let client = CollegeClient::new(mock.client());
        let err = client
            .create(CollegeCreate {
                name: "Tech U".into(),
                code: "TU2".into(),
                location: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(msg) if msg == "College already exists"));
    }

    #[tokio::test]
    async fn list_passes_documents_through() {
        let mut mock = MockClient::<College>::new();
        let stored = vec![college("Arts", "AR"), college("Tech U", "TU")];
        mock.expect_list().return_ok(stored.clone());

        let client = CollegeClient::new(mock.client());
        assert_eq!(client.list().await.unwrap(), stored);
    }
}
