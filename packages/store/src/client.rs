//! # Store Client
//!
//! [`PageStore`] is the seam between the persistence protocols and the
//! remote store: the coordinator is written against the trait, and tests
//! substitute an in-memory double. [`HttpPageStore`] is the production
//! implementation over the store's JSON REST resources.

use crate::api::{
    PageDraft, PageRecord, PageSectionDraft, PageSectionId, PageSectionRecord, SectionDraft,
    SectionRecord,
};
use crate::error::StoreError;
use async_trait::async_trait;
use pagebuilder_model::{PageId, SectionId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Remote store resources, shape only. All writes use JSON bodies.
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn list_sections(&self) -> Result<Vec<SectionRecord>, StoreError>;
    async fn get_section(&self, id: SectionId) -> Result<SectionRecord, StoreError>;
    async fn create_section(&self, draft: &SectionDraft) -> Result<SectionRecord, StoreError>;
    async fn update_section(
        &self,
        id: SectionId,
        draft: &SectionDraft,
    ) -> Result<SectionRecord, StoreError>;
    async fn delete_section(&self, id: SectionId) -> Result<(), StoreError>;

    async fn list_pages(&self) -> Result<Vec<PageRecord>, StoreError>;
    async fn get_page(&self, id: PageId) -> Result<PageRecord, StoreError>;
    async fn create_page(&self, draft: &PageDraft) -> Result<PageRecord, StoreError>;
    async fn update_page(&self, id: PageId, draft: &PageDraft) -> Result<PageRecord, StoreError>;
    async fn delete_page(&self, id: PageId) -> Result<(), StoreError>;

    async fn list_page_sections(&self) -> Result<Vec<PageSectionRecord>, StoreError>;
    async fn create_page_section(
        &self,
        draft: &PageSectionDraft,
    ) -> Result<PageSectionRecord, StoreError>;
    async fn delete_page_section(&self, id: PageSectionId) -> Result<(), StoreError>;
}

/// Connection settings for the remote store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store's API, e.g. `http://10.80.5.76:3000/api/v1/`.
    pub base_url: String,
}

/// JSON REST client over reqwest.
pub struct HttpPageStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPageStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        // A trailing slash matters: Url::join replaces the last path
        // segment otherwise.
        let normalized = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&normalized)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(path)?)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let response = self.client.get(self.endpoint(path)?).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .put(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.endpoint(path)?).send().await?;
        Self::expect_success(response).await
    }
}

#[async_trait]
impl PageStore for HttpPageStore {
    async fn list_sections(&self) -> Result<Vec<SectionRecord>, StoreError> {
        self.get_json("sections").await
    }

    async fn get_section(&self, id: SectionId) -> Result<SectionRecord, StoreError> {
        self.get_json(&format!("sections/{}", id)).await
    }

    async fn create_section(&self, draft: &SectionDraft) -> Result<SectionRecord, StoreError> {
        self.post_json("sections", draft).await
    }

    async fn update_section(
        &self,
        id: SectionId,
        draft: &SectionDraft,
    ) -> Result<SectionRecord, StoreError> {
        self.put_json(&format!("sections/{}", id), draft).await
    }

    async fn delete_section(&self, id: SectionId) -> Result<(), StoreError> {
        self.delete(&format!("sections/{}", id)).await
    }

    async fn list_pages(&self) -> Result<Vec<PageRecord>, StoreError> {
        self.get_json("pages").await
    }

    async fn get_page(&self, id: PageId) -> Result<PageRecord, StoreError> {
        self.get_json(&format!("pages/{}", id)).await
    }

    async fn create_page(&self, draft: &PageDraft) -> Result<PageRecord, StoreError> {
        self.post_json("pages", draft).await
    }

    async fn update_page(&self, id: PageId, draft: &PageDraft) -> Result<PageRecord, StoreError> {
        self.put_json(&format!("pages/{}", id), draft).await
    }

    async fn delete_page(&self, id: PageId) -> Result<(), StoreError> {
        self.delete(&format!("pages/{}", id)).await
    }

    async fn list_page_sections(&self) -> Result<Vec<PageSectionRecord>, StoreError> {
        self.get_json("page_sections").await
    }

    async fn create_page_section(
        &self,
        draft: &PageSectionDraft,
    ) -> Result<PageSectionRecord, StoreError> {
        self.post_json("page_sections", draft).await
    }

    async fn delete_page_section(&self, id: PageSectionId) -> Result<(), StoreError> {
        self.delete(&format!("page_sections/{}", id)).await
    }
}
