//! Table-backed storage provider.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use super::config::StorageConfig;
use super::uploader::{UploadedFile, Uploader};
use super::url::{RouteResolver, resolve_url};
use crate::blob::{BlobError, BlobHandle, BlobRepository};

/// Storage contract consumed by upload libraries.
pub trait StorageEngine: Send + Sync {
    /// Handle type returned for stored and retrieved files.
    type File;

    /// Persist `file` under the uploader's identifier.
    fn store<U>(
        &self,
        uploader: &U,
        file: UploadedFile,
    ) -> impl std::future::Future<Output = Result<Self::File, BlobError>> + Send
    where
        U: Uploader + ?Sized;

    /// Load the file stored under `identifier`.
    fn retrieve<U>(
        &self,
        uploader: &U,
        identifier: &str,
    ) -> impl std::future::Future<Output = Result<Self::File, BlobError>> + Send
    where
        U: Uploader + ?Sized;
}

/// Storage provider persisting uploads as rows of a single table.
pub struct TableStorage<R: BlobRepository> {
    repo: Arc<R>,
    config: StorageConfig,
    resolver: Option<Arc<dyn RouteResolver>>,
}

impl<R: BlobRepository> TableStorage<R> {
    /// Create a provider without a route resolver.
    #[must_use]
    pub fn new(repo: Arc<R>, config: StorageConfig) -> Self {
        Self {
            repo,
            config,
            resolver: None,
        }
    }

    /// Attach a host-application route resolver.
    #[must_use]
    pub fn with_route_resolver(mut self, resolver: Arc<dyn RouteResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Download URL for `identifier` as seen by `uploader`.
    pub fn url_for<U>(&self, uploader: &U, identifier: &str) -> String
    where
        U: Uploader + ?Sized,
    {
        resolve_url(
            self.resolver.as_deref(),
            uploader,
            &self.config.download_path_prefix,
            identifier,
        )
    }

    /// The backing repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl<R: BlobRepository> StorageEngine for TableStorage<R> {
    type File = BlobHandle<R>;

    async fn store<U>(&self, uploader: &U, file: UploadedFile) -> Result<BlobHandle<R>, BlobError>
    where
        U: Uploader + ?Sized,
    {
        let identifier = uploader
            .identifier()
            .ok_or(BlobError::MissingIdentifier)?;

        let mut handle = BlobHandle::create(self.repo.clone(), uploader, file, &identifier).await?;
        let url = self.url_for(uploader, &identifier);
        info!(identifier = %identifier, url = %url, "Upload stored");
        handle.set_url(url);

        Ok(handle)
    }

    async fn retrieve<U>(&self, uploader: &U, identifier: &str) -> Result<BlobHandle<R>, BlobError>
    where
        U: Uploader + ?Sized,
    {
        let mut handle = BlobHandle::fetch(self.repo.clone(), identifier).await?;
        handle.set_url(self.url_for(uploader, identifier));
        Ok(handle)
    }
}

impl<R: BlobRepository> fmt::Debug for TableStorage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStorage")
            .field("config", &self.config)
            .field("has_route_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}
