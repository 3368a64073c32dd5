use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::Product;

/// Errors that can occur while loading the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Shared, read-only catalog snapshot
pub type Catalog = Arc<Vec<Product>>;

/// Source of the product catalog
///
/// Implementations do the I/O so that scoring stays pure.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<Catalog, CatalogError>;
}

/// Catalog read from a JSON array on disk, on every load
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        let products: Vec<Product> = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            "Loaded {} products from {}",
            products.len(),
            self.path.display()
        );

        Ok(Arc::new(products))
    }
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Catalog,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(Arc::clone(&self.products))
    }
}

/// Memoises a whole catalog load for a fixed TTL
///
/// Only the loaded catalog is cached, never scores. Concurrent loads on a
/// cold cache are coalesced into one call to the inner provider.
pub struct CachedCatalog<P> {
    inner: P,
    cache: moka::future::Cache<(), Catalog>,
}

impl<P: CatalogProvider> CachedCatalog<P> {
    pub fn new(inner: P, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Drop the cached catalog so the next load hits the inner provider
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}

#[async_trait]
impl<P: CatalogProvider> CatalogProvider for CachedCatalog<P> {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        if let Some(catalog) = self.cache.get(&()).await {
            tracing::trace!("Catalog cache hit");
            return Ok(catalog);
        }

        self.cache
            .try_get_with((), self.inner.load())
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))
    }
}

/// Build the configured provider: file backed, cached when `ttl_secs > 0`
pub fn catalog_from_settings(path: &str, ttl_secs: Option<u64>) -> Arc<dyn CatalogProvider> {
    let file = JsonFileCatalog::new(path);

    match ttl_secs {
        Some(ttl) if ttl > 0 => Arc::new(CachedCatalog::new(file, ttl)),
        _ => Arc::new(file),
    }
}
