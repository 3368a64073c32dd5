// Service exports
pub mod catalog;

pub use catalog::{
    catalog_from_settings, CachedCatalog, Catalog, CatalogError, CatalogProvider,
    JsonFileCatalog, StaticCatalog,
};
