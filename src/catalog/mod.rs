mod persistence;
mod query;
mod store;

pub use persistence::{load_catalog, load_foods};
pub use query::{CatalogQuery, Pool, matches_goal};
pub use store::{FoodCatalog, InMemoryCatalog};
