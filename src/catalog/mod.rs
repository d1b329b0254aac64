pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CardFinder, CardQuery, CatalogError, SetDirectory};
pub use providers::{DEFAULT_TCGDEX_BASE_URL, TcgdexProvider};
pub use types::{CardBrief, CardCount, HIGH_RES_IMAGE_SUFFIX, LocalId, SetResume};
