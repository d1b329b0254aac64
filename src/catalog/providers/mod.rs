pub mod tcgdex;

pub use tcgdex::{DEFAULT_TCGDEX_BASE_URL, TcgdexProvider};
