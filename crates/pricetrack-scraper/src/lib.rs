pub mod client;
pub mod croma;
pub mod error;
pub mod oppo;
pub mod reliance;
pub mod resolve;

pub use client::StoreClient;
pub use error::ScraperError;
pub use oppo::extract_oppo_product_code;
pub use reliance::extract_item_code;
pub use resolve::{detect_store, RemoteLookup, ResolveError, Resolver};
