//! Key-value cache seam shared by the area and verification services

mod mock;
mod traits;

pub use mock::MockCacheService;
pub use traits::{CacheEntry, CacheServiceTrait};
