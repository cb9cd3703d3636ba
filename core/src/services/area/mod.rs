//! Area lookup service module
//!
//! Serves the province list and the direct children of any area through a
//! read-through cache in front of the area repository.

mod config;
mod service;


pub use config::AreaServiceConfig;
pub use service::AreaService;
