pub mod area;

pub use area::{AreaRepository, MockAreaRepository};
