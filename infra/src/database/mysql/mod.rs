//! MySQL repository implementations

pub mod area_repository_impl;

pub use area_repository_impl::MySqlAreaRepository;
