//! Area repository trait defining read access to the area hierarchy.
//!
//! Areas are reference data: the service layer only reads them, so the trait
//! has no write operations.

use async_trait::async_trait;

use crate::domain::entities::area::Area;
use crate::errors::DomainError;

/// Repository trait for reading `Area` rows
///
/// Implementations map storage failures to `DomainError::Database`.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use mall_core::domain::entities::area::Area;
/// use mall_core::errors::DomainError;
/// use mall_core::repositories::AreaRepository;
///
/// struct StaticAreaRepository;
///
/// #[async_trait]
/// impl AreaRepository for StaticAreaRepository {
///     async fn find_provinces(&self) -> Result<Vec<Area>, DomainError> {
///         Ok(vec![Area::new(110000, "北京市", None)])
///     }
///
///     async fn find_by_id(&self, id: i64) -> Result<Option<Area>, DomainError> {
///         Ok((id == 110000).then(|| Area::new(110000, "北京市", None)))
///     }
///
///     async fn find_children(&self, _parent_id: i64) -> Result<Vec<Area>, DomainError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// All areas without a parent, ordered by id
    async fn find_provinces(&self) -> Result<Vec<Area>, DomainError>;

    /// A single area by id
    ///
    /// # Returns
    /// * `Ok(Some(Area))` - Area found
    /// * `Ok(None)` - No area with this id
    async fn find_by_id(&self, id: i64) -> Result<Option<Area>, DomainError>;

    /// Direct children of an area, ordered by id
    async fn find_children(&self, parent_id: i64) -> Result<Vec<Area>, DomainError>;
}
