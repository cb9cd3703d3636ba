//! Mock implementation of AreaRepository for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::area::Area;
use crate::errors::DomainError;

use super::trait_::AreaRepository;

/// In-memory area repository that counts the queries it serves
pub struct MockAreaRepository {
    areas: Arc<RwLock<BTreeMap<i64, Area>>>,
    province_queries: AtomicUsize,
    id_queries: AtomicUsize,
    children_queries: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAreaRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::with_areas(Vec::new())
    }

    /// Create a repository holding the given areas
    pub fn with_areas(areas: Vec<Area>) -> Self {
        Self {
            areas: Arc::new(RwLock::new(areas.into_iter().map(|a| (a.id, a)).collect())),
            province_queries: AtomicUsize::new(0),
            id_queries: AtomicUsize::new(0),
            children_queries: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// A small two-level tree of provinces and cities
    pub fn with_sample_data() -> Self {
        Self::with_areas(vec![
            Area::new(110000, "北京市", None),
            Area::new(110100, "北京市", Some(110000)),
            Area::new(130000, "河北省", None),
            Area::new(130100, "石家庄市", Some(130000)),
            Area::new(130200, "唐山市", Some(130000)),
            Area::new(440000, "广东省", None),
            Area::new(440100, "广州市", Some(440000)),
            Area::new(440300, "深圳市", Some(440000)),
            Area::new(440106, "天河区", Some(440100)),
        ])
    }

    /// Make every subsequent query fail with a database error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `find_provinces` calls served so far
    pub fn province_queries(&self) -> usize {
        self.province_queries.load(Ordering::SeqCst)
    }

    /// Number of `find_by_id` calls served so far
    pub fn id_queries(&self) -> usize {
        self.id_queries.load(Ordering::SeqCst)
    }

    /// Number of `find_children` calls served so far
    pub fn children_queries(&self) -> usize {
        self.children_queries.load(Ordering::SeqCst)
    }

    /// Total queries of any kind
    pub fn total_queries(&self) -> usize {
        self.province_queries() + self.id_queries() + self.children_queries()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "Mock database unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAreaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AreaRepository for MockAreaRepository {
    async fn find_provinces(&self) -> Result<Vec<Area>, DomainError> {
        self.province_queries.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let areas = self.areas.read().await;
        Ok(areas.values().filter(|a| a.is_province()).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Area>, DomainError> {
        self.id_queries.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let areas = self.areas.read().await;
        Ok(areas.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: i64) -> Result<Vec<Area>, DomainError> {
        self.children_queries.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let areas = self.areas.read().await;
        Ok(areas
            .values()
            .filter(|a| a.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }
}
