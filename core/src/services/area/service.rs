//! Read-through cached area lookups

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::area::{sub_area_key, AreaSummary, SubAreaData, PROVINCE_LIST_KEY};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AreaRepository;
use crate::services::cache::CacheServiceTrait;

use super::config::AreaServiceConfig;

/// Area service answering province and sub-area queries
///
/// The cache is an optimization only: read failures count as misses and
/// write failures are logged, so the repository remains the source of truth.
pub struct AreaService<R: AreaRepository, C: CacheServiceTrait> {
    repository: Arc<R>,
    cache: Arc<C>,
    config: AreaServiceConfig,
}

impl<R: AreaRepository, C: CacheServiceTrait> AreaService<R, C> {
    pub fn new(repository: Arc<R>, cache: Arc<C>, config: AreaServiceConfig) -> Self {
        Self {
            repository,
            cache,
            config,
        }
    }

    /// All provinces as `{id, name}` pairs
    pub async fn get_provinces(&self) -> DomainResult<Vec<AreaSummary>> {
        if let Some(cached) = self.read_cached::<Vec<AreaSummary>>(PROVINCE_LIST_KEY).await {
            return Ok(cached);
        }

        let provinces = self.repository.find_provinces().await.map_err(|e| {
            tracing::error!(error = %e, event = "province_query_failed", "Failed to load provinces");
            e
        })?;
        let summaries: Vec<AreaSummary> = provinces.iter().map(AreaSummary::from).collect();

        self.write_cached(PROVINCE_LIST_KEY, &summaries).await;
        tracing::debug!(count = summaries.len(), event = "province_cache_filled", "Loaded provinces");

        Ok(summaries)
    }

    /// An area and its direct children
    ///
    /// Returns `DomainError::NotFound` for an unknown id.
    pub async fn get_sub_areas(&self, area_id: i64) -> DomainResult<SubAreaData> {
        let key = sub_area_key(area_id);
        if let Some(cached) = self.read_cached::<SubAreaData>(&key).await {
            return Ok(cached);
        }

        let parent = self
            .repository
            .find_by_id(area_id)
            .await?
            .ok_or_else(|| {
                tracing::info!(area_id, event = "area_not_found", "Requested unknown area");
                DomainError::NotFound {
                    resource: format!("area {}", area_id),
                }
            })?;
        let children = self.repository.find_children(area_id).await?;
        let data = SubAreaData::from_parts(&parent, &children);

        self.write_cached(&key, &data).await;

        Ok(data)
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, event = "area_cache_corrupt", "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, event = "area_cache_read_failed", "Cache read failed, falling back to database");
                None
            }
        }
    }

    async fn write_cached<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize area cache entry");
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set_with_expiry(key, &raw, self.config.cache_ttl_seconds)
            .await
        {
            tracing::warn!(key, error = %e, event = "area_cache_write_failed", "Failed to cache area lookup");
        }
    }
}
