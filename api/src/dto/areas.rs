use serde::{Deserialize, Serialize};

use mall_core::domain::entities::area::{AreaSummary, SubAreaData};
use mall_core::errors::DomainError;

/// Query string of `GET /areas/`
///
/// `area_id` is kept as text so a malformed id is reported through the
/// response envelope instead of the extractor's plain 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaQuery {
    pub area_id: Option<String>,
}

impl AreaQuery {
    /// `None` asks for the province list
    pub fn parse_area_id(&self) -> Result<Option<i64>, DomainError> {
        match self.area_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| DomainError::Validation {
                message: format!("area_id must be an integer, got '{}'", raw),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceListData {
    pub province_list: Vec<AreaSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAreaResponseData {
    pub sub_data: SubAreaData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: Option<&str>) -> AreaQuery {
        AreaQuery {
            area_id: raw.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_area_id() {
        assert_eq!(query(None).parse_area_id().unwrap(), None);
        assert_eq!(query(Some("")).parse_area_id().unwrap(), None);
        assert_eq!(query(Some("130000")).parse_area_id().unwrap(), Some(130000));
        assert!(matches!(
            query(Some("13x")).parse_area_id(),
            Err(DomainError::Validation { .. })
        ));
    }
}
