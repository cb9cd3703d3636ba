//! Administrative area entity.
//!
//! Areas form a tree: provinces have no parent, cities point at their province,
//! districts point at their city. Lookups only ever walk one level at a time.

use serde::{Deserialize, Serialize};

/// Cache key for the province list
pub const PROVINCE_LIST_KEY: &str = "province_list";

/// Cache key for the direct children of an area
pub fn sub_area_key(area_id: i64) -> String {
    format!("sub_area_{}", area_id)
}

/// Area row as stored in `tb_areas`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,

    pub name: String,

    /// Parent area, `None` for provinces
    pub parent_id: Option<i64>,
}

impl Area {
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    /// Check whether this area is a top-level province
    pub fn is_province(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// `{id, name}` pair returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub id: i64,
    pub name: String,
}

impl From<&Area> for AreaSummary {
    fn from(area: &Area) -> Self {
        Self {
            id: area.id,
            name: area.name.clone(),
        }
    }
}

/// An area together with its direct children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAreaData {
    pub id: i64,
    pub name: String,
    pub subs: Vec<AreaSummary>,
}

impl SubAreaData {
    /// Build from a parent and its children, keeping the children's order
    pub fn from_parts(parent: &Area, children: &[Area]) -> Self {
        Self {
            id: parent.id,
            name: parent.name.clone(),
            subs: children.iter().map(AreaSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_area_key() {
        assert_eq!(sub_area_key(440000), "sub_area_440000");
    }

    #[test]
    fn test_sub_area_data_from_parts() {
        let parent = Area::new(440000, "广东省", None);
        let children = vec![
            Area::new(440100, "广州市", Some(440000)),
            Area::new(440300, "深圳市", Some(440000)),
        ];

        let data = SubAreaData::from_parts(&parent, &children);

        assert!(parent.is_province());
        assert_eq!(data.id, 440000);
        assert_eq!(data.name, "广东省");
        assert_eq!(data.subs.len(), 2);
        assert_eq!(data.subs[1], AreaSummary { id: 440300, name: "深圳市".to_string() });
    }

    #[test]
    fn test_summary_serializes_id_and_name_only() {
        let area = Area::new(110000, "北京市", None);
        let json = serde_json::to_value(AreaSummary::from(&area)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 110000, "name": "北京市"}));
    }
}
