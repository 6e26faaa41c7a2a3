// ==========================================
// 表格归一化工具 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 输出路由 (Output Route)
// ==========================================
// CSV 文件按文件名归类：库存 或 某一付款方的费率表
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputRoute {
    /// 库存表（固定输出文件）
    Inventory,
    /// 付款方费率表（allowables_<payer>.json）
    Allowables { payer: String },
}

impl fmt::Display for OutputRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputRoute::Inventory => write!(f, "INVENTORY"),
            OutputRoute::Allowables { payer } => write!(f, "ALLOWABLES({})", payer),
        }
    }
}

// ==========================================
// 地理坐标 (Geo Point)
// ==========================================
// 单位: 十进制度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 两个坐标都存在时才构成有效点位
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_route_display() {
        assert_eq!(OutputRoute::Inventory.to_string(), "INVENTORY");
        let route = OutputRoute::Allowables {
            payer: "medicaid".to_string(),
        };
        assert_eq!(route.to_string(), "ALLOWABLES(medicaid)");
    }

    #[test]
    fn test_geo_point_requires_both_parts() {
        assert_eq!(
            GeoPoint::from_parts(Some(40.0), Some(-75.0)),
            Some(GeoPoint::new(40.0, -75.0))
        );
        assert_eq!(GeoPoint::from_parts(Some(40.0), None), None);
        assert_eq!(GeoPoint::from_parts(None, Some(-75.0)), None);
    }
}
