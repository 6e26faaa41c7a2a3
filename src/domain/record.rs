// ==========================================
// 表格归一化工具 - 记录实体
// ==========================================
// RawRecord: 解析器产出的原始行（列名 → 标量值，保持列顺序）
// InventoryRecord / LocationRecord: 归一化后的固定结构
// ==========================================

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// 原始行记录
///
/// 同一逻辑字段可能以多种拼写出现（sku / SKU / Sku），
/// 由字段映射器按别名列表解析。空单元格不出现在 Map 中。
pub type RawRecord = Map<String, Value>;

// ==========================================
// InventoryRecord - 库存记录
// ==========================================
// 不变式: 数值字段在强制转换后均为有限数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub sku: String,
    pub name: String,
    pub hcpcs: String,
    #[serde(serialize_with = "js_number::serialize")]
    pub on_hand: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub reorder_point: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub avg_cost: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub rental_rate: f64,
}

// ==========================================
// LocationRecord - 司机协助点位记录
// ==========================================
// city/state 未匹配时不输出该键；
// lat/lng/milesFromHQ 缺失或非数值时输出 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(serialize_with = "js_number::serialize_option")]
    pub lat: Option<f64>,
    #[serde(serialize_with = "js_number::serialize_option")]
    pub lng: Option<f64>,

    #[serde(rename = "milesFromHQ", serialize_with = "js_number::serialize_option")]
    pub miles_from_hq: Option<f64>,
}

// ==========================================
// 数值输出格式
// ==========================================
// 整数值输出为 5 而非 5.0，与下游前端读取的 JSON 保持一致；
// 非有限值输出 null
mod js_number {
    use super::Serializer;

    // 2^53，超出后浮点无法精确表示整数
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if !value.is_finite() {
            serializer.serialize_none()
        } else if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn serialize_option<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_record_json_shape() {
        let record = InventoryRecord {
            sku: "X1".to_string(),
            name: String::new(),
            hcpcs: String::new(),
            on_hand: 5.0,
            reorder_point: 0.0,
            avg_cost: 0.0,
            rental_rate: 0.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"sku":"X1","name":"","hcpcs":"","onHand":5,"reorderPoint":0,"avgCost":0,"rentalRate":0}"#
        );
    }

    #[test]
    fn test_location_record_omits_missing_city() {
        let record = LocationRecord {
            city: None,
            state: Some("PA".to_string()),
            lat: Some(40.0),
            lng: None,
            miles_from_hq: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"state":"PA","lat":40,"lng":null,"milesFromHQ":null}"#
        );
    }

    #[test]
    fn test_fractional_values_keep_decimals() {
        let record = LocationRecord {
            city: Some("B".to_string()),
            state: None,
            lat: Some(41.5),
            lng: Some(-75.0),
            miles_from_hq: Some(69.09),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"city":"B","lat":41.5,"lng":-75,"milesFromHQ":69.09}"#
        );
    }
}
