// ==========================================
// 表格归一化工具 - 字段映射器实现
// ==========================================
// 职责: 源列名（多种拼写）→ 标准字段 + 类型转换
// 规则: 每个字段一个有序别名列表，由同一个解析函数处理；
//       键存在且值非空即视为"有值"，首个有值的别名生效
// ==========================================

use crate::config::{InventoryAliases, LocationAliases};
use crate::domain::{GeoPoint, InventoryRecord, LocationRecord, RawRecord};
use crate::importer::derivation::DistanceDerivation;
use serde_json::Value;
use tracing::warn;

// ==========================================
// 通用别名解析
// ==========================================

/// 值是否视为"有值"（null 与空白字符串视为缺失，数值 0 视为有值）
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// 按列名查找；精确匹配优先，其次忽略列名首尾空白（如 "SKU "）
fn lookup<'a>(row: &'a RawRecord, alias: &str) -> Option<(&'a str, &'a Value)> {
    if let Some((key, value)) = row.get_key_value(alias) {
        return Some((key.as_str(), value));
    }
    row.iter()
        .find(|(key, _)| key.trim() == alias)
        .map(|(key, value)| (key.as_str(), value))
}

/// 按别名顺序查找首个有值的列
///
/// # 返回
/// - Some((命中的源列名, 值))
/// - None: 所有别名均缺失
pub fn resolve<'a>(row: &'a RawRecord, aliases: &[String]) -> Option<(&'a str, &'a Value)> {
    aliases
        .iter()
        .find_map(|alias| lookup(row, alias).filter(|(_, v)| is_present(v)))
}

/// 提取字符串字段（数值/布尔转为文本，字符串去首尾空白）
pub fn resolve_string(row: &RawRecord, aliases: &[String]) -> Option<String> {
    resolve(row, aliases).map(|(_, value)| match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    })
}

/// 数值字段解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum NumericField {
    /// 所有别名均缺失
    Missing,
    /// 解析成功（有限数）
    Valid(f64),
    /// 有值但无法解析为有限数
    Invalid { column: String, raw: String },
}

impl NumericField {
    /// 缺失或非法时回落到默认值
    pub fn or_default(&self, default: f64) -> f64 {
        match self {
            NumericField::Valid(v) => *v,
            _ => default,
        }
    }

    /// 仅保留合法数值
    pub fn valid(&self) -> Option<f64> {
        match self {
            NumericField::Valid(v) => Some(*v),
            _ => None,
        }
    }
}

/// 值 → 有限数（字符串去空白后解析；布尔按 1/0）
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// 提取数值字段
pub fn resolve_number(row: &RawRecord, aliases: &[String]) -> NumericField {
    match resolve(row, aliases) {
        None => NumericField::Missing,
        Some((column, value)) => match coerce_number(value) {
            Some(n) => NumericField::Valid(n),
            None => NumericField::Invalid {
                column: column.to_string(),
                raw: match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            },
        },
    }
}

// ==========================================
// InventoryFieldMapper - 库存字段映射
// ==========================================
pub struct InventoryFieldMapper {
    aliases: InventoryAliases,
}

impl InventoryFieldMapper {
    pub fn new(aliases: InventoryAliases) -> Self {
        Self { aliases }
    }

    /// 将原始行映射为 InventoryRecord
    ///
    /// # 规则
    /// - 字符串字段缺失 → ""
    /// - 数值字段缺失或非数值 → 0（非数值时记录警告）
    /// - sku 缺失 → 保留该行，sku 为 ""，记录警告
    pub fn map(&self, row: &RawRecord, row_number: usize) -> InventoryRecord {
        let sku = resolve_string(row, &self.aliases.sku).unwrap_or_else(|| {
            warn!(row_number, "库存行缺少 sku");
            String::new()
        });

        InventoryRecord {
            name: resolve_string(row, &self.aliases.name).unwrap_or_default(),
            hcpcs: resolve_string(row, &self.aliases.hcpcs).unwrap_or_default(),
            on_hand: self.number(row, &self.aliases.on_hand, "onHand", row_number),
            reorder_point: self.number(row, &self.aliases.reorder_point, "reorderPoint", row_number),
            avg_cost: self.number(row, &self.aliases.avg_cost, "avgCost", row_number),
            rental_rate: self.number(row, &self.aliases.rental_rate, "rentalRate", row_number),
            sku,
        }
    }

    fn number(&self, row: &RawRecord, aliases: &[String], field: &str, row_number: usize) -> f64 {
        let resolved = resolve_number(row, aliases);
        if let NumericField::Invalid { column, raw } = &resolved {
            warn!(row_number, field_name = field, column = %column, value = %raw, "无法解析为数值，按 0 处理");
        }
        resolved.or_default(0.0)
    }
}

// ==========================================
// LocationFieldMapper - 点位字段映射
// ==========================================
pub struct LocationFieldMapper {
    aliases: LocationAliases,
    derivation: DistanceDerivation,
}

impl LocationFieldMapper {
    pub fn new(aliases: LocationAliases, derivation: DistanceDerivation) -> Self {
        Self { aliases, derivation }
    }

    /// 提取行坐标（任一坐标缺失或非数值 → None）
    pub fn point_of(&self, row: &RawRecord) -> Option<GeoPoint> {
        GeoPoint::from_parts(
            resolve_number(row, &self.aliases.lat).valid(),
            resolve_number(row, &self.aliases.lng).valid(),
        )
    }

    /// 将原始行映射为 LocationRecord
    ///
    /// # 参数
    /// - row: 原始行
    /// - hq: 参考点（批次首行坐标）；None 时 milesFromHQ 为 null
    pub fn map(&self, row: &RawRecord, hq: Option<GeoPoint>) -> LocationRecord {
        let lat = resolve_number(row, &self.aliases.lat).valid();
        let lng = resolve_number(row, &self.aliases.lng).valid();
        let miles_from_hq = match (hq, GeoPoint::from_parts(lat, lng)) {
            (Some(origin), Some(point)) => Some(self.derivation.miles_between(origin, point)),
            _ => None,
        };

        LocationRecord {
            city: resolve_string(row, &self.aliases.city),
            state: resolve_string(row, &self.aliases.state),
            lat,
            lng,
            miles_from_hq,
        }
    }
}
