// ==========================================
// 表格归一化工具 - 转换配置
// ==========================================
// 所有"常量"均以配置值形式注入转换函数，
// 单元测试可直接构造，无需环境准备
// ==========================================

use crate::importer::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ==========================================
// ConverterConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// 源文件目录
    pub raw_dir: PathBuf,

    /// 输出目录（写出前自动创建）
    pub data_dir: PathBuf,

    /// CSV 文件路由规则
    pub routing: RoutingConfig,

    /// 库存字段别名
    pub inventory_aliases: InventoryAliases,

    /// 点位字段别名
    pub location_aliases: LocationAliases,

    /// 司机协助表与距离计算参数
    pub geodesic: GeodesicConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("raw-data"),
            data_dir: PathBuf::from("data"),
            routing: RoutingConfig::default(),
            inventory_aliases: InventoryAliases::default(),
            location_aliases: LocationAliases::default(),
            geodesic: GeodesicConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: JSON 配置文件路径；None 时使用内置默认值
    ///
    /// # 说明
    /// - 文件中缺省的字段回落到默认值
    pub fn load(path: Option<&Path>) -> ConvertResult<Self> {
        let config = match path {
            None => Self::default(),
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|e| ConvertError::ConfigReadError {
                    path: p.display().to_string(),
                    message: e.to_string(),
                })?;
                Self::from_json_str(&raw).map_err(|e| match e {
                    ConvertError::ConfigParseError { message, .. } => {
                        ConvertError::ConfigParseError {
                            path: p.display().to_string(),
                            message,
                        }
                    }
                    other => other,
                })?
            }
        };
        Ok(config)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(raw: &str) -> ConvertResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConvertError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConvertResult<()> {
        let invalid = |message: String| ConvertError::ConfigParseError {
            path: "<inline>".to_string(),
            message,
        };

        if !(self.geodesic.earth_radius_miles.is_finite() && self.geodesic.earth_radius_miles > 0.0)
        {
            return Err(invalid(format!(
                "earth_radius_miles 必须为正数: {}",
                self.geodesic.earth_radius_miles
            )));
        }
        if self.geodesic.distance_decimals > 10 {
            return Err(invalid(format!(
                "distance_decimals 超出范围 [0, 10]: {}",
                self.geodesic.distance_decimals
            )));
        }
        if self.routing.csv_extensions.is_empty() {
            return Err(invalid("csv_extensions 不能为空".to_string()));
        }
        if self.geodesic.spreadsheet_extensions.is_empty() {
            return Err(invalid("spreadsheet_extensions 不能为空".to_string()));
        }
        if self.inventory_aliases.sku.is_empty() {
            return Err(invalid("inventory_aliases.sku 不能为空".to_string()));
        }
        Ok(())
    }

    /// 命令行覆写源目录/输出目录
    pub fn with_dirs(mut self, raw_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = raw_dir {
            self.raw_dir = dir;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

// ==========================================
// RoutingConfig - CSV 路由规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// 参与转换的扩展名（不区分大小写，不含点）
    pub csv_extensions: Vec<String>,

    /// 文件名包含该关键字 → 库存路由（优先于付款方关键字）
    pub inventory_keyword: String,

    /// 库存输出文件名
    pub inventory_output: String,

    /// 付款方关键字，按优先级排列
    pub payer_keywords: Vec<String>,

    /// 费率表输出文件名前缀
    pub allowables_prefix: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            csv_extensions: strings(&["csv"]),
            inventory_keyword: "inventory".to_string(),
            inventory_output: "inventory.json".to_string(),
            payer_keywords: strings(&["medicaid", "medicare", "commercial"]),
            allowables_prefix: "allowables_".to_string(),
        }
    }
}

// ==========================================
// InventoryAliases - 库存字段别名
// ==========================================
// 每个逻辑字段对应一个有序的候选列名列表，首个有值者生效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryAliases {
    pub sku: Vec<String>,
    pub name: Vec<String>,
    pub hcpcs: Vec<String>,
    pub on_hand: Vec<String>,
    pub reorder_point: Vec<String>,
    pub avg_cost: Vec<String>,
    pub rental_rate: Vec<String>,
}

impl Default for InventoryAliases {
    fn default() -> Self {
        Self {
            sku: strings(&["sku", "SKU", "Sku"]),
            name: strings(&["name", "Name", "description", "Description"]),
            hcpcs: strings(&["hcpcs", "HCPCS", "Hcpcs"]),
            on_hand: strings(&["onHand", "onhand", "OnHand", "quantity"]),
            reorder_point: strings(&[
                "reorderPoint",
                "reorderpoint",
                "ReorderPoint",
                "reorder_point",
            ]),
            avg_cost: strings(&["avgCost", "avgcost", "AvgCost", "avg_cost"]),
            rental_rate: strings(&["rentalRate", "rentalrate", "RentalRate", "rental_rate"]),
        }
    }
}

// ==========================================
// LocationAliases - 点位字段别名
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationAliases {
    pub city: Vec<String>,
    pub state: Vec<String>,
    pub lat: Vec<String>,
    pub lng: Vec<String>,
}

impl Default for LocationAliases {
    fn default() -> Self {
        Self {
            city: strings(&["city", "City", "town", "Town"]),
            state: strings(&["state", "state_name", "State", "province"]),
            lat: strings(&["lat", "Lat", "latitude", "Latitude"]),
            lng: strings(&["lng", "Lng", "longitude", "Longitude"]),
        }
    }
}

// ==========================================
// GeodesicConfig - 司机协助表参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeodesicConfig {
    /// 地球半径（英里）
    pub earth_radius_miles: f64,

    /// 距离保留小数位
    pub distance_decimals: u32,

    /// 表格扩展名（不区分大小写，不含点）
    pub spreadsheet_extensions: Vec<String>,

    /// 文件名必须同时包含的子串（小写比较）
    pub name_keywords: Vec<String>,

    /// 输出文件名
    pub output_file: String,
}

impl Default for GeodesicConfig {
    fn default() -> Self {
        Self {
            earth_radius_miles: 3958.8,
            distance_decimals: 2,
            spreadsheet_extensions: strings(&["xlsx"]),
            name_keywords: strings(&["driver", "assist"]),
            output_file: "driver_assist.json".to_string(),
        }
    }
}
