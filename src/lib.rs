// ==========================================
// 表格归一化工具 - 核心库
// ==========================================
// 职责: CSV/XLSX 源数据 → 归一化 JSON
// 组成: 付款方路由 / 库存字段归一化 / 点位距离派生
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录实体与类型
pub mod domain;

// 转换层 - 解析、归一化、写出
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::ConverterConfig;
pub use domain::{
    ConversionReport, GeoPoint, InventoryRecord, LocationRecord, OutputRoute, RawRecord,
};
pub use importer::{
    ConvertError, ConvertResult, Converter, CsvConverter, DriverAssistConverter, FileParser,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "tabular-normalizer";
