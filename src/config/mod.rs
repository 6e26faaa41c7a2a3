// ==========================================
// 表格归一化工具 - 配置层
// ==========================================
// 职责: 目录、路由关键字、列名别名、测地参数
// 来源: 内置默认值 < JSON 配置文件 < 命令行覆写
// ==========================================

pub mod converter_config;

// 重导出核心配置
pub use converter_config::{
    ConverterConfig, GeodesicConfig, InventoryAliases, LocationAliases, RoutingConfig,
};
