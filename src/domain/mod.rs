// ==========================================
// 表格归一化工具 - 领域模型层
// ==========================================
// 职责: 定义记录实体、路由类型、转换报告
// 红线: 不含文件读写,不含解析逻辑
// ==========================================

pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use record::{InventoryRecord, LocationRecord, RawRecord};
pub use report::{ConversionReport, ConvertedFile, SkippedFile};
pub use types::{GeoPoint, OutputRoute};
