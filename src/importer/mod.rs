// ==========================================
// 表格归一化工具 - 转换层
// ==========================================
// 职责: 外部表格文件 → 归一化 JSON
// 支持: CSV（费率表/库存）, Excel（司机协助点位）
// ==========================================

// 模块声明
pub mod converter_trait;
pub mod csv_converter;
pub mod derivation;
pub mod driver_assist_converter;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod output_writer;
pub mod payer_router;
pub mod source_scanner;

// 重导出核心类型
pub use csv_converter::CsvConverter;
pub use derivation::{haversine, round_to_decimals, DistanceDerivation};
pub use driver_assist_converter::DriverAssistConverter;
pub use error::{ConvertError, ConvertResult};
pub use field_mapper::{InventoryFieldMapper, LocationFieldMapper};
pub use file_parser::{CsvParser, ExcelParser};
pub use output_writer::JsonOutputWriter;
pub use payer_router::PayerRouter;

// 重导出 Trait 接口
pub use converter_trait::{Converter, FileParser};
