// ==========================================
// 表格归一化工具 - 转换器 Trait
// ==========================================
// 职责: 定义解析/转换接口（不包含实现）
// ==========================================

use crate::domain::{ConversionReport, RawRecord};
use crate::importer::error::ConvertResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser（测试中可替换为 Mock）
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（列名 → 值，保持列顺序）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 行记录列表（已跳过空行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ConvertResult<Vec<RawRecord>>;
}

// ==========================================
// Converter Trait
// ==========================================
// 用途: 单一输入格式的完整转换流程
// 实现者: CsvConverter, DriverAssistConverter
// 流程: 枚举源文件 → 解析 → 逐行归一化/派生 → 序列化 → 写出
pub trait Converter {
    /// 转换器名称（用于日志与报告）
    fn name(&self) -> &'static str;

    /// 执行一次完整转换
    ///
    /// # 返回
    /// - Ok(ConversionReport): 已转换/已跳过文件汇总
    /// - Err: 任一文件解析失败即终止整个批次
    fn run(&self) -> ConvertResult<ConversionReport>;
}
