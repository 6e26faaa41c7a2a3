// ==========================================
// 表格归一化工具 - 转换报告
// ==========================================
// 每个转换器返回一份报告：已转换文件 + 跳过文件及原因
// ==========================================

use serde::{Deserialize, Serialize};

/// 单个源文件的转换结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedFile {
    /// 源文件名（不含目录）
    pub source: String,
    /// 输出文件名（不含目录）
    pub output: String,
    /// 写出的记录数
    pub rows: usize,
}

/// 被跳过的源文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub source: String,
    pub reason: String,
}

/// 一次转换运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// 转换器名称（csv / driver-assist）
    pub converter: String,
    pub converted: Vec<ConvertedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl ConversionReport {
    pub fn new(converter: impl Into<String>) -> Self {
        Self {
            converter: converter.into(),
            ..Default::default()
        }
    }

    pub fn record_converted(&mut self, source: &str, output: &str, rows: usize) {
        self.converted.push(ConvertedFile {
            source: source.to_string(),
            output: output.to_string(),
            rows,
        });
    }

    pub fn record_skipped(&mut self, source: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            source: source.to_string(),
            reason: reason.into(),
        });
    }

    /// 所有已转换文件的记录总数
    pub fn total_rows(&self) -> usize {
        self.converted.iter().map(|f| f.rows).sum()
    }

    /// 最终落盘的输出文件（同名输出以最后一次写入为准，去重后保持首次出现顺序）
    pub fn outputs(&self) -> Vec<&str> {
        let mut outputs: Vec<&str> = Vec::new();
        for file in &self.converted {
            if !outputs.contains(&file.output.as_str()) {
                outputs.push(&file.output);
            }
        }
        outputs
    }

    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_and_outputs() {
        let mut report = ConversionReport::new("csv");
        report.record_converted("medicaid_2023.csv", "allowables_medicaid.json", 3);
        report.record_converted("medicaid_2024.csv", "allowables_medicaid.json", 4);
        report.record_converted("inv.csv", "inventory.json", 2);

        assert_eq!(report.total_rows(), 9);
        assert_eq!(
            report.outputs(),
            vec!["allowables_medicaid.json", "inventory.json"]
        );
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_skipped() {
        let mut report = ConversionReport::new("driver-assist");
        assert!(report.is_empty());
        report.record_skipped("DriverAssist.xlsx", "工作表无数据行");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.total_rows(), 0);
    }
}
