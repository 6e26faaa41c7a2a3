// ==========================================
// 表格归一化工具 - 司机协助表转换器
// ==========================================
// 流程: 选取文件名同时含 driver/assist 的表格 → 读取第一个工作表
//       → 首行坐标作为 HQ → 逐行归一化并计算 milesFromHQ → 写出
// 策略: 无匹配文件/空工作表仅告警，不视为错误
// ==========================================

use crate::config::ConverterConfig;
use crate::domain::{ConversionReport, LocationRecord};
use crate::importer::converter_trait::{Converter, FileParser};
use crate::importer::derivation::DistanceDerivation;
use crate::importer::error::ConvertResult;
use crate::importer::field_mapper::LocationFieldMapper;
use crate::importer::file_parser::ExcelParser;
use crate::importer::output_writer::JsonOutputWriter;
use crate::importer::source_scanner::{file_name_of, list_sources, name_contains_all};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

pub struct DriverAssistConverter {
    config: ConverterConfig,
    file_parser: Box<dyn FileParser>,
}

impl DriverAssistConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_parser(config, Box::new(ExcelParser))
    }

    pub fn with_parser(config: ConverterConfig, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            config,
            file_parser,
        }
    }

    /// 符合命名规则的表格文件（按文件名排序）
    pub fn matching_sources(&self) -> ConvertResult<Vec<PathBuf>> {
        let geodesic = &self.config.geodesic;
        let sources = list_sources(&self.config.raw_dir, &geodesic.spreadsheet_extensions)?
            .into_iter()
            .filter(|p| name_contains_all(&file_name_of(p), &geodesic.name_keywords))
            .collect();
        Ok(sources)
    }
}

impl Converter for DriverAssistConverter {
    fn name(&self) -> &'static str {
        "driver-assist"
    }

    #[instrument(skip(self), fields(raw_dir = %self.config.raw_dir.display()))]
    fn run(&self) -> ConvertResult<ConversionReport> {
        let geodesic = &self.config.geodesic;
        let mut report = ConversionReport::new(self.name());

        let sources = self.matching_sources()?;
        if sources.is_empty() {
            warn!(
                raw_dir = %self.config.raw_dir.display(),
                "未找到司机协助表格文件，跳过"
            );
            return Ok(report);
        }

        let writer = JsonOutputWriter::new(&self.config.data_dir);
        let mapper = LocationFieldMapper::new(
            self.config.location_aliases.clone(),
            DistanceDerivation::from_config(geodesic),
        );

        for path in sources {
            let file_name = file_name_of(&path);

            // === 步骤 1: 解析第一个工作表 ===
            let rows = self.file_parser.parse_to_raw_records(&path)?;
            let Some(first) = rows.first() else {
                warn!(source = %file_name, "工作表无数据行，跳过");
                report.record_skipped(&file_name, "工作表无数据行");
                continue;
            };

            // === 步骤 2: HQ 参考点 ===
            let hq = mapper.point_of(first);
            if hq.is_none() {
                warn!(source = %file_name, "首行缺少有效坐标，milesFromHQ 将输出 null");
            }

            // === 步骤 3: 归一化 + 距离派生 ===
            let records: Vec<LocationRecord> = rows.iter().map(|row| mapper.map(row, hq)).collect();

            if report.converted.iter().any(|c| c.output == geodesic.output_file) {
                warn!(source = %file_name, output = %geodesic.output_file, "输出文件已由本批次写出，将被覆盖");
            }
            writer.write(&geodesic.output_file, &records)?;

            info!(
                source = %file_name,
                output = %geodesic.output_file,
                rows = records.len(),
                "Converted {} -> {} ({} rows)",
                file_name,
                geodesic.output_file,
                records.len()
            );
            report.record_converted(&file_name, &geodesic.output_file, records.len());
        }

        Ok(report)
    }
}
