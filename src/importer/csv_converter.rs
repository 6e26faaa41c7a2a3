// ==========================================
// 表格归一化工具 - CSV 转换器
// ==========================================
// 流程: 枚举 CSV → 解析 → 路由（库存/付款方）→ 库存行归一化 → 写出
// 策略: 任一文件解析失败即终止整个批次；同名输出最后写入者生效
// ==========================================

use crate::config::ConverterConfig;
use crate::domain::{ConversionReport, InventoryRecord, OutputRoute};
use crate::importer::converter_trait::{Converter, FileParser};
use crate::importer::error::ConvertResult;
use crate::importer::field_mapper::InventoryFieldMapper;
use crate::importer::file_parser::CsvParser;
use crate::importer::output_writer::JsonOutputWriter;
use crate::importer::payer_router::PayerRouter;
use crate::importer::source_scanner::{file_name_of, list_sources};
use tracing::{debug, info, instrument, warn};

pub struct CsvConverter {
    config: ConverterConfig,
    file_parser: Box<dyn FileParser>,
}

impl CsvConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_parser(config, Box::new(CsvParser))
    }

    pub fn with_parser(config: ConverterConfig, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            config,
            file_parser,
        }
    }
}

impl Converter for CsvConverter {
    fn name(&self) -> &'static str {
        "csv"
    }

    #[instrument(skip(self), fields(raw_dir = %self.config.raw_dir.display()))]
    fn run(&self) -> ConvertResult<ConversionReport> {
        let sources = list_sources(&self.config.raw_dir, &self.config.routing.csv_extensions)?;
        info!(files = sources.len(), "开始转换 CSV 文件");

        let router = PayerRouter::new(&self.config.routing);
        let writer = JsonOutputWriter::new(&self.config.data_dir);
        let inventory_mapper = InventoryFieldMapper::new(self.config.inventory_aliases.clone());
        let mut report = ConversionReport::new(self.name());

        for path in sources {
            let file_name = file_name_of(&path);

            // === 步骤 1: 解析文件（失败直接上抛） ===
            let records = self.file_parser.parse_to_raw_records(&path)?;

            // === 步骤 2: 路由 ===
            let route = router.route(&file_name);
            let output = router.output_file_name(&route);
            debug!(source = %file_name, route = %route, "路由完成");

            if report.converted.iter().any(|c| c.output == output) {
                warn!(source = %file_name, output = %output, "输出文件已由本批次写出，将被覆盖");
            }

            // === 步骤 3: 归一化 + 写出 ===
            let rows = match &route {
                OutputRoute::Inventory => {
                    let items: Vec<InventoryRecord> = records
                        .iter()
                        .enumerate()
                        .map(|(idx, row)| inventory_mapper.map(row, idx + 1))
                        .collect();
                    writer.write(&output, &items)?;
                    items.len()
                }
                OutputRoute::Allowables { .. } => {
                    writer.write(&output, &records)?;
                    records.len()
                }
            };

            info!(source = %file_name, output = %output, rows, "Converted {} -> {}", file_name, output);
            report.record_converted(&file_name, &output, rows);
        }

        info!(
            files = report.converted.len(),
            rows = report.total_rows(),
            "CSV 转换完成"
        );
        Ok(report)
    }
}
