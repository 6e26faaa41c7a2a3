// ==========================================
// 表格归一化工具 - 命令行入口
// ==========================================
// 用法:
//   tabular-normalizer [--config F] [--raw-dir D] [--data-dir D] <csv|driver-assist|all>
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabular_normalizer::logging::{self, LogFormat};
use tabular_normalizer::{Converter, ConverterConfig, CsvConverter, DriverAssistConverter};
use tracing::info;

#[derive(Parser)]
#[command(name = "tabular-normalizer")]
#[command(about = "Convert raw CSV/XLSX exports into normalized JSON lookup files")]
#[command(version)]
struct Cli {
    /// JSON 配置文件（缺省字段使用内置默认值）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 源文件目录（覆盖配置）
    #[arg(long, global = true)]
    raw_dir: Option<PathBuf>,

    /// 输出目录（覆盖配置）
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// 日志格式: text / json
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert payer allowables and inventory CSV files
    Csv,
    /// Convert the driver assist spreadsheet and derive milesFromHQ
    DriverAssist,
    /// Run every converter in sequence (CSV first)
    All,
}

/// 子命令 → 待执行的转换器（按执行顺序）
fn converters_for(command: &Commands, config: ConverterConfig) -> Vec<Box<dyn Converter>> {
    match command {
        Commands::Csv => vec![Box::new(CsvConverter::new(config))],
        Commands::DriverAssist => vec![Box::new(DriverAssistConverter::new(config))],
        Commands::All => vec![
            Box::new(CsvConverter::new(config.clone())),
            Box::new(DriverAssistConverter::new(config)),
        ],
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_format(cli.log_format);

    let config = ConverterConfig::load(cli.config.as_deref())
        .context("加载配置失败")?
        .with_dirs(cli.raw_dir, cli.data_dir);

    info!(
        version = tabular_normalizer::VERSION,
        raw_dir = %config.raw_dir.display(),
        data_dir = %config.data_dir.display(),
        "{} 启动",
        tabular_normalizer::APP_NAME
    );

    for converter in converters_for(&cli.command, config) {
        let report = converter
            .run()
            .with_context(|| format!("{} 转换失败", converter.name()))?;

        info!(
            converter = converter.name(),
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            rows = report.total_rows(),
            outputs = ?report.outputs(),
            "转换汇总"
        );
    }

    Ok(())
}
