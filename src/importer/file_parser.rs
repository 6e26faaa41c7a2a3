// ==========================================
// 表格归一化工具 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls/.ods，取第一个工作表)
// 输出: Vec<RawRecord>，保持列顺序
// ==========================================

use crate::domain::RawRecord;
use crate::importer::converter_trait::FileParser;
use crate::importer::error::{ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// 2^53，超出后浮点无法精确表示整数
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

// 空白表头列的占位列名
const EMPTY_HEADER: &str = "__EMPTY";

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn ensure_exists(path: &Path) -> ConvertResult<()> {
    if !path.exists() {
        return Err(ConvertError::FileReadError(format!(
            "文件不存在: {}",
            path.display()
        )));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 首行为表头；空行跳过；值按原文保留为字符串（不 trim、不转数值）
// 行长度与表头不一致视为格式错误
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ConvertResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let file = File::open(file_path)?;
        self.parse_reader(file, &display_name(file_path))
    }
}

impl CsvParser {
    /// 从任意 Reader 解析（文件名仅用于错误信息）
    pub fn parse_reader<R: Read>(&self, source: R, file_name: &str) -> ConvertResult<Vec<RawRecord>> {
        let csv_error = |e: csv::Error| ConvertError::CsvParseError {
            file: file_name.to_string(),
            message: e.to_string(),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(source);

        // 表头按原文保留（费率表原样透传，别名匹配时再忽略首尾空白）
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let mut row = RawRecord::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                row.insert(header.clone(), Value::String(value.to_string()));
            }
            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表：首行为表头，其余为数据行
// 单元格保持类型（数值仍为数值，日期为序列号）；空单元格不出现在记录中；全空行跳过
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ConvertResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let file_name = display_name(file_path);
        let excel_error = |message: String| ConvertError::ExcelParseError {
            file: file_name.clone(),
            message,
        };

        let mut workbook = open_workbook_auto(file_path).map_err(|e| excel_error(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| excel_error("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| excel_error(e.to_string()))?;

        Ok(records_from_range(&range))
    }
}

/// 表头行 → 列名
///
/// 空白表头记为 `__EMPTY`；重名列依次加后缀 `_1`、`_2`…
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header_row.len());

    for cell in header_row {
        let base = match cell {
            Data::Empty => EMPTY_HEADER.to_string(),
            Data::String(s) if s.is_empty() => EMPTY_HEADER.to_string(),
            other => other.to_string(),
        };

        let name = match seen.get(&base).copied() {
            None => {
                seen.insert(base.clone(), 1);
                base
            }
            Some(mut counter) => {
                let mut candidate = format!("{}_{}", base, counter);
                while seen.contains_key(&candidate) {
                    counter += 1;
                    candidate = format!("{}_{}", base, counter);
                }
                seen.insert(base, counter + 1);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        names.push(name);
    }

    names
}

/// 将工作表区域转换为行记录
///
/// 首行为表头（见 `header_names`）；区域为空时返回空列表
pub fn records_from_range(range: &Range<Data>) -> Vec<RawRecord> {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for data_row in rows {
        let mut row = RawRecord::new();
        for (header, cell) in headers.iter().zip(data_row.iter()) {
            if let Some(value) = cell_to_value(cell) {
                row.insert(header.clone(), value);
            }
        }

        // 跳过完全空白的行
        if row.is_empty() {
            continue;
        }
        records.push(row);
    }

    records
}

/// 单元格 → JSON 值（空单元格返回 None）
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => Some(float_to_value(*f)),
        // 日期/时间按 Excel 序列号输出
        Data::DateTime(dt) => Some(float_to_value(dt.as_f64())),
        Data::Bool(b) => Some(Value::Bool(*b)),
        other => Some(Value::String(other.to_string())),
    }
}

fn float_to_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}
