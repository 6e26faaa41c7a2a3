// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时源目录/输出目录、Mock 表格解析器
// ==========================================

#![allow(dead_code)]

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tabular_normalizer::importer::source_scanner::file_name_of;
use tabular_normalizer::{ConvertError, ConvertResult, ConverterConfig, FileParser, RawRecord};
use tempfile::TempDir;

/// 临时工作目录（raw-data + data）
pub struct TestWorkspace {
    _dir: TempDir,
    pub raw_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        tabular_normalizer::logging::init_test();

        let dir = TempDir::new().expect("创建临时目录失败");
        let raw_dir = dir.path().join("raw-data");
        let data_dir = dir.path().join("data");
        fs::create_dir_all(&raw_dir).expect("创建 raw-data 失败");

        Self {
            _dir: dir,
            raw_dir,
            data_dir,
        }
    }

    /// 指向本工作目录的默认配置
    pub fn config(&self) -> ConverterConfig {
        ConverterConfig::default().with_dirs(Some(self.raw_dir.clone()), Some(self.data_dir.clone()))
    }

    /// 写入源文件
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.raw_dir.join(name);
        fs::write(&path, content).expect("写入源文件失败");
        path
    }

    /// 输出文件路径
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// 读取输出文件原文
    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_path(name)).expect("读取输出文件失败")
    }

    /// 读取输出文件为 JSON
    pub fn read_output_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read_output(name)).expect("输出文件不是合法 JSON")
    }

    /// 输出目录下的所有文件名（排序）
    pub fn output_names(&self) -> Vec<String> {
        if !self.data_dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = fs::read_dir(&self.data_dir)
            .expect("读取输出目录失败")
            .map(|e| e.expect("读取目录项失败").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// 将 json! 对象转为 RawRecord
pub fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("RawRecord 必须是对象: {other}"),
    }
}

// ==========================================
// MockSheetParser - 测试用表格解析器
// ==========================================
// 按文件名返回预置行；未预置的文件视为解析失败
pub struct MockSheetParser {
    sheets: HashMap<String, Vec<RawRecord>>,
}

impl MockSheetParser {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
        }
    }

    pub fn with_sheet(mut self, file_name: &str, rows: Vec<RawRecord>) -> Self {
        self.sheets.insert(file_name.to_string(), rows);
        self
    }
}

impl FileParser for MockSheetParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ConvertResult<Vec<RawRecord>> {
        let name = file_name_of(file_path);
        self.sheets
            .get(&name)
            .cloned()
            .ok_or_else(|| ConvertError::ExcelParseError {
                file: name,
                message: "mock: 未预置该工作表".to_string(),
            })
    }
}
