// ==========================================
// 表格归一化工具 - JSON 输出
// ==========================================
// 输出: UTF-8 压缩 JSON 数组；同名文件无条件覆盖
// ==========================================

use crate::importer::error::{ConvertError, ConvertResult};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub struct JsonOutputWriter {
    data_dir: PathBuf,
}

impl JsonOutputWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 确保输出目录存在（递归创建）
    fn ensure_dir(&self) -> ConvertResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| ConvertError::OutputWriteError {
            path: self.data_dir.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 写出记录数组
    ///
    /// # 返回
    /// - Ok(PathBuf): 写出的完整路径
    pub fn write<T: Serialize>(&self, file_name: &str, records: &[T]) -> ConvertResult<PathBuf> {
        self.ensure_dir()?;

        let path = self.data_dir.join(file_name);
        let bytes = serde_json::to_vec(records)?;
        fs::write(&path, bytes).map_err(|e| ConvertError::OutputWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(path)
    }
}
