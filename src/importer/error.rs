// ==========================================
// 表格归一化工具 - 转换模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 解析失败一律上抛，终止整个批次
// ==========================================

use thiserror::Error;

/// 转换模块错误类型
#[derive(Error, Debug)]
pub enum ConvertError {
    // ===== 目录/文件相关错误 =====
    #[error("源目录不存在: {0}")]
    SourceDirNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 解析错误 =====
    #[error("CSV 解析失败 ({file}): {message}")]
    CsvParseError { file: String, message: String },

    #[error("Excel 解析失败 ({file}): {message}")]
    ExcelParseError { file: String, message: String },

    // ===== 输出错误 =====
    #[error("输出写入失败 ({path}): {message}")]
    OutputWriteError { path: String, message: String },

    #[error("JSON 序列化失败: {0}")]
    SerializeError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置格式错误 ({path}): {message}")]
    ConfigParseError { path: String, message: String },
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::SerializeError(err.to_string())
    }
}

/// Result 类型别名
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_contains_file() {
        let err = ConvertError::CsvParseError {
            file: "medicaid.csv".to_string(),
            message: "found record with 3 fields".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("medicaid.csv"));
        assert!(msg.contains("3 fields"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConvertError = io.into();
        assert!(matches!(err, ConvertError::FileReadError(_)));
    }
}
