// ==========================================
// 表格归一化工具 - 源文件枚举
// ==========================================
// 按扩展名（不区分大小写）过滤目录，结果按文件名排序，
// 保证同名输出的"最后写入者"在不同文件系统上一致
// ==========================================

use crate::importer::error::{ConvertError, ConvertResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文件名（不含目录）
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 扩展名是否在集合内（不区分大小写，集合元素不含点）
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// 文件名（小写）是否同时包含全部关键字
pub fn name_contains_all(file_name: &str, keywords: &[String]) -> bool {
    let lower = file_name.to_lowercase();
    keywords.iter().all(|k| lower.contains(&k.to_lowercase()))
}

/// 列出目录下指定扩展名的文件
///
/// # 返回
/// - Ok(Vec<PathBuf>): 按文件名升序
/// - Err(SourceDirNotFound): 目录不存在
pub fn list_sources(dir: &Path, extensions: &[String]) -> ConvertResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConvertError::SourceDirNotFound(dir.display().to_string()));
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extensions) {
            sources.push(path);
        }
    }
    sources.sort_by_key(|p| file_name_of(p));

    debug!(dir = %dir.display(), count = sources.len(), "源文件枚举完成");
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_list_sources_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.csv", "A.CSV", "notes.txt", "c.xlsx"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let sources = list_sources(dir.path(), &exts(&["csv"])).unwrap();
        let names: Vec<String> = sources.iter().map(|p| file_name_of(p)).collect();

        assert_eq!(names, vec!["A.CSV", "b.csv"]);
    }

    #[test]
    fn test_list_sources_missing_dir() {
        let result = list_sources(Path::new("definitely/not/here"), &exts(&["csv"]));
        assert!(matches!(result, Err(ConvertError::SourceDirNotFound(_))));
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("x/DriverAssist.XLSX"), &exts(&["xlsx"])));
        assert!(has_extension(Path::new("a.csv"), &exts(&[".csv"])));
        assert!(!has_extension(Path::new("a.csv.bak"), &exts(&["csv"])));
        assert!(!has_extension(Path::new("README"), &exts(&["csv"])));
    }

    #[test]
    fn test_name_contains_all() {
        let keywords = exts(&["driver", "assist"]);
        assert!(name_contains_all("Driver Assist 2024.xlsx", &keywords));
        assert!(name_contains_all("DRIVERASSIST.xlsx", &keywords));
        assert!(!name_contains_all("driver_list.xlsx", &keywords));
        assert!(!name_contains_all("assist.xlsx", &keywords));
    }
}
