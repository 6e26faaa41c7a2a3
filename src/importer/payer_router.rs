// ==========================================
// 表格归一化工具 - 付款方路由
// ==========================================
// 职责: 按文件名将 CSV 归类到库存或某一付款方
// 顺序: inventory > 付款方关键字（按配置顺序）> 文件名兜底
// ==========================================

use crate::config::RoutingConfig;
use crate::domain::OutputRoute;
use std::path::Path;

pub struct PayerRouter<'a> {
    routing: &'a RoutingConfig,
}

impl<'a> PayerRouter<'a> {
    pub fn new(routing: &'a RoutingConfig) -> Self {
        Self { routing }
    }

    /// 根据文件名确定输出路由（不区分大小写）
    pub fn route(&self, file_name: &str) -> OutputRoute {
        let lower = file_name.to_lowercase();

        if !self.routing.inventory_keyword.is_empty()
            && lower.contains(&self.routing.inventory_keyword.to_lowercase())
        {
            return OutputRoute::Inventory;
        }

        let payer = self
            .routing
            .payer_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .find(|k| !k.is_empty() && lower.contains(k.as_str()))
            .unwrap_or_else(|| fallback_payer(file_name));

        OutputRoute::Allowables { payer }
    }

    /// 路由 → 输出文件名
    pub fn output_file_name(&self, route: &OutputRoute) -> String {
        match route {
            OutputRoute::Inventory => self.routing.inventory_output.clone(),
            OutputRoute::Allowables { payer } => {
                format!("{}{}.json", self.routing.allowables_prefix, payer)
            }
        }
    }
}

/// 兜底付款方: 去扩展名、去所有空白、转小写
pub fn fallback_payer(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    stem.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
