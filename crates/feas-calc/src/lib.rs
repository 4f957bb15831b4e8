//! # Feasibility Calculation Engine
//!
//! 生產可行性計算引擎：由產品 BOM 與物料庫存推導可生產量、
//! 排名生產建議，並執行實際的生產扣料。

pub mod calculator;
pub mod executor;
pub mod ranking;

// Re-export 主要類型
pub use calculator::{FeasibilityCalculator, ProductFeasibility};
pub use executor::{Consumption, ExecutionOutcome, ProductionExecutor};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use feas_bom::ResolvedBomLine;
use feas_core::{MaterialId, ProductId};

/// 生產建議（每次計算重新導出，不就地修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSuggestion {
    /// 產品ID
    pub product_id: ProductId,

    /// 產品代碼
    pub product_code: String,

    /// 產品名稱
    pub product_name: String,

    /// 單件價值
    pub unit_value: Decimal,

    /// 最大可生產量
    pub max_quantity: u64,

    /// 總價值 = 單件價值 × 最大可生產量
    pub total_value: Decimal,

    /// 限制因素：決定可生產量的那一行 BOM
    pub limiting: Option<LimitingFactor>,

    /// 組成明細（BOM 順序）
    pub lines: Vec<ResolvedBomLine>,
}

/// 限制因素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitingFactor {
    /// 物料ID
    pub material_id: MaterialId,

    /// 物料名稱
    pub material_name: String,

    /// 單件用量
    pub required_per_unit: u64,

    /// 現有庫存
    pub available: u64,
}

/// 可行性計算結果
#[derive(Debug, Clone)]
pub struct FeasibilityResult {
    /// 排名後的生產建議
    pub suggestions: Vec<ProductionSuggestion>,

    /// 警告信息（未解析物料等，不中斷計算）
    pub warnings: Vec<FeasibilityWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl FeasibilityResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            suggestions: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: FeasibilityWarning) {
        self.warnings.push(warning);
    }
}

/// 可行性警告
#[derive(Debug, Clone)]
pub struct FeasibilityWarning {
    pub product_id: ProductId,
    pub material_id: Option<MaterialId>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl FeasibilityWarning {
    pub fn new(
        product_id: ProductId,
        material_id: Option<MaterialId>,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            product_id,
            material_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: ProductId, message: String) -> Self {
        Self::new(product_id, None, message, WarningSeverity::Info)
    }

    pub fn unresolved_material(product_id: ProductId, material_id: MaterialId) -> Self {
        Self::new(
            product_id,
            Some(material_id),
            format!("BOM 引用的物料 {} 不在庫存快照中，該產品可生產量為 0", material_id),
            WarningSeverity::Warning,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
