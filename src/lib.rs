//! # Feasibility
//!
//! 生產可行性引擎：追蹤原物料庫存與成品 BOM，計算每個產品目前
//! 最多可生產幾件、總價值多少、受哪種物料限制，並在實際生產時
//! 以全有或全無方式扣料後重算。
//!
//! 外部儲存層擁有物料與產品資料；本引擎只借用唯讀快照計算，
//! 並以全新集合回傳結果，不就地修改任何輸入。

pub mod engine;

// Re-export 主要類型
pub use engine::{ExecutionReport, FeasibilityEngine};

pub use feas_bom::{BomResolver, ResolvedBomLine};
pub use feas_cache::{DirtyTracker, SuggestionCache};
pub use feas_calc::{
    ExecutionOutcome, FeasibilityCalculator, FeasibilityResult, LimitingFactor,
    ProductionExecutor, ProductionSuggestion,
};
pub use feas_core::{
    BomLine, Catalog, EngineError, MaterialId, Product, ProductId, RawMaterial,
    SharedStockLedger, StockLedger,
};

/// 計算生產可行性（核心介面，無快取）
///
/// 純函數：相同快照重複呼叫得到相同結果。
pub fn get_feasibility(products: &[Product], materials: &[RawMaterial]) -> FeasibilityResult {
    FeasibilityCalculator::evaluate(products, materials)
}

/// 執行生產（核心介面）
///
/// 成功時回傳扣料後的新快照；失敗以類型化錯誤回報。
pub fn execute_production(
    product_id: ProductId,
    quantity: i64,
    products: &[Product],
    materials: &[RawMaterial],
) -> feas_core::Result<ExecutionOutcome> {
    ProductionExecutor::execute(product_id, quantity, products, materials)
}
