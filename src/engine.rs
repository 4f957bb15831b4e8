//! 可行性引擎門面
//!
//! 將計算器、執行器與快取接在一起：查詢走快取，
//! 生產提交後立即失效並標記髒物料。快取是顯式注入的元件，
//! 時鐘由呼叫端傳入。

use chrono::{DateTime, Duration, Utc};

use feas_cache::{DirtyTracker, SuggestionCache};
use feas_calc::{FeasibilityCalculator, ProductionExecutor, ProductionSuggestion};
use feas_core::{EngineError, MaterialId, Product, ProductId, RawMaterial};

/// 生產執行回報（呼叫端介面）
///
/// 類型化失敗（無效數量、庫存不足、無 BOM、產品不存在）一律轉成
/// `success = false` 加可讀訊息；`updated_materials` 在失敗時等於輸入快照。
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// 是否提交成功
    pub success: bool,

    /// 給使用者的訊息
    pub message: String,

    /// 扣料後的物料快照（失敗時為原快照）
    pub updated_materials: Vec<RawMaterial>,

    /// 庫存不足時的限制物料
    pub limiting_material_id: Option<MaterialId>,
}

/// 可行性引擎
#[derive(Debug)]
pub struct FeasibilityEngine {
    cache: SuggestionCache,
    dirty: DirtyTracker,
}

impl FeasibilityEngine {
    /// 以指定的快取存活時間創建引擎
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            cache: SuggestionCache::new(cache_ttl),
            dirty: DirtyTracker::new(),
        }
    }

    /// 取得排名後的生產建議
    ///
    /// 快取未過期時直接回傳快取內容，否則重算並寫入。
    pub fn get_feasibility(
        &mut self,
        products: &[Product],
        materials: &[RawMaterial],
        now: DateTime<Utc>,
    ) -> Vec<ProductionSuggestion> {
        if let Some(cached) = self.cache.get(now) {
            tracing::debug!("命中建議快取（{} 筆）", cached.len());
            return cached.to_vec();
        }

        let result = FeasibilityCalculator::evaluate(products, materials);
        for warning in &result.warnings {
            tracing::warn!("產品 {}: {}", warning.product_id, warning.message);
        }

        self.cache.put(result.suggestions.clone(), now);
        result.suggestions
    }

    /// 執行生產
    ///
    /// 提交成功後使快取失效並標記被消耗的物料；之後的查詢
    /// 會對新快照重算所有產品（一種物料可能同時限制多個產品）。
    pub fn execute_production(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        products: &[Product],
        materials: &[RawMaterial],
    ) -> ExecutionReport {
        match ProductionExecutor::execute(product_id, quantity, products, materials) {
            Ok(outcome) => {
                self.cache.invalidate();
                for consumption in &outcome.consumed {
                    self.dirty.mark_dirty(consumption.material_id);
                }

                ExecutionReport {
                    success: true,
                    message: format!(
                        "已生產 {} 件，總價值 {}",
                        outcome.quantity, outcome.total_value
                    ),
                    updated_materials: outcome.updated_materials,
                    limiting_material_id: None,
                }
            }
            Err(err) => {
                let limiting_material_id = match &err {
                    EngineError::InsufficientStock {
                        limiting_material, ..
                    } => Some(*limiting_material),
                    _ => None,
                };

                ExecutionReport {
                    success: false,
                    message: err.to_string(),
                    updated_materials: materials.to_vec(),
                    limiting_material_id,
                }
            }
        }
    }

    /// 上次提交以來受影響的產品（BOM 引用了髒物料者）
    pub fn affected_products(&self, products: &[Product]) -> Vec<ProductId> {
        self.dirty.affected_products(products)
    }

    /// 清除髒標記（呼叫端完成重算後）
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }
}

impl Default for FeasibilityEngine {
    /// 預設快取存活 30 秒（原儀表板的更新週期）
    fn default() -> Self {
        Self::new(Duration::seconds(30))
    }
}
