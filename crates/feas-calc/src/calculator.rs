//! 可行性主計算器
//!
//! 純計算：對每個產品求出最大可生產量與限制因素。
//! 不讀寫任何共享狀態，對相同快照重複計算得到相同結果。

use std::collections::HashMap;

use rayon::prelude::*;
use rust_decimal::Decimal;

use feas_bom::{materials_by_id, BomResolver, ResolvedBomLine};
use feas_core::{MaterialId, Product, RawMaterial};

use crate::{
    FeasibilityResult, FeasibilityWarning, LimitingFactor, ProductionSuggestion,
};

/// 單一產品的可行性
#[derive(Debug, Clone)]
pub struct ProductFeasibility {
    /// 最大可生產量
    pub max_quantity: u64,

    /// 限制因素（BOM 為空時為 None）
    pub limiting: Option<LimitingFactor>,

    /// 解析後的組成明細
    pub lines: Vec<ResolvedBomLine>,

    /// 未解析的物料
    pub unresolved: Vec<MaterialId>,
}

/// 可行性計算器
pub struct FeasibilityCalculator;

impl FeasibilityCalculator {
    /// 主計算入口
    ///
    /// 對每個產品獨立計算（快照唯讀，可安全並行），再依總價值排名。
    /// 永不失敗：未解析物料以警告呈現，不中斷其他產品的計算。
    pub fn evaluate(products: &[Product], materials: &[RawMaterial]) -> FeasibilityResult {
        tracing::info!(
            "開始可行性計算：產品 {} 筆，物料 {} 筆",
            products.len(),
            materials.len()
        );

        let start_time = std::time::Instant::now();
        let index = materials_by_id(materials);

        // 逐產品計算（rayon 保持輸入順序，平手排序因此可重現）
        let evaluated: Vec<(&Product, ProductFeasibility)> = products
            .par_iter()
            .map(|product| (product, Self::evaluate_product(product, &index)))
            .collect();

        let mut result = FeasibilityResult::empty();

        for (product, feasibility) in evaluated {
            for material_id in &feasibility.unresolved {
                result.add_warning(FeasibilityWarning::unresolved_material(
                    product.id,
                    *material_id,
                ));
            }

            // BOM 為空或可生產量為 0 的產品不進入建議
            if !product.has_bom() || feasibility.max_quantity == 0 {
                tracing::debug!("產品 {} 不可生產，略過", product.code);
                continue;
            }

            let total_value =
                product.unit_value * Decimal::from(feasibility.max_quantity);

            result.suggestions.push(ProductionSuggestion {
                product_id: product.id,
                product_code: product.code.clone(),
                product_name: product.name.clone(),
                unit_value: product.unit_value,
                max_quantity: feasibility.max_quantity,
                total_value,
                limiting: feasibility.limiting,
                lines: feasibility.lines,
            });
        }

        crate::ranking::rank(&mut result.suggestions);
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "可行性計算完成，建議 {} 筆，警告 {} 筆，耗時 {:?}",
            result.suggestions.len(),
            result.warnings.len(),
            start_time.elapsed()
        );

        result
    }

    /// 單一產品的可行性計算
    ///
    /// `max_quantity = min(floor(庫存 / 單件用量))`，
    /// 限制因素取達到最小值的第一行（BOM 順序，平手時穩定）。
    pub fn evaluate_product(
        product: &Product,
        materials_by_id: &HashMap<MaterialId, &RawMaterial>,
    ) -> ProductFeasibility {
        let lines = BomResolver::resolve(product, materials_by_id);

        if lines.is_empty() {
            return ProductFeasibility {
                max_quantity: 0,
                limiting: None,
                lines,
                unresolved: Vec::new(),
            };
        }

        let unresolved: Vec<MaterialId> = lines
            .iter()
            .filter(|line| !line.is_resolved())
            .map(|line| line.material_id)
            .collect();

        let mut max_quantity = u64::MAX;
        let mut limiting_line: Option<&ResolvedBomLine> = None;

        for line in &lines {
            let possible = line.possible_units();
            // 嚴格小於：平手時保留先出現的行
            if possible < max_quantity {
                max_quantity = possible;
                limiting_line = Some(line);
            }
        }

        let limiting = limiting_line.map(|line| LimitingFactor {
            material_id: line.material_id,
            material_name: line.material_name.clone(),
            required_per_unit: line.required_per_unit,
            available: line.available.unwrap_or(0),
        });

        ProductFeasibility {
            max_quantity,
            limiting,
            lines,
            unresolved,
        }
    }
}
