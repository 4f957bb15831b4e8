//! 生產執行器
//!
//! 驗證請求量、對快照重算可行性，然後以全有或全無方式扣料。
//! 狀態機：Idle → Validating → {Committed | Rejected}，終態即結束，
//! 重試由呼叫端重新取快照後再提交。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use feas_bom::materials_by_id;
use feas_core::{EngineError, MaterialId, Product, ProductId, RawMaterial, Result, StockLedger};

use crate::FeasibilityCalculator;

/// 單一物料的消耗明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    /// 物料ID
    pub material_id: MaterialId,

    /// 物料名稱
    pub material_name: String,

    /// 本次消耗量
    pub consumed: u64,

    /// 扣料後剩餘庫存
    pub remaining: u64,
}

/// 生產執行結果（已提交）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// 生產批次ID
    pub run_id: Uuid,

    /// 產品ID
    pub product_id: ProductId,

    /// 實際生產量
    pub quantity: u64,

    /// 本批產出的總價值
    pub total_value: Decimal,

    /// 逐物料消耗明細（BOM 順序）
    pub consumed: Vec<Consumption>,

    /// 扣料後的新物料快照（輸入不被修改）
    pub updated_materials: Vec<RawMaterial>,
}

/// 生產執行器
pub struct ProductionExecutor;

impl ProductionExecutor {
    /// 執行一次生產
    ///
    /// 不信任呼叫端帶來的可生產量，一律對傳入快照重新驗證，
    /// 關閉過期資料造成的超扣窗口。提交後呼叫端應對所有產品
    /// 重算可行性（一種物料可能同時限制多個產品）。
    pub fn execute(
        product_id: ProductId,
        requested_qty: i64,
        products: &[Product],
        materials: &[RawMaterial],
    ) -> Result<ExecutionOutcome> {
        tracing::debug!("生產請求：產品 {}，數量 {}", product_id, requested_qty);

        if requested_qty <= 0 {
            return Err(EngineError::InvalidQuantity(requested_qty));
        }
        let requested = requested_qty as u64;

        let product = products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(EngineError::ProductNotFound(product_id))?;

        if !product.has_bom() {
            return Err(EngineError::EmptyBom(product_id));
        }

        // 重新驗證可行性
        let index = materials_by_id(materials);
        let feasibility = FeasibilityCalculator::evaluate_product(product, &index);

        if requested > feasibility.max_quantity {
            let limiting = feasibility
                .limiting
                .as_ref()
                .map(|l| l.material_id)
                // BOM 非空時必有限制因素
                .unwrap_or_else(|| product.bom[0].material_id);

            tracing::warn!(
                "生產請求遭拒：產品 {} 請求 {} 件，最多 {} 件",
                product.code,
                requested,
                feasibility.max_quantity
            );

            return Err(EngineError::InsufficientStock {
                product_id,
                limiting_material: limiting,
                requested,
                available: feasibility.max_quantity,
                shortfall: requested - feasibility.max_quantity,
            });
        }

        // 扣料：整批一次套用
        let consumption_lines: Vec<(MaterialId, u64)> = product
            .bom
            .iter()
            .map(|line| (line.material_id, line.qty_per_unit * requested))
            .collect();

        let mut ledger = StockLedger::from_materials(materials);
        ledger.consume(&consumption_lines)?;

        let consumed = product
            .bom
            .iter()
            .map(|line| Consumption {
                material_id: line.material_id,
                // 通過驗證的 BOM 行必可解析
                material_name: index
                    .get(&line.material_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
                consumed: line.qty_per_unit * requested,
                remaining: ledger.on_hand(line.material_id).unwrap_or(0),
            })
            .collect();

        let outcome = ExecutionOutcome {
            run_id: Uuid::new_v4(),
            product_id,
            quantity: requested,
            total_value: product.unit_value * Decimal::from(requested),
            consumed,
            updated_materials: ledger.write_back(materials),
        };

        tracing::info!(
            "生產已提交：產品 {} × {}，批次 {}",
            product.code,
            requested,
            outcome.run_id
        );

        Ok(outcome)
    }
}
