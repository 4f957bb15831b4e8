//! 原物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MaterialId;

/// 原物料
///
/// `stock_qty` 只能透過庫存帳（ledger）或型錄（catalog）的調整操作變動，
/// 不應被呼叫端直接改寫。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// 物料ID
    pub id: MaterialId,

    /// 物料代碼（唯一）
    pub code: String,

    /// 物料名稱
    pub name: String,

    /// 計量單位
    pub unit: String,

    /// 現有庫存（非負整數）
    pub stock_qty: u64,

    /// 單價
    pub unit_price: Decimal,
}

impl RawMaterial {
    /// 創建新的原物料（預設單位 "un"、單價 0）
    pub fn new(
        id: impl Into<MaterialId>,
        code: impl Into<String>,
        name: impl Into<String>,
        stock_qty: u64,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            unit: "un".to_string(),
            stock_qty,
            unit_price: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置計量單位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// 建構器模式：設置單價
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// 檢查庫存是否足以供應指定數量
    pub fn can_supply(&self, required: u64) -> bool {
        self.stock_qty >= required
    }

    /// 檢查是否缺貨
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_qty == 0
    }
}
