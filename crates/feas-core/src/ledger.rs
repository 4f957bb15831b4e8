//! 庫存帳
//!
//! 庫存數量唯一的變動入口。手動增減與生產扣料都經由這裡，
//! 多行扣料以「全有或全無」方式套用。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{EngineError, MaterialId, RawMaterial, Result};

/// 庫存帳：物料ID → 現有庫存
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    on_hand: HashMap<MaterialId, u64>,
}

impl StockLedger {
    /// 創建空的庫存帳
    pub fn new() -> Self {
        Self {
            on_hand: HashMap::new(),
        }
    }

    /// 由物料快照建立庫存帳
    pub fn from_materials(materials: &[RawMaterial]) -> Self {
        Self {
            on_hand: materials.iter().map(|m| (m.id, m.stock_qty)).collect(),
        }
    }

    /// 查詢現有庫存
    ///
    /// 回傳 `None` 表示該物料不在帳上（未解析的 BOM 引用與庫存 0 是不同狀態）。
    pub fn on_hand(&self, material_id: MaterialId) -> Option<u64> {
        self.on_hand.get(&material_id).copied()
    }

    /// 帳上物料數量
    pub fn len(&self) -> usize {
        self.on_hand.len()
    }

    /// 帳是否為空
    pub fn is_empty(&self) -> bool {
        self.on_hand.is_empty()
    }

    /// 手動調整庫存（正數入庫、負數出庫）
    ///
    /// 出庫不可使庫存為負。回傳調整後的庫存。
    pub fn adjust(&mut self, material_id: MaterialId, delta: i64) -> Result<u64> {
        let current = self
            .on_hand
            .get_mut(&material_id)
            .ok_or(EngineError::MaterialNotFound(material_id))?;

        let updated = if delta >= 0 {
            *current + delta as u64
        } else {
            let decrease = delta.unsigned_abs();
            current
                .checked_sub(decrease)
                .ok_or(EngineError::StockUnderflow {
                    material_id,
                    on_hand: *current,
                    attempted: decrease,
                })?
        };

        *current = updated;
        Ok(updated)
    }

    /// 多行扣料，全有或全無
    ///
    /// 先驗證每一行都可扣，再一次套用；任何一行不足時整批不生效。
    pub fn consume(&mut self, lines: &[(MaterialId, u64)]) -> Result<()> {
        for &(material_id, quantity) in lines {
            let on_hand = self
                .on_hand(material_id)
                .ok_or(EngineError::MaterialNotFound(material_id))?;

            if on_hand < quantity {
                return Err(EngineError::StockUnderflow {
                    material_id,
                    on_hand,
                    attempted: quantity,
                });
            }
        }

        for &(material_id, quantity) in lines {
            if let Some(current) = self.on_hand.get_mut(&material_id) {
                *current -= quantity;
            }
        }

        Ok(())
    }

    /// 將帳上數量寫回物料快照，產生新的集合
    ///
    /// 輸入不被修改；不在帳上的物料原樣保留。
    pub fn write_back(&self, materials: &[RawMaterial]) -> Vec<RawMaterial> {
        materials
            .iter()
            .map(|material| {
                let mut updated = material.clone();
                if let Some(qty) = self.on_hand(material.id) {
                    updated.stock_qty = qty;
                }
                updated
            })
            .collect()
    }
}

/// 共享庫存帳
///
/// 以單一臨界區序列化所有調整與扣料，避免兩筆併發提交讀到同一份
/// 過期庫存而共同超扣（lost update）。
#[derive(Debug, Clone, Default)]
pub struct SharedStockLedger {
    inner: Arc<Mutex<StockLedger>>,
}

impl SharedStockLedger {
    /// 由物料快照建立共享庫存帳
    pub fn from_materials(materials: &[RawMaterial]) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StockLedger::from_materials(materials))),
        }
    }

    /// 查詢現有庫存
    pub fn on_hand(&self, material_id: MaterialId) -> Option<u64> {
        self.lock().on_hand(material_id)
    }

    /// 序列化的手動調整
    pub fn adjust(&self, material_id: MaterialId, delta: i64) -> Result<u64> {
        self.lock().adjust(material_id, delta)
    }

    /// 序列化的多行扣料（全有或全無）
    pub fn consume(&self, lines: &[(MaterialId, u64)]) -> Result<()> {
        self.lock().consume(lines)
    }

    /// 取得目前帳面的一致性快照
    pub fn snapshot(&self, materials: &[RawMaterial]) -> Vec<RawMaterial> {
        self.lock().write_back(materials)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StockLedger> {
        // 持鎖方不會 panic，中毒鎖直接還原內層守衛
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
