//! 產品與 BOM 模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MaterialId, ProductId, Result};

/// BOM 明細行
///
/// 不變量：同一產品的 BOM 中，每個物料至多出現一次；單位用量必須為正整數。
/// 兩者都在編輯 BOM 時檢查，可行性計算假設輸入已合法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    /// 物料ID
    pub material_id: MaterialId,

    /// 生產一件產品所需的用量
    pub qty_per_unit: u64,
}

/// 產品（成品）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: ProductId,

    /// 產品代碼（唯一）
    pub code: String,

    /// 產品名稱
    pub name: String,

    /// 單件價值
    pub unit_value: Decimal,

    /// BOM：依建立順序排列的明細行
    pub bom: Vec<BomLine>,
}

impl Product {
    /// 創建新的產品（BOM 為空）
    pub fn new(
        id: impl Into<ProductId>,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            unit_value,
            bom: Vec::new(),
        }
    }

    /// 建構器模式：附加一筆 BOM 明細
    pub fn with_bom_line(mut self, material_id: impl Into<MaterialId>, qty_per_unit: u64) -> Result<Self> {
        self.add_bom_line(material_id, qty_per_unit)?;
        Ok(self)
    }

    /// 附加一筆 BOM 明細
    ///
    /// 拒絕零用量與重複物料。
    pub fn add_bom_line(&mut self, material_id: impl Into<MaterialId>, qty_per_unit: u64) -> Result<()> {
        let material_id = material_id.into();

        if qty_per_unit == 0 {
            return Err(EngineError::InvalidBomQuantity);
        }
        if self.bom.iter().any(|line| line.material_id == material_id) {
            return Err(EngineError::DuplicateBomLine {
                product_id: self.id,
                material_id,
            });
        }

        self.bom.push(BomLine {
            material_id,
            qty_per_unit,
        });
        Ok(())
    }

    /// 新增或更新一筆 BOM 明細
    ///
    /// 物料已存在時改寫其用量，否則附加新行。
    pub fn set_bom_line(&mut self, material_id: impl Into<MaterialId>, qty_per_unit: u64) -> Result<()> {
        let material_id = material_id.into();

        if qty_per_unit == 0 {
            return Err(EngineError::InvalidBomQuantity);
        }

        match self.bom.iter_mut().find(|line| line.material_id == material_id) {
            Some(line) => {
                line.qty_per_unit = qty_per_unit;
                Ok(())
            }
            None => self.add_bom_line(material_id, qty_per_unit),
        }
    }

    /// 移除一筆 BOM 明細
    pub fn remove_bom_line(&mut self, material_id: impl Into<MaterialId>) -> Result<()> {
        let material_id = material_id.into();

        let position = self
            .bom
            .iter()
            .position(|line| line.material_id == material_id)
            .ok_or(EngineError::BomLineNotFound {
                product_id: self.id,
                material_id,
            })?;

        self.bom.remove(position);
        Ok(())
    }

    /// 檢查產品是否定義了 BOM
    pub fn has_bom(&self) -> bool {
        !self.bom.is_empty()
    }

    /// 檢查 BOM 是否引用指定物料
    pub fn uses_material(&self, material_id: MaterialId) -> bool {
        self.bom.iter().any(|line| line.material_id == material_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.code, "PROD-001");
        assert!(!product.has_bom());
    }

    #[test]
    fn test_bom_builder() {
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(10, 1)
            .unwrap()
            .with_bom_line(11, 2)
            .unwrap();

        assert!(product.has_bom());
        assert_eq!(product.bom.len(), 2);
        // BOM 保持建立順序
        assert_eq!(product.bom[0].material_id, MaterialId::new(10));
        assert_eq!(product.bom[1].qty_per_unit, 2);
    }

    #[test]
    fn test_duplicate_bom_line_rejected() {
        let mut product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));
        product.add_bom_line(10, 1).unwrap();

        let err = product.add_bom_line(10, 3).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateBomLine { .. }));
        assert_eq!(product.bom.len(), 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));

        let err = product.add_bom_line(10, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBomQuantity));
    }

    #[test]
    fn test_set_bom_line_updates_in_place() {
        let mut product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));
        product.add_bom_line(10, 1).unwrap();
        product.add_bom_line(11, 2).unwrap();

        product.set_bom_line(10, 4).unwrap();

        assert_eq!(product.bom.len(), 2);
        assert_eq!(product.bom[0].qty_per_unit, 4);
        // 更新不改變順序
        assert_eq!(product.bom[0].material_id, MaterialId::new(10));
    }

    #[test]
    fn test_remove_bom_line() {
        let mut product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));
        product.add_bom_line(10, 1).unwrap();

        product.remove_bom_line(10).unwrap();
        assert!(!product.has_bom());

        let err = product.remove_bom_line(10).unwrap_err();
        assert!(matches!(err, EngineError::BomLineNotFound { .. }));
    }

    #[test]
    fn test_uses_material() {
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(10, 1)
            .unwrap();

        assert!(product.uses_material(MaterialId::new(10)));
        assert!(!product.uses_material(MaterialId::new(99)));
    }
}
