//! 型錄：物料與產品的登錄簿
//!
//! 站在外部儲存層的位置供應快照。登錄順序被保留，
//! 排名平手時的穩定順序依賴這一點。

use crate::{EngineError, MaterialId, Product, ProductId, RawMaterial, Result};

/// 物料與產品型錄
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    materials: Vec<RawMaterial>,
    products: Vec<Product>,
}

impl Catalog {
    /// 創建空型錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 登錄新物料
    ///
    /// ID 與代碼都必須唯一。
    pub fn register_material(&mut self, material: RawMaterial) -> Result<()> {
        if self.materials.iter().any(|m| m.id == material.id) {
            return Err(EngineError::DuplicateCode(material.id.to_string()));
        }
        if self.materials.iter().any(|m| m.code == material.code) {
            return Err(EngineError::DuplicateCode(material.code.clone()));
        }

        self.materials.push(material);
        Ok(())
    }

    /// 更新既有物料（代碼、名稱、單位、單價）
    ///
    /// 庫存數量不在此處變動，一律走 `adjust_stock`。
    pub fn update_material(&mut self, updated: RawMaterial) -> Result<()> {
        if self
            .materials
            .iter()
            .any(|m| m.code == updated.code && m.id != updated.id)
        {
            return Err(EngineError::DuplicateCode(updated.code.clone()));
        }

        let material = self
            .materials
            .iter_mut()
            .find(|m| m.id == updated.id)
            .ok_or(EngineError::MaterialNotFound(updated.id))?;

        material.code = updated.code;
        material.name = updated.name;
        material.unit = updated.unit;
        material.unit_price = updated.unit_price;
        Ok(())
    }

    /// 刪除物料
    ///
    /// 仍被任何產品 BOM 引用時拒絕（參照完整性）。
    pub fn delete_material(&mut self, material_id: MaterialId) -> Result<()> {
        let position = self
            .materials
            .iter()
            .position(|m| m.id == material_id)
            .ok_or(EngineError::MaterialNotFound(material_id))?;

        if self.products.iter().any(|p| p.uses_material(material_id)) {
            return Err(EngineError::MaterialInUse(material_id));
        }

        self.materials.remove(position);
        Ok(())
    }

    /// 手動調整物料庫存（正數入庫、負數出庫），不可為負
    pub fn adjust_stock(&mut self, material_id: MaterialId, delta: i64) -> Result<u64> {
        let material = self
            .materials
            .iter_mut()
            .find(|m| m.id == material_id)
            .ok_or(EngineError::MaterialNotFound(material_id))?;

        let updated = if delta >= 0 {
            material.stock_qty + delta as u64
        } else {
            let decrease = delta.unsigned_abs();
            material
                .stock_qty
                .checked_sub(decrease)
                .ok_or(EngineError::StockUnderflow {
                    material_id,
                    on_hand: material.stock_qty,
                    attempted: decrease,
                })?
        };

        material.stock_qty = updated;
        Ok(updated)
    }

    /// 登錄新產品
    ///
    /// 代碼必須唯一，BOM 引用的物料必須已登錄。
    pub fn register_product(&mut self, product: Product) -> Result<()> {
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(EngineError::DuplicateCode(product.id.to_string()));
        }
        if self.products.iter().any(|p| p.code == product.code) {
            return Err(EngineError::DuplicateCode(product.code.clone()));
        }
        for line in &product.bom {
            if !self.materials.iter().any(|m| m.id == line.material_id) {
                return Err(EngineError::MaterialNotFound(line.material_id));
            }
        }

        self.products.push(product);
        Ok(())
    }

    /// 更新既有產品（代碼、名稱、單件價值與 BOM）
    pub fn update_product(&mut self, updated: Product) -> Result<()> {
        if self
            .products
            .iter()
            .any(|p| p.code == updated.code && p.id != updated.id)
        {
            return Err(EngineError::DuplicateCode(updated.code.clone()));
        }
        for line in &updated.bom {
            if !self.materials.iter().any(|m| m.id == line.material_id) {
                return Err(EngineError::MaterialNotFound(line.material_id));
            }
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or(EngineError::ProductNotFound(updated.id))?;

        *product = updated;
        Ok(())
    }

    /// 刪除產品
    pub fn delete_product(&mut self, product_id: ProductId) -> Result<()> {
        let position = self
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or(EngineError::ProductNotFound(product_id))?;

        self.products.remove(position);
        Ok(())
    }

    /// 以代碼查詢物料
    pub fn find_material_by_code(&self, code: &str) -> Option<&RawMaterial> {
        self.materials.iter().find(|m| m.code == code)
    }

    /// 以代碼查詢產品
    pub fn find_product_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// 以ID查詢物料
    pub fn material(&self, material_id: MaterialId) -> Option<&RawMaterial> {
        self.materials.iter().find(|m| m.id == material_id)
    }

    /// 以ID查詢產品
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// 物料快照（登錄順序）
    pub fn materials(&self) -> &[RawMaterial] {
        &self.materials
    }

    /// 產品快照（登錄順序）
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .register_material(RawMaterial::new(1, "MAT-001", "鋼板", 50))
            .unwrap();
        catalog
            .register_material(RawMaterial::new(2, "MAT-002", "鋁管", 30))
            .unwrap();
        catalog
    }

    #[test]
    fn test_register_material_rejects_duplicate_code() {
        let mut catalog = sample_catalog();

        let err = catalog
            .register_material(RawMaterial::new(3, "MAT-001", "重複代碼", 10))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateCode(_)));
        assert_eq!(catalog.materials().len(), 2);
    }

    #[test]
    fn test_register_product_requires_known_materials() {
        let mut catalog = sample_catalog();

        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(99, 1)
            .unwrap();

        let err = catalog.register_product(product).unwrap_err();
        assert!(matches!(err, EngineError::MaterialNotFound(_)));
    }

    #[test]
    fn test_delete_material_refused_while_referenced() {
        let mut catalog = sample_catalog();
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(1, 2)
            .unwrap();
        catalog.register_product(product).unwrap();

        let err = catalog.delete_material(MaterialId::new(1)).unwrap_err();
        assert!(matches!(err, EngineError::MaterialInUse(_)));

        // 移除引用後即可刪除
        catalog.delete_product(ProductId::new(1)).unwrap();
        catalog.delete_material(MaterialId::new(1)).unwrap();
        assert!(catalog.material(MaterialId::new(1)).is_none());
    }

    #[test]
    fn test_adjust_stock() {
        let mut catalog = sample_catalog();

        assert_eq!(catalog.adjust_stock(MaterialId::new(1), 25).unwrap(), 75);
        assert_eq!(catalog.adjust_stock(MaterialId::new(1), -75).unwrap(), 0);

        let err = catalog.adjust_stock(MaterialId::new(1), -1).unwrap_err();
        assert!(matches!(err, EngineError::StockUnderflow { .. }));
    }

    #[test]
    fn test_update_material_keeps_stock() {
        let mut catalog = sample_catalog();

        let updated = RawMaterial::new(1, "MAT-001A", "鋼板（厚）", 999)
            .with_unit("kg")
            .with_unit_price(Decimal::new(1250, 2));
        catalog.update_material(updated).unwrap();

        let material = catalog.material(MaterialId::new(1)).unwrap();
        assert_eq!(material.code, "MAT-001A");
        assert_eq!(material.unit, "kg");
        // 庫存只走 adjust_stock，更新不改寫
        assert_eq!(material.stock_qty, 50);
    }

    #[test]
    fn test_find_by_code() {
        let catalog = sample_catalog();

        assert!(catalog.find_material_by_code("MAT-002").is_some());
        assert!(catalog.find_material_by_code("MAT-404").is_none());
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let catalog = sample_catalog();
        let codes: Vec<_> = catalog.materials().iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["MAT-001", "MAT-002"]);
    }
}
