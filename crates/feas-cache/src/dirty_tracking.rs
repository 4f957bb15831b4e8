//! 髒物料追蹤
//!
//! 記錄一次提交動過哪些物料，並能反查受影響的產品：
//! 一種物料可能同時限制多個產品，提交後這些產品都需要重算。

use std::collections::HashSet;

use feas_core::{MaterialId, Product, ProductId};

/// 髒物料追蹤器
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_materials: HashSet<MaterialId>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_materials: HashSet::new(),
        }
    }

    /// 標記物料為髒
    pub fn mark_dirty(&mut self, material_id: MaterialId) {
        self.dirty_materials.insert(material_id);
    }

    /// 檢查物料是否為髒
    pub fn is_dirty(&self, material_id: MaterialId) -> bool {
        self.dirty_materials.contains(&material_id)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_materials.clear();
    }

    /// 獲取所有髒物料
    pub fn dirty_materials(&self) -> Vec<MaterialId> {
        self.dirty_materials.iter().copied().collect()
    }

    /// 反查 BOM 引用了髒物料的產品
    pub fn affected_products(&self, products: &[Product]) -> Vec<ProductId> {
        products
            .iter()
            .filter(|p| {
                p.bom
                    .iter()
                    .any(|line| self.dirty_materials.contains(&line.material_id))
            })
            .map(|p| p.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_mark_and_clear() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(MaterialId::new(1));

        assert!(tracker.is_dirty(MaterialId::new(1)));
        assert!(!tracker.is_dirty(MaterialId::new(2)));

        tracker.clear();
        assert!(tracker.dirty_materials().is_empty());
    }

    #[test]
    fn test_affected_products_spans_shared_material() {
        // 物料 1 同時出現在兩個產品的 BOM 中
        let products = vec![
            Product::new(1, "PROD-A", "產品A", Decimal::from(100))
                .with_bom_line(1, 2)
                .unwrap(),
            Product::new(2, "PROD-B", "產品B", Decimal::from(80))
                .with_bom_line(1, 1)
                .unwrap()
                .with_bom_line(2, 3)
                .unwrap(),
            Product::new(3, "PROD-C", "產品C", Decimal::from(60))
                .with_bom_line(2, 1)
                .unwrap(),
        ];

        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(MaterialId::new(1));

        let affected = tracker.affected_products(&products);
        assert_eq!(affected, vec![ProductId::new(1), ProductId::new(2)]);
    }
}
