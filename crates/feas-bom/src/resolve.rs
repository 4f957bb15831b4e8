//! BOM 解析
//!
//! 把產品的 BOM 行對照物料快照，補上名稱與現有庫存，
//! 供顯示與可行性計算使用。純函數，無副作用。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use feas_core::{MaterialId, Product, RawMaterial};

/// 解析後的 BOM 明細行
///
/// `available = None` 表示 BOM 引用了快照中不存在的物料：
/// 該行的需求永遠無法被滿足，產品的可生產量因此為 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBomLine {
    /// 物料ID
    pub material_id: MaterialId,

    /// 物料代碼（未解析時為空字串）
    pub material_code: String,

    /// 物料名稱（未解析時為空字串）
    pub material_name: String,

    /// 單件用量
    pub required_per_unit: u64,

    /// 現有庫存；`None` 表示物料不在快照中
    pub available: Option<u64>,
}

impl ResolvedBomLine {
    /// 該行是否成功解析到物料
    pub fn is_resolved(&self) -> bool {
        self.available.is_some()
    }

    /// 這一行允許的最大生產量 = floor(庫存 / 單件用量)
    ///
    /// 未解析的行視為 0。`required_per_unit` 在編輯 BOM 時已保證為正。
    pub fn possible_units(&self) -> u64 {
        match self.available {
            Some(available) => available / self.required_per_unit,
            None => 0,
        }
    }
}

/// BOM 解析器
pub struct BomResolver;

impl BomResolver {
    /// 解析產品的 BOM
    ///
    /// 產品沒有 BOM 時回傳空列表。行序保持 BOM 順序。
    pub fn resolve(
        product: &Product,
        materials_by_id: &HashMap<MaterialId, &RawMaterial>,
    ) -> Vec<ResolvedBomLine> {
        product
            .bom
            .iter()
            .map(|line| match materials_by_id.get(&line.material_id) {
                Some(material) => ResolvedBomLine {
                    material_id: line.material_id,
                    material_code: material.code.clone(),
                    material_name: material.name.clone(),
                    required_per_unit: line.qty_per_unit,
                    available: Some(material.stock_qty),
                },
                None => ResolvedBomLine {
                    material_id: line.material_id,
                    material_code: String::new(),
                    material_name: String::new(),
                    required_per_unit: line.qty_per_unit,
                    available: None,
                },
            })
            .collect()
    }
}

/// 建立物料ID索引
pub fn materials_by_id(materials: &[RawMaterial]) -> HashMap<MaterialId, &RawMaterial> {
    materials.iter().map(|m| (m.id, m)).collect()
}

/// 檢查物料是否仍被任何產品的 BOM 引用
pub fn material_in_use(products: &[Product], material_id: MaterialId) -> bool {
    products.iter().any(|p| p.uses_material(material_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn sample_materials() -> Vec<RawMaterial> {
        vec![
            RawMaterial::new(1, "MAT-001", "鋼板", 50),
            RawMaterial::new(2, "MAT-002", "鋁管", 30),
        ]
    }

    #[test]
    fn test_resolve_keeps_bom_order() {
        let materials = sample_materials();
        let index = materials_by_id(&materials);
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(2, 1)
            .unwrap()
            .with_bom_line(1, 2)
            .unwrap();

        let lines = BomResolver::resolve(&product, &index);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].material_id, MaterialId::new(2));
        assert_eq!(lines[0].material_name, "鋁管");
        assert_eq!(lines[0].available, Some(30));
        assert_eq!(lines[1].material_id, MaterialId::new(1));
    }

    #[test]
    fn test_resolve_empty_bom_yields_empty_list() {
        let materials = sample_materials();
        let index = materials_by_id(&materials);
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200));

        assert!(BomResolver::resolve(&product, &index).is_empty());
    }

    #[test]
    fn test_unresolved_line_is_flagged_not_dropped() {
        let materials = sample_materials();
        let index = materials_by_id(&materials);
        let product = Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
            .with_bom_line(99, 4)
            .unwrap();

        let lines = BomResolver::resolve(&product, &index);

        assert_eq!(lines.len(), 1);
        assert!(!lines[0].is_resolved());
        assert_eq!(lines[0].possible_units(), 0);
        assert_eq!(lines[0].required_per_unit, 4);
    }

    #[rstest]
    #[case(50, 2, 25)]
    #[case(30, 1, 30)]
    #[case(5, 2, 2)]
    #[case(1, 2, 0)]
    #[case(0, 1, 0)]
    fn test_possible_units_is_floor_division(
        #[case] available: u64,
        #[case] required: u64,
        #[case] expected: u64,
    ) {
        let line = ResolvedBomLine {
            material_id: MaterialId::new(1),
            material_code: "MAT-001".to_string(),
            material_name: "鋼板".to_string(),
            required_per_unit: required,
            available: Some(available),
        };

        assert_eq!(line.possible_units(), expected);
    }

    #[test]
    fn test_material_in_use() {
        let products = vec![
            Product::new(1, "PROD-001", "自行車", Decimal::from(1200))
                .with_bom_line(1, 2)
                .unwrap(),
            Product::new(2, "PROD-002", "滑板車", Decimal::from(600)),
        ];

        assert!(material_in_use(&products, MaterialId::new(1)));
        assert!(!material_in_use(&products, MaterialId::new(2)));
    }
}
