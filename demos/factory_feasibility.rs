//! 工廠生產可行性示例
//!
//! 建立小型工廠資料，列出排名後的生產建議，提交一次生產，
//! 再列出重算後的建議。

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use feasibility::{Catalog, FeasibilityEngine, Product, ProductId, RawMaterial};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    println!("=== 生產可行性示例 ===\n");

    // 建立型錄
    let mut catalog = Catalog::new();
    catalog.register_material(
        RawMaterial::new(1, "MAT-STEEL", "鋼管", 150).with_unit_price(Decimal::new(1250, 2)),
    )?;
    catalog.register_material(
        RawMaterial::new(2, "MAT-WHEEL", "車輪", 80).with_unit_price(Decimal::new(3000, 2)),
    )?;
    catalog.register_material(
        RawMaterial::new(3, "MAT-SEAT", "座墊", 25).with_unit_price(Decimal::new(1800, 2)),
    )?;

    catalog.register_product(
        Product::new(1, "PROD-BIKE", "自行車", Decimal::new(129900, 2))
            .with_bom_line(1, 3)? // 3 根鋼管
            .with_bom_line(2, 2)? // 2 個車輪
            .with_bom_line(3, 1)?, // 1 個座墊
    )?;
    catalog.register_product(
        Product::new(2, "PROD-SCOOTER", "滑板車", Decimal::new(59900, 2))
            .with_bom_line(1, 2)?
            .with_bom_line(2, 2)?,
    )?;

    println!("物料庫存:");
    for material in catalog.materials() {
        println!(
            "  - {} {}: {} {}",
            material.code, material.name, material.stock_qty, material.unit
        );
    }

    // 計算生產建議
    let mut engine = FeasibilityEngine::new(Duration::seconds(30));
    let suggestions = engine.get_feasibility(catalog.products(), catalog.materials(), Utc::now());

    println!("\n生產建議（依總價值排名）:");
    for suggestion in &suggestions {
        let limiting = suggestion
            .limiting
            .as_ref()
            .map(|l| l.material_name.clone())
            .unwrap_or_default();
        println!(
            "  - {} {}: 最多 {} 件，總價值 {}，受限於 {}",
            suggestion.product_code,
            suggestion.product_name,
            suggestion.max_quantity,
            suggestion.total_value,
            limiting
        );
    }

    // 提交一次生產
    println!("\n提交生產：自行車 × 20");
    let report = engine.execute_production(
        ProductId::new(1),
        20,
        catalog.products(),
        catalog.materials(),
    );
    println!("  {}", report.message);

    if report.success {
        // 外部儲存層套用新快照；這裡直接以回傳的快照重算
        for material in &report.updated_materials {
            let current = catalog
                .material(material.id)
                .map(|m| m.stock_qty as i64)
                .unwrap_or(0);
            let delta = material.stock_qty as i64 - current;
            if delta != 0 {
                catalog.adjust_stock(material.id, delta)?;
            }
        }

        let after = engine.get_feasibility(catalog.products(), catalog.materials(), Utc::now());
        println!("\n重算後的生產建議:");
        for suggestion in &after {
            println!(
                "  - {}: 最多 {} 件，總價值 {}",
                suggestion.product_code, suggestion.max_quantity, suggestion.total_value
            );
        }
    }

    // 嘗試超量生產
    println!("\n嘗試超量生產：滑板車 × 999");
    let rejected = engine.execute_production(
        ProductId::new(2),
        999,
        catalog.products(),
        catalog.materials(),
    );
    println!("  {}", rejected.message);
    if let Some(material_id) = rejected.limiting_material_id {
        let name = catalog
            .material(material_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| material_id.to_string());
        println!("  限制物料: {name}");
    }

    Ok(())
}
