//! # Feasibility Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod id;
pub mod ledger;
pub mod material;
pub mod product;

// Re-export 主要類型
pub use catalog::Catalog;
pub use id::{MaterialId, ProductId};
pub use ledger::{SharedStockLedger, StockLedger};
pub use material::RawMaterial;
pub use product::{BomLine, Product};

/// 引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("找不到產品: {0}")]
    ProductNotFound(ProductId),

    #[error("找不到物料: {0}")]
    MaterialNotFound(MaterialId),

    #[error("代碼已存在: {0}")]
    DuplicateCode(String),

    #[error("產品 {product_id} 的 BOM 已包含物料 {material_id}")]
    DuplicateBomLine {
        product_id: ProductId,
        material_id: MaterialId,
    },

    #[error("BOM 單位用量必須為正整數")]
    InvalidBomQuantity,

    #[error("產品 {product_id} 的 BOM 中沒有物料 {material_id}")]
    BomLineNotFound {
        product_id: ProductId,
        material_id: MaterialId,
    },

    #[error("物料 {0} 仍被產品 BOM 引用，無法刪除")]
    MaterialInUse(MaterialId),

    #[error("產品 {0} 沒有 BOM，無法生產")]
    EmptyBom(ProductId),

    #[error("無效的生產數量: {0}")]
    InvalidQuantity(i64),

    #[error(
        "庫存不足：請求 {requested} 件，最多可生產 {available} 件（缺口 {shortfall}，受限於物料 {limiting_material}）"
    )]
    InsufficientStock {
        product_id: ProductId,
        limiting_material: MaterialId,
        requested: u64,
        available: u64,
        shortfall: u64,
    },

    #[error("庫存不可為負：物料 {material_id} 現有 {on_hand}，嘗試扣減 {attempted}")]
    StockUnderflow {
        material_id: MaterialId,
        on_hand: u64,
        attempted: u64,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
