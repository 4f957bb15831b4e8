//! # BOM Resolution
//!
//! 將產品 BOM 對照物料快照解析為可計算的組成明細

pub mod resolve;

// Re-export 主要類型
pub use resolve::{material_in_use, materials_by_id, BomResolver, ResolvedBomLine};
