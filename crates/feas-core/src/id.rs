//! 識別碼類型
//!
//! 內部一律使用不透明整數識別碼；字串與識別碼之間的轉換屬於外部邊界的職責。

use serde::{Deserialize, Serialize};

/// 物料識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(u64);

/// 產品識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl MaterialId {
    /// 創建新的物料識別碼
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// 取得內部數值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl ProductId {
    /// 創建新的產品識別碼
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// 取得內部數值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MaterialId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = MaterialId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id, MaterialId::from(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // 序列化為透明數值，邊界層只看到整數
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProductId::new(7));
    }
}
