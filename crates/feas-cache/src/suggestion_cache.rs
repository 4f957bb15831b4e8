//! 建議快取
//!
//! 顯式注入的快取元件：過期策略明確，失效鉤子由生產提交觸發，
//! 不依賴任何模組層級的隱式狀態。時鐘由呼叫端傳入，測試可決定性控制。

use chrono::{DateTime, Duration, Utc};

use feas_calc::ProductionSuggestion;

/// 快取內容
#[derive(Debug, Clone)]
struct CachedSuggestions {
    suggestions: Vec<ProductionSuggestion>,
    cached_at: DateTime<Utc>,
}

/// 生產建議快取
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    entry: Option<CachedSuggestions>,
    ttl: Duration,
}

impl SuggestionCache {
    /// 以指定存活時間創建快取
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// 讀取快取；過期或從未寫入時回傳 `None`
    pub fn get(&self, now: DateTime<Utc>) -> Option<&[ProductionSuggestion]> {
        let entry = self.entry.as_ref()?;
        if now - entry.cached_at >= self.ttl {
            return None;
        }
        Some(&entry.suggestions)
    }

    /// 寫入快取
    pub fn put(&mut self, suggestions: Vec<ProductionSuggestion>, now: DateTime<Utc>) {
        self.entry = Some(CachedSuggestions {
            suggestions,
            cached_at: now,
        });
    }

    /// 失效鉤子：生產提交後必須呼叫
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// 快取是否已過期（空快取視為過期）
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.get(now).is_none()
    }

    /// 存活時間
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
