use chrono::{DateTime, Duration, Utc};

/// A cached value with an absolute expiry. The maps in `AppState` hold these;
/// stale entries are replaced on the next lookup.
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl_seconds: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
