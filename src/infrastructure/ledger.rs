use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A record a backend keeps in its ledger.
pub trait LedgerRecord: Clone + Send + Sync {
    fn id(&self) -> &str;
}

/// A thread-safe in-memory ledger of payment records keyed by identifier.
///
/// Shared by every sandbox backend. Each instance owns its own lock, and the
/// lock is held for a single map read or write only.
#[derive(Clone)]
pub struct InMemoryLedger<T> {
    records: Arc<RwLock<HashMap<String, T>>>,
}

impl<T> Default for InMemoryLedger<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: LedgerRecord> InMemoryLedger<T> {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: T) -> T {
        let mut records = self.records.write().await;
        records.insert(record.id().to_string(), record.clone());
        record
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        let records = self.records.read().await;
        records.get(id).cloned()
    }

    /// Applies `change` to the record with `id` and returns the updated copy.
    ///
    /// `None` when no such record exists. A `change` that returns an error must
    /// leave the record untouched.
    pub async fn update<F, E>(&self, id: &str, change: F) -> Option<std::result::Result<T, E>>
    where
        F: FnOnce(&mut T) -> std::result::Result<(), E>,
    {
        let mut records = self.records.write().await;
        let record = records.get_mut(id)?;
        Some(change(record).map(|()| record.clone()))
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: String,
        balance: i64,
    }

    impl LedgerRecord for Entry {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn entry(id: &str, balance: i64) -> Entry {
        Entry {
            id: id.to_string(),
            balance,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let ledger = InMemoryLedger::new();
        ledger.insert(entry("a", 100)).await;

        assert_eq!(ledger.get("a").await, Some(entry("a", 100)));
        assert!(ledger.get("b").await.is_none());
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_returns_new_state() {
        let ledger = InMemoryLedger::new();
        ledger.insert(entry("a", 100)).await;

        let updated = ledger
            .update("a", |e| {
                e.balance -= 40;
                Ok::<_, ()>(())
            })
            .await;
        assert_eq!(updated, Some(Ok(entry("a", 60))));
        assert_eq!(ledger.get("a").await, Some(entry("a", 60)));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let ledger: InMemoryLedger<Entry> = InMemoryLedger::new();
        let updated = ledger
            .update("missing", |e| {
                e.balance = 0;
                Ok::<_, ()>(())
            })
            .await;
        assert!(updated.is_none());
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_record() {
        let ledger = InMemoryLedger::new();
        ledger.insert(entry("a", 100)).await;

        let updated = ledger
            .update("a", |e| e.balance.checked_sub(i64::MIN).map(drop).ok_or("overflow"))
            .await;
        assert_eq!(updated, Some(Err("overflow")));
        assert_eq!(ledger.get("a").await, Some(entry("a", 100)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ledger = InMemoryLedger::new();
        let clone = ledger.clone();

        let handle = tokio::spawn(async move { clone.insert(entry("x", 1)).await });
        handle.await.unwrap();

        assert!(ledger.get("x").await.is_some());
    }
}
