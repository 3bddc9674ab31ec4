use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Item, KvStore, ScanFilter, StoreError, UpdateOp};

/// In-memory table. Every write holds the write lock for the duration of the
/// point operation, which gives the same per-key atomicity the service
/// expects from a real store.
pub struct InMemoryStore {
    table: String,
    items: RwLock<HashMap<String, Item>>,
}

impl InMemoryStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: RwLock::new(HashMap::new()),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn put_item(&self, key: &str, item: Item) -> Result<(), StoreError> {
        self.items.write().await.insert(key.to_string(), item);
        Ok(())
    }

    async fn update_item(&self, op: &UpdateOp) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        // Upsert semantics, mirroring the native update of the real store.
        let entry = items.entry(op.key.clone()).or_default();
        for (field, value) in &op.assignments {
            entry.insert(field.clone(), value.clone());
        }
        Ok(entry.clone())
    }

    async fn delete_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.write().await.remove(key);
        Ok(())
    }

    async fn scan(&self, filter: Option<&ScanFilter>) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().await;
        let matched = items
            .values()
            .filter(|item| match filter {
                Some(f) => item.get(&f.attribute) == Some(&f.equals),
                None => true,
            })
            .cloned()
            .collect();
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AttrValue;

    fn item(pairs: &[(&str, AttrValue)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryStore::new("t");
        let stored = item(&[("nombre", AttrValue::S("Laptop".into()))]);
        store.put_item("p1", stored.clone()).await.unwrap();

        assert_eq!(store.get_item("p1").await.unwrap(), Some(stored));
        assert_eq!(store.get_item("p2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_touches_only_listed_fields() {
        let store = InMemoryStore::new("t");
        store
            .put_item(
                "p1",
                item(&[
                    ("nombre", AttrValue::S("Laptop".into())),
                    ("stock", AttrValue::I(0)),
                ]),
            )
            .await
            .unwrap();

        let op = UpdateOp {
            key: "p1".into(),
            assignments: vec![("stock".into(), AttrValue::I(10))],
        };
        let updated = store.update_item(&op).await.unwrap();

        assert_eq!(updated.get("stock"), Some(&AttrValue::I(10)));
        assert_eq!(
            updated.get("nombre"),
            Some(&AttrValue::S("Laptop".into()))
        );
    }

    #[tokio::test]
    async fn delete_removes_the_item() {
        let store = InMemoryStore::new("t");
        store
            .put_item("p1", item(&[("stock", AttrValue::I(1))]))
            .await
            .unwrap();

        store.delete_item("p1").await.unwrap();
        assert_eq!(store.get_item("p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn scan_filters_by_attribute_equality() {
        let store = InMemoryStore::new("t");
        store
            .put_item(
                "p1",
                item(&[("categoria", AttrValue::S("Tecnologia".into()))]),
            )
            .await
            .unwrap();
        store
            .put_item("p2", item(&[("categoria", AttrValue::S("Hogar".into()))]))
            .await
            .unwrap();

        let filter = ScanFilter {
            attribute: "categoria".into(),
            equals: AttrValue::S("Tecnologia".into()),
        };
        let matched = store.scan(Some(&filter)).await.unwrap();
        assert_eq!(matched.len(), 1);

        let all = store.scan(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
