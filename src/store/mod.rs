pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Attribute value as the schemaless store understands it: strings, exact
/// decimals and integers. Monetary amounts are persisted as `N`, never as a
/// binary float.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    S(String),
    N(Decimal),
    I(i64),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            AttrValue::N(d) => Some(*d),
            AttrValue::I(i) => Some(Decimal::from(*i)),
            AttrValue::S(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::I(i) => Some(*i),
            _ => None,
        }
    }
}

/// One stored record: an attribute map, keyed externally by its id.
pub type Item = HashMap<String, AttrValue>;

/// Minimal update instruction: the target key plus the field assignments to
/// apply. Fields not listed keep their stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOp {
    pub key: String,
    pub assignments: Vec<(String, AttrValue)>,
}

/// Server-side equality predicate applied during a scan.
#[derive(Debug, Clone)]
pub struct ScanFilter {
    pub attribute: String,
    pub equals: AttrValue,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The storage collaborator. Point reads/writes to a single key are atomic;
/// there is no multi-key transaction support.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<Item>, StoreError>;

    async fn put_item(&self, key: &str, item: Item) -> Result<(), StoreError>;

    /// Applies the assignments field by field and returns the post-mutation
    /// item (the store's own merge, not a client-side rewrite).
    async fn update_item(&self, op: &UpdateOp) -> Result<Item, StoreError>;

    async fn delete_item(&self, key: &str) -> Result<(), StoreError>;

    /// Full table scan, optionally filtered by an equality predicate.
    async fn scan(&self, filter: Option<&ScanFilter>) -> Result<Vec<Item>, StoreError>;
}
