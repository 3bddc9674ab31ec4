use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::validation::NewProduct;
use crate::store::{AttrValue, Item};

/// Persisted attribute names, shared by the record mapping and the mutation
/// builder.
pub mod fields {
    pub const ID: &str = "id";
    pub const NOMBRE: &str = "nombre";
    pub const PRECIO: &str = "precio";
    pub const CATEGORIA: &str = "categoria";
    pub const STOCK: &str = "stock";
    pub const CREADO: &str = "creado";
    pub const ACTUALIZADO: &str = "actualizado";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Mints a record from a validated create payload. Identity and the
    /// creation timestamp are assigned here, never by the caller.
    pub fn new(draft: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            price: draft.price,
            category: draft.category,
            stock: draft.stock,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn into_item(self) -> Item {
        let mut item = Item::new();
        item.insert(fields::ID.into(), AttrValue::S(self.id));
        item.insert(fields::NOMBRE.into(), AttrValue::S(self.name));
        item.insert(fields::PRECIO.into(), AttrValue::N(self.price));
        item.insert(fields::CATEGORIA.into(), AttrValue::S(self.category));
        item.insert(fields::STOCK.into(), AttrValue::I(self.stock));
        item.insert(
            fields::CREADO.into(),
            AttrValue::S(self.created_at.to_rfc3339()),
        );
        if let Some(updated) = self.updated_at {
            item.insert(
                fields::ACTUALIZADO.into(),
                AttrValue::S(updated.to_rfc3339()),
            );
        }
        item
    }

    /// Maps a stored item back to a record. `None` means the item does not
    /// carry the expected attributes, which is a server-side fault.
    pub fn from_item(item: &Item) -> Option<Self> {
        let timestamp = |attr: &AttrValue| {
            attr.as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc))
        };

        Some(Self {
            id: item.get(fields::ID)?.as_str()?.to_string(),
            name: item.get(fields::NOMBRE)?.as_str()?.to_string(),
            price: item.get(fields::PRECIO)?.as_decimal()?,
            category: item.get(fields::CATEGORIA)?.as_str()?.to_string(),
            stock: item.get(fields::STOCK)?.as_int()?,
            created_at: item.get(fields::CREADO).and_then(timestamp)?,
            updated_at: item.get(fields::ACTUALIZADO).and_then(timestamp),
        })
    }
}
