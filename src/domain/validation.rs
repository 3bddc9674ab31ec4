use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::coercion;
use crate::error::AppError;

/// Raw body of `POST /productos` and `PUT /productos/{id}`. Numeric fields
/// stay as raw JSON values until coercion decides whether they are
/// acceptable; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub nombre: Option<String>,
    pub precio: Option<Value>,
    pub categoria: Option<String>,
    pub stock: Option<Value>,
}

/// Raw body of `PATCH /productos/{id}/stock`.
#[derive(Debug, Default, Deserialize)]
pub struct StockPayload {
    pub stock: Option<Value>,
}

/// Create payload after validation, ready to become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i64,
}

/// Accepted field->value set of a sparse update. A field left as `None` was
/// not requested and must keep its stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<i64>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.stock.is_none()
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidType {
            field,
            expected: "una cadena no vacía",
        });
    }
    Ok(())
}

fn price_value(raw: &Value) -> Result<Decimal, AppError> {
    let price = coercion::to_storage(raw)?;
    if price.is_sign_negative() {
        return Err(AppError::InvalidNumericValue);
    }
    Ok(price)
}

fn stock_value(raw: &Value) -> Result<i64, AppError> {
    match raw.as_i64() {
        Some(n) if n >= 0 => Ok(n),
        _ => Err(AppError::InvalidType {
            field: "stock",
            expected: "un entero no negativo",
        }),
    }
}

/// Create check: `nombre`, `precio` and `categoria` are required, `stock`
/// defaults to 0 when absent.
pub fn validate_create(payload: &ProductPayload) -> Result<NewProduct, AppError> {
    let name = payload
        .nombre
        .as_deref()
        .ok_or(AppError::MissingField("nombre"))?;
    let raw_price = payload
        .precio
        .as_ref()
        .ok_or(AppError::MissingField("precio"))?;
    let category = payload
        .categoria
        .as_deref()
        .ok_or(AppError::MissingField("categoria"))?;

    non_empty("nombre", name)?;
    non_empty("categoria", category)?;
    let price = price_value(raw_price)?;
    let stock = match &payload.stock {
        Some(raw) => stock_value(raw)?,
        None => 0,
    };

    Ok(NewProduct {
        name: name.to_string(),
        price,
        category: category.to_string(),
        stock,
    })
}

/// Sparse update check: only the fields present in the payload are
/// inspected and accepted; a payload naming none of them is rejected.
pub fn validate_full_update(payload: &ProductPayload) -> Result<FieldChanges, AppError> {
    let mut changes = FieldChanges::default();

    if let Some(name) = payload.nombre.as_deref() {
        non_empty("nombre", name)?;
        changes.name = Some(name.to_string());
    }
    if let Some(category) = payload.categoria.as_deref() {
        non_empty("categoria", category)?;
        changes.category = Some(category.to_string());
    }
    if let Some(raw) = &payload.precio {
        changes.price = Some(price_value(raw)?);
    }
    if let Some(raw) = &payload.stock {
        changes.stock = Some(stock_value(raw)?);
    }

    if changes.is_empty() {
        return Err(AppError::EmptyPayload);
    }
    Ok(changes)
}

/// Stock patch check: `stock` must be present, an integer and non-negative.
pub fn validate_stock_patch(payload: &StockPayload) -> Result<i64, AppError> {
    let raw = payload
        .stock
        .as_ref()
        .ok_or(AppError::MissingField("stock"))?;
    stock_value(raw)
}
