use chrono::Utc;

use crate::domain::models::product::fields;
use crate::domain::validation::FieldChanges;
use crate::store::{AttrValue, UpdateOp};

/// Translates an accepted change set into the minimal store instruction: one
/// assignment per requested field, plus a fresh modification timestamp.
/// Fields absent from the set get no assignment at all, so the store leaves
/// them untouched.
pub fn build_update(id: &str, changes: FieldChanges) -> UpdateOp {
    let mut assignments = Vec::new();

    if let Some(name) = changes.name {
        assignments.push((fields::NOMBRE.to_string(), AttrValue::S(name)));
    }
    if let Some(category) = changes.category {
        assignments.push((fields::CATEGORIA.to_string(), AttrValue::S(category)));
    }
    if let Some(price) = changes.price {
        assignments.push((fields::PRECIO.to_string(), AttrValue::N(price)));
    }
    if let Some(stock) = changes.stock {
        assignments.push((fields::STOCK.to_string(), AttrValue::I(stock)));
    }

    assignments.push((
        fields::ACTUALIZADO.to_string(),
        AttrValue::S(Utc::now().to_rfc3339()),
    ));

    UpdateOp {
        key: id.to_string(),
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assigned_fields(op: &UpdateOp) -> Vec<&str> {
        op.assignments.iter().map(|(f, _)| f.as_str()).collect()
    }

    #[test]
    fn only_requested_fields_are_assigned() {
        let changes = FieldChanges {
            stock: Some(5),
            ..FieldChanges::default()
        };
        let op = build_update("p1", changes);

        assert_eq!(op.key, "p1");
        assert_eq!(assigned_fields(&op), vec!["stock", "actualizado"]);
        assert_eq!(op.assignments[0].1, AttrValue::I(5));
    }

    #[test]
    fn the_modification_timestamp_is_always_appended() {
        let changes = FieldChanges {
            name: Some("Laptop Pro".into()),
            price: Some(dec!(1499.00)),
            ..FieldChanges::default()
        };
        let op = build_update("p1", changes);

        let fields = assigned_fields(&op);
        assert!(fields.contains(&"actualizado"));
        assert!(!fields.contains(&"stock"));
        assert!(!fields.contains(&"categoria"));
    }
}
