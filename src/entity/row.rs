use serde_json::{Map, Value};

/// One record of a paginated list resource. Rows are opaque to the table
/// layer; only column keys are used to reach into them.
pub type Row = Map<String, Value>;

/// Field value of a row, `Null` when the field is missing.
pub fn field<'a>(row: &'a Row, key: &str) -> &'a Value {
    row.get(key).unwrap_or(&Value::Null)
}

/// Plain text for a raw JSON value as shown in a cell without a formatter.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric identifier of a row (`id` field), accepting numbers and numeric strings.
pub fn row_id(row: &Row) -> Option<i64> {
    match row.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_field_is_null() {
        let r = row(json!({"id": 1}));
        assert_eq!(field(&r, "amount"), &Value::Null);
        assert_eq!(value_text(field(&r, "amount")), "");
    }

    #[test]
    fn strings_render_without_quotes() {
        assert_eq!(value_text(&json!("PENDING")), "PENDING");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn row_id_accepts_numeric_strings() {
        assert_eq!(row_id(&row(json!({"id": 7}))), Some(7));
        assert_eq!(row_id(&row(json!({"id": "12"}))), Some(12));
        assert_eq!(row_id(&row(json!({"name": "x"}))), None);
    }
}
