use crate::entity::{field, Row, SortDirection, SortState};
use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Ordering;
use std::str::FromStr;

/// Single-column client-side sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortModel {
    state: Option<SortState>,
}

impl SortModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&SortState> {
        self.state.as_ref()
    }

    /// Header click: a new column starts ascending, the same column flips.
    pub fn toggle(&mut self, key: &str) -> &SortState {
        let direction = match &self.state {
            Some(current) if current.key == key => current.direction.flipped(),
            _ => SortDirection::Ascending,
        };

        self.state.insert(SortState {
            key: key.to_string(),
            direction,
        })
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ordering of raw field values. Strings that read as decimals (the API
/// sends amounts as strings) rank before all other strings and compare
/// numerically among themselves; the rest compare lexicographically.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => {
            match (Decimal::from_str(x.trim()), Decimal::from_str(y.trim())) {
                (Ok(dx), Ok(dy)) => dx.cmp(&dy).then_with(|| x.cmp(y)),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Stable sort of rows; equal values keep their incoming order.
pub fn sort_rows<'a>(mut rows: Vec<&'a Row>, state: Option<&SortState>) -> Vec<&'a Row> {
    if let Some(state) = state {
        rows.sort_by(|a, b| {
            let ordering = compare_values(field(a, &state.key), field(b, &state.key));
            match state.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::row_id;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter().filter_map(|r| row_id(r)).collect()
    }

    #[test]
    fn toggle_alternates_on_same_column() {
        let mut model = SortModel::new();
        let directions: Vec<_> = (0..5).map(|_| model.toggle("amount").direction).collect();
        assert_eq!(
            directions,
            vec![
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
            ]
        );
    }

    #[test]
    fn new_column_resets_to_ascending() {
        let mut model = SortModel::new();
        model.toggle("amount");
        model.toggle("amount");
        let state = model.toggle("createdAt");
        assert_eq!(state.key, "createdAt");
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn numeric_strings_sort_as_amounts() {
        let data = rows(vec![
            json!({"id": 1, "amount": "50"}),
            json!({"id": 2, "amount": "200"}),
        ]);
        let mut model = SortModel::new();

        model.toggle("amount");
        assert_eq!(ids(&sort_rows(data.iter().collect(), model.state())), vec![1, 2]);

        model.toggle("amount");
        assert_eq!(ids(&sort_rows(data.iter().collect(), model.state())), vec![2, 1]);
    }

    #[test]
    fn plain_strings_sort_lexicographically() {
        let data = rows(vec![
            json!({"id": 1, "username": "mallory"}),
            json!({"id": 2, "username": "alice"}),
            json!({"id": 3, "username": "bob"}),
        ]);
        let state = SortState {
            key: "username".into(),
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&sort_rows(data.iter().collect(), Some(&state))), vec![2, 3, 1]);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let data = rows(vec![
            json!({"id": 1, "status": "PENDING"}),
            json!({"id": 2, "status": "CONFIRMED"}),
            json!({"id": 3, "status": "PENDING"}),
            json!({"id": 4, "status": "CONFIRMED"}),
        ]);
        let state = SortState {
            key: "status".into(),
            direction: SortDirection::Descending,
        };
        assert_eq!(ids(&sort_rows(data.iter().collect(), Some(&state))), vec![1, 3, 2, 4]);
    }

    #[test]
    fn missing_values_sort_first() {
        let data = rows(vec![
            json!({"id": 1, "confirmedAt": "2024-02-01"}),
            json!({"id": 2}),
        ]);
        let state = SortState {
            key: "confirmedAt".into(),
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&sort_rows(data.iter().collect(), Some(&state))), vec![2, 1]);
    }

    #[test]
    fn mixed_string_column_sorts_consistently() {
        let samples = ["2", "10", "1a", "bob", "1.50", "alice", "007"];
        for a in samples {
            for b in samples {
                let (a, b) = (json!(a), json!(b));
                assert_eq!(compare_values(&a, &b), compare_values(&b, &a).reverse());
                for c in samples {
                    let c = json!(c);
                    if compare_values(&a, &b) != Ordering::Greater
                        && compare_values(&b, &c) != Ordering::Greater
                    {
                        assert_ne!(compare_values(&a, &c), Ordering::Greater);
                    }
                }
            }
        }

        let data = rows(vec![
            json!({"id": 1, "username": "1a"}),
            json!({"id": 2, "username": "10"}),
            json!({"id": 3, "username": "alice"}),
            json!({"id": 4, "username": "2"}),
        ]);
        let state = SortState {
            key: "username".into(),
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&sort_rows(data.iter().collect(), Some(&state))), vec![4, 2, 1, 3]);
    }

    #[test]
    fn no_sort_preserves_backend_order() {
        let data = rows(vec![json!({"id": 3}), json!({"id": 1}), json!({"id": 2})]);
        assert_eq!(ids(&sort_rows(data.iter().collect(), None)), vec![3, 1, 2]);
    }
}
