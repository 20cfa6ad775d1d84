//! Map result rows into destinations.
//!
//! Single-value loads report [`QlError::NotFound`] on an empty result;
//! collection loads treat an empty result as zero rows.

use crate::error::{QlError, QlResult};
use crate::row::{FromRow, Row};

/// Map the first row. Extra rows are ignored.
pub fn load_one<T: FromRow>(rows: &[Row]) -> QlResult<T> {
    match rows.first() {
        Some(row) => T::from_row(row),
        None => Err(QlError::NotFound),
    }
}

/// Map the first row, if any.
pub fn load_opt<T: FromRow>(rows: &[Row]) -> QlResult<Option<T>> {
    rows.first().map(T::from_row).transpose()
}

/// Map every row.
pub fn load_all<T: FromRow>(rows: &[Row]) -> QlResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

/// Append every mapped row to `dest` and return how many were appended.
///
/// On error `dest` is left unchanged.
pub fn load_into<T: FromRow>(rows: &[Row], dest: &mut Vec<T>) -> QlResult<usize> {
    let loaded = load_all(rows)?;
    let count = loaded.len();
    dest.extend(loaded);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn rows() -> Vec<Row> {
        let columns: std::sync::Arc<[String]> = vec!["id".to_string(), "name".to_string()].into();
        vec![
            Row::new(columns.clone(), vec![Value::Int(1), Value::from("a")]),
            Row::new(columns, vec![Value::Int(2), Value::from("b")]),
        ]
    }

    #[test]
    fn test_load_one_takes_first_row() {
        let (id, name): (i64, String) = load_one(&rows()).unwrap();
        assert_eq!((id, name.as_str()), (1, "a"));
    }

    #[test]
    fn test_empty_results() {
        assert!(load_one::<i64>(&[]).unwrap_err().is_not_found());
        assert_eq!(load_opt::<i64>(&[]).unwrap(), None);
        assert!(load_all::<i64>(&[]).unwrap().is_empty());

        let mut dest = vec![9i64];
        assert_eq!(load_into(&[], &mut dest).unwrap(), 0);
        assert_eq!(dest, vec![9]);
    }

    #[test]
    fn test_load_into_appends() {
        let mut ids: Vec<i64> = Vec::new();
        assert_eq!(load_into(&rows(), &mut ids).unwrap(), 2);
        assert_eq!(load_into(&rows(), &mut ids).unwrap(), 2);
        assert_eq!(ids, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_decode_failure_leaves_dest_untouched() {
        let mut dest: Vec<bool> = Vec::new();
        let bad = vec![Row::from_pairs([("x", "maybe")])];
        assert!(load_into(&bad, &mut dest).is_err());
        assert!(dest.is_empty());
    }
}
