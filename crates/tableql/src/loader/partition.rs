use tableql_core::stmt::{Row, Value};

use std::collections::HashMap;

/// Groups `rows` by the value of `column`, one group per key, in key order.
///
/// A key no row matches gets an empty group. Rows are never reordered within
/// a group, and a row whose column matches no key is dropped. A key listed
/// twice gets the same rows twice.
pub fn partition(column: &str, keys: &[Value], rows: Vec<Row>) -> Vec<Vec<Row>> {
    let mut positions: HashMap<&Value, Vec<usize>> = HashMap::with_capacity(keys.len());

    for (index, key) in keys.iter().enumerate() {
        positions.entry(key).or_default().push(index);
    }

    let mut groups = vec![Vec::new(); keys.len()];

    for row in rows {
        let Some(indices) = row.get(column).and_then(|value| positions.get(value)) else {
            continue;
        };

        if let Some((last, rest)) = indices.split_last() {
            for &index in rest {
                groups[index].push(row.clone());
            }
            groups[*last].push(row);
        }
    }

    groups
}
