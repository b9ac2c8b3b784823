//! Row slot sequences.
//!
//! A side of a symbol is a column of rows. Each row either holds a pin or is a
//! blank that separates two pin groups. These helpers build and reshape such
//! columns without caring what a pin is.

/// Appends groups to a row column, separating them with single blanks.
///
/// A blank is only inserted when the column is non-empty and does not already end
/// in a blank, so the result never starts with a blank and never holds two blanks
/// in a row. Groups whose items are all filtered out leave no trace.
pub fn push_groups<T, I, G>(rows: &mut Vec<Option<T>>, groups: G)
where
    G: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
{
    for group in groups {
        let mut items = group.into_iter().peekable();
        if items.peek().is_none() {
            continue;
        }
        if matches!(rows.last(), Some(Some(_))) {
            rows.push(None);
        }
        rows.extend(items.map(Some));
    }
}

/// Removes trailing blanks.
pub fn trim_trailing_blanks<T>(rows: &mut Vec<Option<T>>) {
    while matches!(rows.last(), Some(None)) {
        rows.pop();
    }
}

/// Slides the trailing run of a column down so the column is `target_len` long.
///
/// The run of rows after the last blank is moved to the end and the gap is filled
/// with blanks. Nothing changes unless the column is shorter than `target_len` and
/// contains a blank to widen.
///
/// ```
/// use icylib::layout::rebalance;
///
/// let rows = vec![Some('V'), None, Some('A'), None, Some('G')];
/// let rebalanced = rebalance(rows, 7);
/// assert_eq!(rebalanced, vec![Some('V'), None, Some('A'), None, None, None, Some('G')]);
/// ```
#[must_use]
pub fn rebalance<T>(mut rows: Vec<Option<T>>, target_len: usize) -> Vec<Option<T>> {
    if rows.len() >= target_len {
        return rows;
    }
    let Some(last_blank) = rows.iter().rposition(Option::is_none) else {
        return rows;
    };

    let tail = rows.split_off(last_blank + 1);
    let padding = target_len - rows.len() - tail.len();
    rows.extend(std::iter::repeat_with(|| None).take(padding));
    rows.extend(tail);
    rows
}
