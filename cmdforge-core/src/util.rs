use std::time::Duration;

const SECS_IN_DAY: f64 = 86_400.0;

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Turns a column name into a valid parameter name.
pub fn parameter_name(column: &str) -> String {
    column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Longest prefix of `query` not exceeding `limit` bytes, on a char boundary.
pub fn truncate_long(query: &str, limit: usize) -> (&str, bool) {
    if query.len() <= limit {
        return (query, false);
    }
    let mut end = limit;
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    (query[..end].trim_end(), true)
}

/// Length of `duration` in fractional days.
pub fn duration_in_days(duration: &Duration) -> f64 {
    duration.as_secs_f64() / SECS_IN_DAY
}
