//! Review presentation helpers.

/// Builds avatar initials from the first character of each word, as typed.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Section heading for a mentor's reviews: "1 Review" or "N Reviews".
pub fn heading(total: i64) -> String {
    if total == 1 {
        "1 Review".to_string()
    } else {
        format!("{} Reviews", total)
    }
}

/// Whether rows remain after the page starting at `offset`.
pub fn has_more(offset: i64, returned: usize, total: i64) -> bool {
    offset + (returned as i64) < total
}

/// Average star rating rounded to two decimals.
pub fn average_rating(sum: i64, count: i64) -> Option<f64> {
    if count <= 0 {
        return None;
    }
    let avg = sum as f64 / count as f64;
    Some((avg * 100.0).round() / 100.0)
}
