pub mod badges;
pub mod commits;
pub mod graph;
pub mod languages;
pub mod list;

/// Round to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Share of `count` in `total` as a rounded percentage (0 when total is 0)
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(count as f64 / total as f64 * 100.0)
    }
}

/// Wrap a rendered list in a titled `text` code fence
pub fn titled_block(title: &str, list: &str) -> String {
    format!("**{}** \n\n```text\n{}\n```\n", title, list)
}
