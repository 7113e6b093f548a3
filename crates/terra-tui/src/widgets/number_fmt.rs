//! Population and area formatting helpers.

/// Full population with thousands separators (e.g., "67,391,582").
pub fn fmt_grouped(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact population for narrow columns (e.g., "67.4M", "830K").
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn fmt_population_short(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Area in km², "─" when the registry has none.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_area(area: Option<f64>) -> String {
    area.map_or_else(
        || "─".into(),
        |a| format!("{} km²", fmt_grouped(a.round() as u64)),
    )
}
