//! Like-count formatting for the reveal screen.

const COMPACT_UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// Compact notation with at most one fractional digit: `950`, `1.2K`, `15K`, `3.4M`.
pub fn format_compact(likes: u64) -> String {
    let value = likes as f64;
    if value < 1e3 {
        return likes.to_string();
    }

    let mut unit_idx = COMPACT_UNITS
        .iter()
        .rposition(|(threshold, _)| value >= *threshold)
        .unwrap_or(0);
    let mut scaled = round_one_decimal(value / COMPACT_UNITS[unit_idx].0);

    // 999_950 rounds up to 1000K, which reads as 1M.
    if scaled >= 1000.0 && unit_idx + 1 < COMPACT_UNITS.len() {
        unit_idx += 1;
        scaled = round_one_decimal(value / COMPACT_UNITS[unit_idx].0);
    }

    let suffix = COMPACT_UNITS[unit_idx].1;
    if scaled.fract() == 0.0 {
        format!("{scaled:.0}{suffix}")
    } else {
        format!("{scaled:.1}{suffix}")
    }
}

/// Thousands-grouped notation: `1,234,567`.
pub fn format_grouped(likes: u64) -> String {
    let digits = likes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
