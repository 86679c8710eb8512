//! Human-readable value formatting for table cells and detail views.
//!
//! Table cells are width-constrained, so the compact forms stay short and
//! drop precision aggressively; the detail popup uses the detailed forms.

use chrono::{Local, TimeZone};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const TIB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;

/// Formatting style: `Compact` for table cells, `Detail` for popups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    Compact,
    Detail,
}

/// Byte capacity: `"32.0G"` compact, `"32.00 GiB"` detailed. Negative or
/// non-finite input renders as zero.
pub fn format_bytes(bytes: f64, style: FmtStyle) -> String {
    let b = if bytes.is_finite() { bytes.max(0.0) } else { 0.0 };
    let (value, compact_unit, detail_unit) = scale_binary(b);
    match style {
        FmtStyle::Compact => {
            if compact_unit == "B" {
                format!("{}B", b as u64)
            } else {
                format!("{value:.1}{compact_unit}")
            }
        }
        FmtStyle::Detail => {
            if detail_unit == "B" {
                format!("{} B", b as u64)
            } else {
                format!("{value:.2} {detail_unit}")
            }
        }
    }
}

/// Byte rate: `"1.5M/s"` compact, `"1.50 MiB/s"` detailed. Zero stays a
/// bare `"0"` so idle cells read as idle rather than as tiny traffic.
pub fn format_bytes_rate(rate: f64, style: FmtStyle) -> String {
    let r = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    if r == 0.0 {
        return "0".to_string();
    }
    let (value, compact_unit, detail_unit) = scale_binary(r);
    match style {
        FmtStyle::Compact => {
            if compact_unit == "B" {
                format!("{}B/s", r as u64)
            } else {
                format!("{value:.1}{compact_unit}/s")
            }
        }
        FmtStyle::Detail => {
            if detail_unit == "B" {
                format!("{} B/s", r as u64)
            } else {
                format!("{value:.2} {detail_unit}/s")
            }
        }
    }
}

fn scale_binary(v: f64) -> (f64, &'static str, &'static str) {
    if v >= TIB {
        (v / TIB, "T", "TiB")
    } else if v >= GIB {
        (v / GIB, "G", "GiB")
    } else if v >= MIB {
        (v / MIB, "M", "MiB")
    } else if v >= KIB {
        (v / KIB, "K", "KiB")
    } else {
        (v, "B", "B")
    }
}

/// Percentage with one decimal; non-finite renders as a dash.
pub fn format_percent(pct: f64) -> String {
    if !pct.is_finite() {
        return "-".to_string();
    }
    format!("{:.1}%", pct.max(0.0))
}

/// Uptime/age in at most two units: `"42s"`, `"12m"`, `"4h23m"`, `"12d4h"`,
/// bare days beyond a month.
pub fn format_age(secs: i64) -> String {
    let s = secs.max(0);
    if s < 60 {
        return format!("{s}s");
    }
    let mins = s / 60;
    if mins < 60 {
        return format!("{mins}m");
    }
    let hours = s / 3600;
    if hours < 24 {
        return format!("{hours}h{:02}m", mins % 60);
    }
    let days = s / 86400;
    if days < 30 {
        return format!("{days}d{}h", hours % 24);
    }
    format!("{days}d")
}

/// Temperature in whole degrees.
pub fn format_temp(celsius: f64) -> String {
    if !celsius.is_finite() {
        return "-".to_string();
    }
    format!("{}°C", celsius.round() as i64)
}

/// Local wall-clock time of a unix timestamp, `HH:MM:SS`.
pub fn format_clock(unix: i64) -> String {
    match Local.timestamp_opt(unix, 0).single() {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Truncates to `max` characters, ending in `…` when cut. Character-based,
/// so multi-byte names do not split mid-codepoint.
pub fn truncate_str(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_compact_scales_units() {
        assert_eq!(format_bytes(512.0, FmtStyle::Compact), "512B");
        assert_eq!(format_bytes(2048.0, FmtStyle::Compact), "2.0K");
        assert_eq!(format_bytes(3.5 * 1024.0 * 1024.0, FmtStyle::Compact), "3.5M");
        assert_eq!(format_bytes(34359738368.0, FmtStyle::Compact), "32.0G"); // 32 GiB
    }

    #[test]
    fn bytes_detail_uses_long_units() {
        assert_eq!(format_bytes(34359738368.0, FmtStyle::Detail), "32.00 GiB");
        assert_eq!(format_bytes(100.0, FmtStyle::Detail), "100 B");
    }

    #[test]
    fn bytes_guard_bad_input() {
        assert_eq!(format_bytes(-42.0, FmtStyle::Compact), "0B");
        assert_eq!(format_bytes(f64::NAN, FmtStyle::Compact), "0B");
    }

    #[test]
    fn rate_zero_is_bare_zero() {
        assert_eq!(format_bytes_rate(0.0, FmtStyle::Compact), "0");
        assert_eq!(format_bytes_rate(-1.0, FmtStyle::Compact), "0");
        assert_eq!(format_bytes_rate(1572864.0, FmtStyle::Compact), "1.5M/s");
        assert_eq!(format_bytes_rate(1572864.0, FmtStyle::Detail), "1.50 MiB/s");
        assert_eq!(format_bytes_rate(900.0, FmtStyle::Compact), "900B/s");
    }

    #[test]
    fn percent_one_decimal() {
        assert_eq!(format_percent(34.54), "34.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(f64::NAN), "-");
    }

    #[test]
    fn age_picks_two_largest_units() {
        assert_eq!(format_age(42), "42s");
        assert_eq!(format_age(15 * 60), "15m");
        assert_eq!(format_age(4 * 3600 + 23 * 60), "4h23m");
        assert_eq!(format_age(12 * 86400 + 4 * 3600), "12d4h");
        assert_eq!(format_age(85 * 86400), "85d");
        assert_eq!(format_age(-5), "0s"); // clock skew
    }

    #[test]
    fn temp_rounds_to_whole_degrees() {
        assert_eq!(format_temp(54.4), "54°C");
        assert_eq!(format_temp(54.5), "55°C");
        assert_eq!(format_temp(f64::INFINITY), "-");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("pve1", 10), "pve1");
        assert_eq!(truncate_str("a-very-long-container-name", 10), "a-very-lo…");
        assert_eq!(truncate_str("ütf8-nämé", 5), "ütf8…");
        assert_eq!(truncate_str("x", 0), "");
    }
}
