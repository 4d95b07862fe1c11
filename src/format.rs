//! Display Formatting
//!
//! Unit choices and rounding for presenting metrics. Purely presentational:
//! the km² switch is a display threshold, not a different computation.

/// Areas at or above this many hectares are shown in km²
pub const KM2_DISPLAY_THRESHOLD_HA: f64 = 10_000.0;

pub const HECTARES_PER_KM2: f64 = 100.0;

/// Round to an integer and group digits with commas ("1,234,567").
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 { format!("-{}", out) } else { out }
}

/// Format with `sig` significant digits.
pub fn format_significant(value: f64, sig: u32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let sig = sig.max(1) as i32;
    let mut magnitude = value.abs().log10().floor() as i32;
    // Rounding can carry into a new leading digit (0.996 -> 1.0)
    let scaled = (value.abs() * 10f64.powi(sig - 1 - magnitude)).round();
    if scaled >= 10f64.powi(sig) {
        magnitude += 1;
    }
    let decimals = (sig - 1 - magnitude).max(0) as usize;
    format!("{:.*}", decimals, value)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Land area with the unit that reads best at its magnitude. The unit is
/// chosen on the value as it will be printed.
pub fn format_area(hectares: f64) -> String {
    if hectares < 1.0 {
        format!("{} hectare-years", format_significant(hectares, 2))
    } else if round_to(hectares, 1) >= KM2_DISPLAY_THRESHOLD_HA {
        format!("{} km²", group_thousands(hectares / HECTARES_PER_KM2))
    } else {
        format!("{:.1} hectare-years", hectares)
    }
}

/// Short label shown in the map marker popup.
pub fn format_popup_label(hectares: f64) -> String {
    if hectares < 0.01 {
        "< 0.01 hectare-years".to_string()
    } else if round_to(hectares, 2) >= KM2_DISPLAY_THRESHOLD_HA {
        format!("{} km²", group_thousands(hectares / HECTARES_PER_KM2))
    } else {
        format!("{:.2} hectare-years", hectares)
    }
}

pub fn format_liters(liters: f64) -> String {
    format!("{} L", group_thousands(liters))
}

pub fn format_kg_co2e(kg: f64) -> String {
    format!("{} kg CO₂e", group_thousands(kg))
}

pub fn format_usd(usd: f64) -> String {
    format!("${}", group_thousands(usd))
}

pub fn format_meters(m: f64) -> String {
    if m >= 10_000.0 { format!("{:.1} km", m / 1000.0) } else { format!("{} m", group_thousands(m)) }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(2677.5), "2,678");
        assert_eq!(group_thousands(375_000_000_000.0), "375,000,000,000");
        assert_eq!(group_thousands(-1234.0), "-1,234");
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(0.012115, 2), "0.012");
        assert_eq!(format_significant(0.5, 2), "0.50");
        assert_eq!(format_significant(0.0, 2), "0");
    }

    #[test]
    fn test_format_significant_carries_into_next_digit() {
        assert_eq!(format_significant(0.996, 2), "1.0");
        assert_eq!(format_significant(0.0996, 2), "0.10");
        assert_eq!(format_significant(9.96, 2), "10");
        assert_eq!(format_significant(0.994, 2), "0.99");
    }

    #[test]
    fn test_area_threshold() {
        assert_eq!(format_area(0.01212), "0.012 hectare-years");
        assert_eq!(format_area(12.34), "12.3 hectare-years");
        assert_eq!(format_area(9_999.0), "9999.0 hectare-years");
        assert_eq!(format_area(10_000.0), "100 km²");
        assert_eq!(format_area(138_888_889.0), "1,388,889 km²");
    }

    #[test]
    fn test_area_unit_follows_rounded_value() {
        assert_eq!(format_area(9_999.94), "9999.9 hectare-years");
        assert_eq!(format_area(9_999.96), "100 km²");
        assert_eq!(format_area(9_999.99), "100 km²");
        assert_eq!(format_popup_label(9_999.994), "9999.99 hectare-years");
        assert_eq!(format_popup_label(9_999.996), "100 km²");
    }

    #[test]
    fn test_popup_label() {
        assert_eq!(format_popup_label(0.005), "< 0.01 hectare-years");
        assert_eq!(format_popup_label(0.0), "< 0.01 hectare-years");
        assert_eq!(format_popup_label(3.14159), "3.14 hectare-years");
        assert_eq!(format_popup_label(50_000.0), "500 km²");
    }

    #[test]
    fn test_money_and_quantities() {
        assert_eq!(format_liters(630.0), "630 L");
        assert_eq!(format_kg_co2e(1260.0000000002), "1,260 kg CO₂e");
        assert_eq!(format_usd(535.5), "$536");
        assert_eq!(format_meters(62.1), "62 m");
        assert_eq!(format_meters(66_490.0), "66.5 km");
    }
}
