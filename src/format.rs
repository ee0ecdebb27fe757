/// Formats `value` as dollars with thousands separators and two decimals, e.g. `$1,234.50`.
pub fn currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (digits, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
