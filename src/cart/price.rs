/// Parse a textual price such as `"$24.99"`.
///
/// Everything except digits and `.` is dropped, then the longest leading
/// decimal number is read. Anything unreadable is worth `0.0`.
pub fn parse_price(text: &str) -> f64 {
    let mut numeric = String::with_capacity(text.len());
    let mut seen_dot = false;
    for ch in text.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        if ch == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        numeric.push(ch);
    }

    match numeric.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Render an amount as `$1,234.50`.
pub fn format_price(amount: f64, symbol: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{:02}", cents % 100)
}
