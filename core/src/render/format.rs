/// Placeholder shown for an absent detail field in an expanded card.
pub const EM_DASH: &str = "—";

/// `"$"` followed by the amount with en-US grouping and up to three fraction
/// digits, trailing zeros dropped. Exact halves round away from zero. An absent
/// amount renders as a bare `"$"`.
pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(v) => format!("${}", group_thousands(v)),
        None => "$".to_string(),
    }
}

fn group_thousands(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = fixed_3(v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

// `{:.3}` rounds exact ties to even. `v * 2000` is an odd integer exactly when
// `v` sits on a half thousandth; the fused residual rules out product rounding.
fn fixed_3(v: f64) -> String {
    let scaled = v * 2000.0;
    let exact = v.mul_add(2000.0, -scaled) == 0.0;
    if exact && scaled.fract() == 0.0 && scaled % 2.0 == 1.0 {
        return format!("{:.3}", (scaled + 1.0) / 2000.0);
    }
    format!("{:.3}", v)
}

/// `value` when present and non-empty, otherwise the em-dash placeholder.
pub fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EM_DASH.to_string(),
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
