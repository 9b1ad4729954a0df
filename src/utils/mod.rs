use reqwest::Url;

/// Formats a number the way an `en-US` locale string does: grouped thousands
/// and at most three fraction digits, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn group_thousands_u64(value: u64) -> String {
    group_thousands(value as f64)
}

/// Reads a query parameter from an absolute URL or a relative page reference
/// such as `detail.html?country=deu`.
pub fn query_parameter(url: &str, name: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => Url::parse("http://localhost/").ok()?.join(url).ok()?,
    };
    parsed
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Alpha-2/alpha-3 style codes: non-empty and ASCII alphanumeric only.
pub fn is_country_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn detail_href(code: &str) -> String {
    format!("detail.html?country={code}")
}
