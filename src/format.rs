use crate::models::MetricFormat;

const COMPACT_UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

pub fn format_currency(value: f64) -> String {
    format_currency_with(value, 0)
}

/// Currency with an explicit number of fractional digits. Callers that need cents
/// (average revenue per user) pass 2.
pub fn format_currency_with(value: f64, decimals: usize) -> String {
    let rounded = round_to(value.abs(), decimals);
    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_decimal(rounded, decimals))
}

/// Abbreviated currency for chart axes and summary tiles: `$1M`, `$21.5K`.
pub fn format_compact_currency(value: f64) -> String {
    let magnitude = value.abs();
    for (scale, suffix) in COMPACT_UNITS {
        let scaled = round_to(magnitude / scale, 1);
        if scaled < 1.0 {
            continue;
        }
        let mut text = format!("{:.1}", scaled);
        if text.ends_with(".0") {
            text.truncate(text.len() - 2);
        }
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}${}{}", sign, text, suffix);
    }
    format_currency(value)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.abs().round();
    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_decimal(rounded, 0))
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Change badge text: positive changes carry an explicit plus sign.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{}%", change)
    } else {
        format!("{}%", change)
    }
}

pub fn format_metric_value(value: f64, format: MetricFormat) -> String {
    match format {
        MetricFormat::Currency => format_currency(value.round()),
        MetricFormat::Number => format_number(value.round()),
        MetricFormat::Percent => format_percent(value),
        MetricFormat::Score => format!("{}", value.round() as i64),
    }
}

/// Joins the present, non-empty class fragments with single spaces.
pub fn class_names<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fragments
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn group_decimal(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(&text),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
