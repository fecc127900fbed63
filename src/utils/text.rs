use reqwest::Url;
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_width::UnicodeWidthChar;

const PRICE_FRACTION_DIGITS: u32 = 3;

/// Host of an article URL without its leading `www.`, or `unknown`.
pub fn source_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.replacen("www.", "", 1)))
        .unwrap_or_else(|| "unknown".to_string())
}

/// `$67,432.5` style price. Values that are not decimals are shown verbatim.
pub fn format_usd_price(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed));

    match parsed {
        Ok(value) => {
            let rounded = value
                .round_dp_with_strategy(PRICE_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            format!("${}", group_thousands(&rounded.to_string()))
        }
        Err(_) => raw.to_string(),
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Wrap text to a display width, counting wide (CJK) characters as two columns.
/// Breaks at the last space when one is available, otherwise mid-run.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            let carry = match current.rfind(' ') {
                Some(split) if split > 0 && !ch.is_whitespace() => {
                    let tail = current[split + 1..].to_string();
                    current.truncate(split);
                    tail
                }
                _ => String::new(),
            };
            lines.push(std::mem::take(&mut current));
            current = carry;
            current_width = display_width(&current);
            if ch.is_whitespace() && current.is_empty() {
                continue;
            }
        }

        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_from_hosts() {
        assert_eq!(source_domain("https://www.coindesk.com/markets/x"), "coindesk.com");
        assert_eq!(source_domain("https://news.bitcoin.com/a"), "news.bitcoin.com");
        assert_eq!(source_domain("not a url"), "unknown");
    }

    #[test]
    fn groups_prices() {
        assert_eq!(format_usd_price("67432.50"), "$67,432.5");
        assert_eq!(format_usd_price("1234567.12345"), "$1,234,567.123");
        assert_eq!(format_usd_price("999"), "$999");
        assert_eq!(format_usd_price("-1000.0005"), "$-1,000.001");
        assert_eq!(format_usd_price("n/a"), "n/a");
    }

    #[test]
    fn wraps_on_spaces_and_wide_chars() {
        assert_eq!(wrap_to_width("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
        assert_eq!(wrap_to_width("ビットコイン", 6), vec!["ビット", "コイン"]);
        assert_eq!(wrap_to_width("", 10), vec![""]);
    }
}
