use crate::error::Result;
use crate::models::market::{CoinEntry, MarketSnapshot};
use crate::validation::{validate_snapshot, SUMMARY_SIZE};

/// Renders the first five entries of the snapshot, one line each, ranked from 1.
pub fn format_summary(snapshot: &MarketSnapshot) -> Result<String> {
    validate_snapshot(snapshot)?;

    Ok(snapshot.data
        .iter()
        .take(SUMMARY_SIZE)
        .enumerate()
        .map(|(i, coin)| format_line(i + 1, coin))
        .collect())
}

fn format_line(position: usize, coin: &CoinEntry) -> String {
    let change = match coin.quotes.usd.percent_change_24h {
        Some(pct) => format!("{}%", format_general(pct)),
        None => "n/a".to_string(),
    };
    format!(
        "{}: {}({}) - Change in 24h: {}\n",
        position, coin.name, coin.symbol, change
    )
}

/// Shortest round-trip digits, switching to exponent form when the decimal exponent
/// is below -4 or at least 6 (`1e-05`, `1.234567e+06`).
fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return format!("{}", value),
    };

    if value != 0.0 && (exponent < -4 || exponent >= 6) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        format!("{}", value)
    }
}
