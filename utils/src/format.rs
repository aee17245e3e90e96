//! Display formatting helpers shared by the controller and the command line.

use estate_types::WalletAddress;

/// Fixed conversion rate used for fiat display of ETH values.
pub const ETH_TO_USD: f64 = 3200.0;

pub fn eth_to_usd(eth: f64) -> f64 {
    eth * ETH_TO_USD
}

/// `0x71C7656E...976F` style shortening: first six characters, last four.
pub fn short_address(address: &WalletAddress) -> String {
    let s = address.as_str();
    if s.len() <= 10 {
        return s.to_string();
    }
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

/// `Ξ 0.05`: up to six decimals, trailing zeros trimmed.
pub fn format_eth(eth: f64) -> String {
    format!("Ξ {}", trim_decimals(eth, 6))
}

/// `$1,600.50`: two decimals with thousands separators.
pub fn format_usd(usd: f64) -> String {
    let negative = usd < 0.0;
    let cents = (usd.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

/// `12,500`: integer with comma separators.
pub fn group_thousands(n: impl Into<u128>) -> String {
    let digits = n.into().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn trim_decimals(value: f64, max_decimals: usize) -> String {
    let s = format!("{value:.max_decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
