//! Human-readable amounts.

use alloy::primitives::U256;

/// Wei per thousandth of an ether.
const WEI_PER_MILLI_ETHER: u64 = 1_000_000_000_000_000;

/// Format a wei amount in ether with exactly three decimals and `,` digit
/// grouping, rounding half up: `200000000000000000` becomes `"0.200"`.
pub fn format_ether(wei: U256) -> String {
    let unit = U256::from(WEI_PER_MILLI_ETHER);
    let milli = wei.saturating_add(unit / U256::from(2)) / unit;

    let thousand = U256::from(1000u64);
    let whole = milli / thousand;
    let frac = (milli % thousand).to::<u64>();

    format!("{}.{:03}", group_thousands(&whole.to_string()), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
