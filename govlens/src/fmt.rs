//! Domain-aware value formatting
//!
//! All formatters are total over their input domain: out-of-range values
//! degrade to a raw string representation instead of failing.

use alloy_primitives::U256;

/// Assumed block time used when converting block counts to wall-clock time.
pub const SECONDS_PER_BLOCK: u64 = 12;

/// Values below this many wei render in wei rather than as a fraction of ETH.
const WEI_DISPLAY_CEILING: u64 = 100_000_000_000_000; // 1e14 = 0.0001 ETH

fn trim_trailing_zeros(s: &str) -> &str {
    s.trim_end_matches('0')
}

fn pad_fraction(frac: U256, width: usize) -> String {
    let mut digits = frac.to_string();
    while digits.len() < width {
        digits.insert(0, '0');
    }
    digits
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Formats a wei amount for display.
///
/// Zero renders as "0 ETH", dust below 0.0001 ETH stays in wei, amounts
/// below 1 ETH get 6 decimal places and everything else 4, with trailing
/// zeros trimmed.
pub fn format_eth(wei: U256) -> String {
    if wei.is_zero() {
        return "0 ETH".to_string();
    }
    if wei < U256::from(WEI_DISPLAY_CEILING) {
        return format!("{wei} wei");
    }

    let one_eth = U256::from(10u64).pow(U256::from(18u64));
    let dp = if wei < one_eth { 6usize } else { 4usize };
    let scale = U256::from(10u64).pow(U256::from((18 - dp) as u64));
    let dp_scale = U256::from(10u64).pow(U256::from(dp as u64));

    let truncated = wei / scale;
    let int = truncated / dp_scale;
    let frac = truncated % dp_scale;

    let digits = pad_fraction(frac, dp);
    let digits = trim_trailing_zeros(&digits);
    if digits.is_empty() {
        format!("{int} ETH")
    } else {
        format!("{int}.{digits} ETH")
    }
}

/// Formats a raw token amount given its decimal count and symbol.
///
/// Six-decimal symbols are dollar-pegged in this domain (USDC family) and
/// render as currency with two decimals; everything else renders at full
/// precision with the symbol as a suffix.
pub fn format_token_amount(raw: U256, decimals: u8, symbol: &str) -> String {
    let Some(scale) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        return format!("{raw} {symbol}");
    };
    let int = raw / scale;
    let frac = raw % scale;

    if decimals == 6 {
        let cents = frac / U256::from(10_000u64);
        return format!("${int}.{:02}", cents.to::<u64>());
    }

    if frac.is_zero() {
        return format!("{int} {symbol}");
    }
    let digits = pad_fraction(frac, decimals as usize);
    let digits = trim_trailing_zeros(&digits);
    format!("{int}.{digits} {symbol}")
}

/// Basis points to a percentage string; 1 BPS = 0.01%.
pub fn format_bps(raw: U256) -> String {
    let int = raw / U256::from(100u64);
    let frac = raw % U256::from(100u64);
    format!("{int}.{:02}%", frac.to::<u64>())
}

/// Approximate wall-clock duration for a block count, at 12s per block.
pub fn format_blocks_as_duration(blocks: U256) -> String {
    let Some(secs) = blocks.checked_mul(U256::from(SECONDS_PER_BLOCK)) else {
        return format!("{blocks} blocks");
    };
    if secs > U256::from(u64::MAX) {
        return format!("{blocks} blocks");
    }
    format!("~{}", format_duration_secs(secs.to::<u64>()))
}

/// Renders a second count as days+hours when at least a day, hours+minutes
/// otherwise.
pub fn format_duration_secs(secs: u64) -> String {
    if secs < 60 {
        return plural(secs, "second");
    }
    let hours = secs / 3600;
    if hours >= 24 {
        let days = hours / 24;
        let rem_hours = hours % 24;
        if rem_hours == 0 {
            plural(days, "day")
        } else {
            format!("{} {}", plural(days, "day"), plural(rem_hours, "hour"))
        }
    } else {
        let minutes = (secs % 3600) / 60;
        if hours == 0 {
            plural(minutes, "minute")
        } else if minutes == 0 {
            plural(hours, "hour")
        } else {
            format!("{} {}", plural(hours, "hour"), plural(minutes, "minute"))
        }
    }
}

/// Timelock delays are quoted in seconds on-chain but reviewed in hours.
pub fn format_seconds_as_hours(secs: U256) -> String {
    if secs > U256::from(u64::MAX) {
        return format!("{secs} seconds");
    }
    let s = secs.to::<u64>();
    let hours = s / 3600;
    let tenths = (s % 3600) / 360;
    if tenths == 0 {
        plural(hours, "hour")
    } else {
        format!("{hours}.{tenths} hours")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eth(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_format_eth_zero() {
        assert_eq!(format_eth(U256::ZERO), "0 ETH");
    }

    #[test]
    fn test_format_eth_dust_stays_in_wei() {
        assert_eq!(format_eth(U256::from(1000u64)), "1000 wei");
        assert_eq!(
            format_eth(U256::from(99_999_999_999_999u64)),
            "99999999999999 wei"
        );
    }

    #[test]
    fn test_format_eth_sub_one() {
        // 0.5 ETH, six decimal places with trailing zeros trimmed
        assert_eq!(format_eth(eth(1) / U256::from(2u64)), "0.5 ETH");
        // 0.123456789 ETH truncates at six places
        assert_eq!(
            format_eth(U256::from(123_456_789_000_000_000u64)),
            "0.123456 ETH"
        );
    }

    #[test]
    fn test_format_eth_whole_and_large() {
        assert_eq!(format_eth(eth(15)), "15 ETH");
        assert_eq!(format_eth(eth(1)), "1 ETH");
        // 2.50001 ETH truncates at four places
        assert_eq!(
            format_eth(U256::from(2_500_010_000_000_000_000u128)),
            "2.5 ETH"
        );
        assert_eq!(
            format_eth(U256::from(2_512_300_000_000_000_000u128)),
            "2.5123 ETH"
        );
    }

    #[test]
    fn test_format_token_amount_usdc() {
        assert_eq!(format_token_amount(U256::from(1_000_000u64), 6, "USDC"), "$1.00");
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6, "USDC"), "$1.50");
        assert_eq!(
            format_token_amount(U256::from(123_456_789u64), 6, "USDC"),
            "$123.45"
        );
        assert_eq!(format_token_amount(U256::ZERO, 6, "USDC"), "$0.00");
    }

    #[test]
    fn test_format_token_amount_symbol_suffix() {
        assert_eq!(
            format_token_amount(eth(2), 18, "WETH"),
            "2 WETH"
        );
        assert_eq!(
            format_token_amount(U256::from(1_500_000_000_000_000_000u128), 18, "WETH"),
            "1.5 WETH"
        );
    }

    #[test]
    fn test_format_token_amount_degrades_on_absurd_decimals() {
        let out = format_token_amount(U256::from(5u64), 255, "X");
        assert_eq!(out, "5 X");
    }

    #[test]
    fn test_format_bps() {
        assert_eq!(format_bps(U256::from(250u64)), "2.50%");
        assert_eq!(format_bps(U256::from(25u64)), "0.25%");
        assert_eq!(format_bps(U256::from(10_000u64)), "100.00%");
        assert_eq!(format_bps(U256::ZERO), "0.00%");
    }

    #[test]
    fn test_format_blocks_as_duration() {
        // 7200 blocks * 12s = 1 day
        assert_eq!(format_blocks_as_duration(U256::from(7200u64)), "~1 day");
        // 21600 blocks = 3 days
        assert_eq!(format_blocks_as_duration(U256::from(21_600u64)), "~3 days");
        // 300 blocks = 1 hour
        assert_eq!(format_blocks_as_duration(U256::from(300u64)), "~1 hour");
        // 325 blocks = 1 hour 5 minutes
        assert_eq!(
            format_blocks_as_duration(U256::from(325u64)),
            "~1 hour 5 minutes"
        );
        // absurd counts degrade to a raw block count
        assert_eq!(
            format_blocks_as_duration(U256::MAX),
            format!("{} blocks", U256::MAX)
        );
    }

    #[test]
    fn test_format_duration_secs_boundaries() {
        assert_eq!(format_duration_secs(0), "0 seconds");
        assert_eq!(format_duration_secs(59), "59 seconds");
        assert_eq!(format_duration_secs(60), "1 minute");
        assert_eq!(format_duration_secs(3600), "1 hour");
        assert_eq!(format_duration_secs(86_400), "1 day");
        assert_eq!(format_duration_secs(90_000), "1 day 1 hour");
    }

    #[test]
    fn test_format_seconds_as_hours() {
        assert_eq!(format_seconds_as_hours(U256::from(172_800u64)), "48 hours");
        assert_eq!(format_seconds_as_hours(U256::from(3600u64)), "1 hour");
        assert_eq!(format_seconds_as_hours(U256::from(5400u64)), "1.5 hours");
    }
}
