//! 大數記法編解碼
//!
//! 中文單位記法 `<係數><單位><"极"重複>` 與十進位/科學記法之間的雙向轉換。
//! 總指數不變式：`total_exponent = unit_exponent + 48 × repeat_count`。

use std::sync::LazyLock;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use regex::Regex;

use super::constants::{JI_EXPONENT, UNITS, UNIT_EXPONENTS};
use super::numeric::{floor_log10, shift10};

/// 純數字或科學記法，原樣放行（保證重複正規化的冪等性）
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?$").unwrap());

/// `係數 [基礎單位] [极...]`，基礎單位不含「极」，「极」只經重複組計數
static UNIT_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*([万亿兆京垓秭穰沟涧正载]?)(极*)\s*$").unwrap()
});

/// 將非負數值渲染為中文單位記法
///
/// 取 `exponent = floor(log10(d))`，超出「极」的部分以重複「极」後綴
/// 表達（每個 +48）；餘下指數選不超過它的最大單位，差額折入係數。
/// 低於 10^4（含 1 以下的小數）時無單位可用，直接以固定小數位輸出。
pub fn format_china_ji(d: &BigDecimal, digits: i64) -> String {
    if d.is_zero() {
        return "0".to_string();
    }
    let expo = floor_log10(d);
    if expo < 0 {
        return d.with_scale_round(digits, RoundingMode::HalfUp).to_string();
    }

    let ji_count = (expo / JI_EXPONENT) as usize;
    let remaining = expo % JI_EXPONENT;

    // 係數先歸一到 [1, 10)，再依選中的單位回移
    let mut coeff = shift10(d, -expo);
    let mut unit = None;
    for i in (0..UNITS.len()).rev() {
        if remaining >= UNIT_EXPONENTS[i] {
            coeff = shift10(&coeff, remaining - UNIT_EXPONENTS[i]);
            unit = Some(UNITS[i]);
            break;
        }
    }
    if unit.is_none() && remaining > 0 {
        coeff = shift10(&coeff, remaining);
    }

    let mut out = coeff.with_scale_round(digits, RoundingMode::HalfUp).to_string();
    if let Some(u) = unit {
        out.push(u);
    }
    for _ in 0..ji_count {
        out.push('极');
    }
    out
}

/// 將中文單位記法解析為科學記法字串（如 `1.25e52`）
///
/// 空白輸入回傳 `None`（無可正規化的內容）；已是純數字或科學記法
/// 的輸入原樣放行；無法辨識的模式回傳 `None`，由呼叫方退回把原字串
/// 當作字面數值處理。
pub fn parse_china_ji(input: &str) -> Option<String> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }
    if BARE_NUMBER.is_match(raw) {
        return Some(raw.to_string());
    }

    let caps = UNIT_NOTATION.captures(raw)?;
    let coeff = &caps[1];
    let base_exp = caps[2]
        .chars()
        .next()
        .and_then(|u| UNITS.iter().position(|&c| c == u))
        .map(|i| UNIT_EXPONENTS[i])
        .unwrap_or(0);
    let ji_repeats = caps[3].chars().count() as i64;

    Some(format!("{}e{}", coeff, base_exp + ji_repeats * JI_EXPONENT))
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use bigdecimal::num_bigint::BigInt;
    use proptest::prelude::*;

    use super::*;
    use crate::game::numeric::safe_decimal;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_basic_units() {
        assert_eq!(parse_china_ji("3.2兆").as_deref(), Some("3.2e12"));
        assert_eq!(parse_china_ji("1.5万").as_deref(), Some("1.5e4"));
        assert_eq!(parse_china_ji("7载").as_deref(), Some("7e44"));
        assert_eq!(parse_china_ji("2极").as_deref(), Some("2e48"));
    }

    #[test]
    fn test_parse_ji_stacking() {
        // 0 基礎單位 + 2×48
        assert_eq!(parse_china_ji("5极极").as_deref(), Some("5e96"));
        // 兆 = 10^12，再疊一個极
        assert_eq!(parse_china_ji("3.2兆极").as_deref(), Some("3.2e60"));
        assert_eq!(parse_china_ji("1.1极极极").as_deref(), Some("1.1e144"));
    }

    #[test]
    fn test_parse_passthrough() {
        assert_eq!(parse_china_ji("123").as_deref(), Some("123"));
        assert_eq!(parse_china_ji("12.5").as_deref(), Some("12.5"));
        assert_eq!(parse_china_ji("1.5e10").as_deref(), Some("1.5e10"));
        assert_eq!(parse_china_ji("-2.5E-3").as_deref(), Some("-2.5E-3"));
        assert_eq!(parse_china_ji("  42  ").as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse_china_ji(""), None);
        assert_eq!(parse_china_ji("   "), None);
        assert_eq!(parse_china_ji("abc"), None);
        assert_eq!(parse_china_ji("12千"), None);
        assert_eq!(parse_china_ji("万12"), None);
    }

    #[test]
    fn test_parse_idempotent() {
        for text in ["3.2兆", "5极极", "123", "1.5e10", "9999.99极"] {
            let once = parse_china_ji(text).unwrap();
            let twice = parse_china_ji(&once).unwrap();
            assert_eq!(once, twice, "parse must be idempotent on {text}");
        }
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(format_china_ji(&dec("0"), 2), "0");
        assert_eq!(format_china_ji(&dec("25000"), 2), "2.50万");
        assert_eq!(format_china_ji(&dec("3.2e12"), 2), "3.20兆");
        assert_eq!(format_china_ji(&dec("1e48"), 2), "1.00极");
    }

    #[test]
    fn test_format_ji_stacking() {
        // 52 = 48（一個极後綴）+ 4（万）
        assert_eq!(format_china_ji(&dec("1.25e52"), 2), "1.25万极");
        assert_eq!(format_china_ji(&dec("5e96"), 2), "5.00极极");
        // 49 = 48 + 1：餘數不足最小單位，折入係數
        assert_eq!(format_china_ji(&dec("1e49"), 2), "10.00极");
    }

    #[test]
    fn test_format_below_smallest_unit() {
        assert_eq!(format_china_ji(&dec("123"), 2), "123.00");
        assert_eq!(format_china_ji(&dec("9999"), 2), "9999.00");
        // 1 以下不可恐慌，直接按位數輸出
        assert_eq!(format_china_ji(&dec("0.05"), 2), "0.05");
        assert_eq!(format_china_ji(&dec("0.456"), 2), "0.46");
    }

    #[test]
    fn test_format_digit_control() {
        assert_eq!(format_china_ji(&dec("1.2345e8"), 3), "1.235亿");
        assert_eq!(format_china_ji(&dec("1.2345e8"), 0), "1亿");
    }

    proptest! {
        /// 每個單位 × 任意不超過兩位小數的係數：格式化後再解析必須
        /// 精確還原原始數值
        #[test]
        fn prop_format_parse_round_trip(
            unit_idx in 0usize..UNITS.len(),
            whole in 1i64..10_000,
            cents in 0i64..100,
        ) {
            let coeff = BigDecimal::new(BigInt::from(whole * 100 + cents), 2);
            let magnitude = shift10(&coeff, UNIT_EXPONENTS[unit_idx]);
            let text = format_china_ji(&magnitude, 2);
            let parsed = parse_china_ji(&text).expect("formatted output must parse");
            prop_assert_eq!(safe_decimal(&parsed, 0), magnitude);
        }
    }
}
