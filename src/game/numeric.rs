//! 高精度數值基礎工具
//!
//! 所有分數與倍率一律以 `BigDecimal` 運算，乘法與整數次冪保持精確；
//! 以 10 為底的指數直接由位數與 scale 推得，不經過浮點。

use bigdecimal::{BigDecimal, One, Zero};

/// 安全的十進位轉換：轉換失敗時回退到 `fallback`，永不報錯
///
/// 回退值約定：分數/目標分用 0，倍率類數值用 1。
pub fn safe_decimal(input: &str, fallback: i64) -> BigDecimal {
    input
        .trim()
        .parse::<BigDecimal>()
        .unwrap_or_else(|_| BigDecimal::from(fallback))
}

/// 整數次冪（平方求冪），精確無捨入
///
/// `exp == 0` 時回傳 1，包含 0^0（惰性護身符規則視其為乘法單位元）。
pub fn pow_int(base: &BigDecimal, mut exp: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut acc = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result = &result * &acc;
        }
        exp >>= 1;
        if exp > 0 {
            acc = &acc * &acc;
        }
    }
    result
}

/// 乘以 10^n（n 可為負），透過調整 scale 實現，精確無除法
pub fn shift10(d: &BigDecimal, n: i64) -> BigDecimal {
    let (mantissa, scale) = d.as_bigint_and_exponent();
    BigDecimal::new(mantissa, scale - n)
}

/// floor(log10(d))，d 必須非零
///
/// mantissa 有 k 位數、scale 為 e 時，值落在 [10^(k-1-e), 10^(k-e))。
pub fn floor_log10(d: &BigDecimal) -> i64 {
    let (_, scale) = d.as_bigint_and_exponent();
    d.digits() as i64 - 1 - scale
}

/// 序列化為精確十進位字串
///
/// 指數落在 (-7, 21) 時輸出普通記法，否則輸出精確科學記法；
/// 兩種輸出皆可被 `safe_decimal` 與記法解析器無損讀回。
pub fn to_wire_string(d: &BigDecimal) -> String {
    if d.is_zero() {
        return "0".to_string();
    }
    let n = d.normalized();
    let expo = floor_log10(&n);
    if expo > -7 && expo < 21 {
        n.to_string()
    } else {
        n.to_scientific_notation()
    }
}

// ============================================================================
// 單元測試
// ============================================================================
