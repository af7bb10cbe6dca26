//! 王之召喚倍率計算
//!
//! 兩個具名策略，依輸入欄位選擇，互不混用：
//! - 幾何式 `initial × base^triggers`：由關卡設定的
//!   `kingCallBase`/`kingCallTriggers` 驅動，計分引擎使用。
//! - 連乘式（上升階乘）：由關卡的 `kingValue` 加預測查詢的王之召喚
//!   參數驅動，關卡預測器使用。

use bigdecimal::BigDecimal;

use super::constants::{KING_EFFECTIVE_FACTOR, KING_FLAT_BONUS};
use super::numeric::pow_int;

/// 幾何式王之召喚倍率
pub fn geometric_multiplier(
    initial: &BigDecimal,
    base_fan: &BigDecimal,
    triggers: u32,
) -> BigDecimal {
    initial * pow_int(base_fan, triggers)
}

/// 連乘式王之召喚倍率
///
/// `effective = 14 × fan`；`final = effective + 10 + win_count`；
/// 倍率 = `final × ∏_{k=fan+1}^{fan+triggers} k`。全程以十進位精確
/// 連乘，不經過浮點。
pub fn rising_factorial_multiplier(fan: u32, win_count: u32, triggers: u32) -> BigDecimal {
    let effective = KING_EFFECTIVE_FACTOR * fan;
    let final_fan = effective + KING_FLAT_BONUS + win_count;
    let mut multiplier = BigDecimal::from(final_fan);
    for k in (fan + 1)..=(fan + triggers) {
        multiplier = multiplier * BigDecimal::from(k);
    }
    multiplier
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_multiplier() {
        let one = BigDecimal::from(1);
        let thirty = BigDecimal::from(30);
        assert_eq!(geometric_multiplier(&one, &thirty, 2), BigDecimal::from(900));
        assert_eq!(geometric_multiplier(&one, &thirty, 0), BigDecimal::from(1));

        let three = BigDecimal::from(3);
        assert_eq!(geometric_multiplier(&three, &thirty, 1), BigDecimal::from(90));
    }

    #[test]
    fn test_rising_factorial_multiplier() {
        // fan=1: effective=14, final=14+10+1=25, 連乘 25×2×3 = 150
        assert_eq!(rising_factorial_multiplier(1, 1, 2), BigDecimal::from(150));
        // 觸發 0 次時只剩 final 本身
        assert_eq!(rising_factorial_multiplier(1, 1, 0), BigDecimal::from(25));
        // fan=2, win=3: final = 28+10+3 = 41, ×3×4×5 = 2460
        assert_eq!(rising_factorial_multiplier(2, 3, 3), BigDecimal::from(2460));
    }
}
