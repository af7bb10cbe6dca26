//! 計分規則常量定義

// ============================================================================
// 大數單位（中文單位記法）
// ============================================================================

/// 12 個中文大數單位，依指數遞增排列
pub const UNITS: [char; 12] = [
    '万', '亿', '兆', '京', '垓', '秭', '穰', '沟', '涧', '正', '载', '极',
];

/// 各單位綁定的 10 的冪次（與 UNITS 一一對應）
pub const UNIT_EXPONENTS: [i64; 12] = [4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48];

/// 每個後綴「极」追加的指數
pub const JI_EXPONENT: i64 = 48;

// ============================================================================
// 岚星傳導序列
// ============================================================================

/// 岚星+ 的傳導序列：向右 7 格，各格的加成次數
pub const PLUS_PATTERN: [u32; 7] = [4, 4, 5, 6, 7, 8, 9];

/// 普通岚星的傳導序列：向右 5 格
pub const NONPLUS_PATTERN: [u32; 5] = [3, 3, 4, 5, 6];

// ============================================================================
// 王之召喚
// ============================================================================

/// 連乘公式的有效番倍率：effective = 14 × fan
pub const KING_EFFECTIVE_FACTOR: u32 = 14;

/// 連乘公式的固定加值：final = effective + 10 + win_count
pub const KING_FLAT_BONUS: u32 = 10;

/// 幾何公式在理論最大重算時的預設底番
pub const KING_DEFAULT_BASE_FAN: i64 = 30;

// ============================================================================
// 判定
// ============================================================================

/// 總分達到目標分的此倍數時判定為 over5x
pub const OVER_TARGET_RATIO: u32 = 5;

/// 顯示用的預設小數位數
pub const DEFAULT_FORMAT_DIGITS: i64 = 2;
