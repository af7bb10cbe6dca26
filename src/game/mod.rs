//! 計分核心模組
//!
//! 包含大數計分計算器的核心定義：
//! - `constants`: 單位表、傳導序列與王之召喚常量
//! - `numeric`: 高精度數值基礎工具
//! - `notation`: 大數記法編解碼（中文單位 ↔ 科學記法）
//! - `kingcall`: 王之召喚倍率的兩個具名策略
//! - `scoring`: 計分引擎
//! - `ladder`: 關卡預測器
//!
//! 本層只處理已正規化的十進位數值；字串請求的正規化在 `service` 層。

pub mod constants;
pub mod kingcall;
pub mod ladder;
pub mod notation;
pub mod numeric;
pub mod scoring;

// Re-export 常用類型
pub use constants::*;
pub use kingcall::{geometric_multiplier, rising_factorial_multiplier};
pub use ladder::{predict, KingCallQuery, LadderInput, Prediction, StageSettings};
pub use notation::{format_china_ji, parse_china_ji};
pub use numeric::{floor_log10, pow_int, safe_decimal, shift10, to_wire_string};
pub use scoring::{
    calculate, Bonus, BonusKind, BonusSet, CalcOptions, LevelSettings, ScoreOutcome,
    ScoreSequence, SeqItem, Status, TheoreticalMaxes, TheoreticalOverrides, TriggerCounts,
};
