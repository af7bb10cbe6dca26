//! 關卡預測器
//!
//! 依給定順序線性掃描關卡列表，逐關以（可能隨關變化的）王之召喚
//! 倍率重算得分，回報首次失敗前可達的最遠關卡。掃描對相同輸入與
//! 相同關卡順序逐位元可重現。

use bigdecimal::BigDecimal;
use log::debug;

use super::kingcall::rising_factorial_multiplier;
use super::numeric::pow_int;
use super::scoring::TriggerCounts;

/// 單一關卡的預測設定
#[derive(Clone, Debug)]
pub struct StageSettings {
    pub target: BigDecimal,
    pub daoyin: BigDecimal,
    pub fuzhong: BigDecimal,
    pub yueguang: BigDecimal,
    /// 該關的王之召喚底番；None 或 0 時此關不重算王之召喚
    pub king_fan: Option<u32>,
}

/// 預測查詢的王之召喚參數
///
/// `triggers` 已依 type 判別子選定（`current` → 實際觸發次數，
/// 其餘 → 理論最大次數）。
#[derive(Clone, Copy, Debug)]
pub struct KingCallQuery {
    pub triggers: u32,
    pub win_count: u32,
}

/// 預測輸入；關卡依進度順序排列（呼叫方的插入順序有意義）
#[derive(Clone, Debug)]
pub struct LadderInput {
    pub base: BigDecimal,
    pub final_multiplier: BigDecimal,
    pub current_level: String,
    pub stages: Vec<(String, StageSettings)>,
    pub triggers: TriggerCounts,
    pub king_call: Option<KingCallQuery>,
}

/// 預測結果
///
/// 尚未通過任何關卡時 `last_valid_level` 為查詢時的當前關卡，
/// 對應的分數與目標為 `None`。
#[derive(Clone, Debug)]
pub struct Prediction {
    pub can_pass: bool,
    pub last_valid_level: String,
    pub last_valid_score: Option<BigDecimal>,
    pub last_valid_target: Option<BigDecimal>,
    pub first_failed_level: Option<String>,
    pub first_failed_score: Option<BigDecimal>,
    pub first_failed_target: Option<BigDecimal>,
}

/// 掃描關卡階梯，找出首次失敗前可達的最遠關卡
pub fn predict(input: &LadderInput) -> Prediction {
    let mut last_valid_level = input.current_level.clone();
    let mut last_valid_score = None;
    let mut last_valid_target = None;

    for (key, stage) in &input.stages {
        // 這一關的有效倍率：王之召喚啟用、此關有底番、且選定的觸發
        // 次數 > 0 時以連乘式重算，否則沿用呼叫方給的固定倍率
        let effective = match (&input.king_call, stage.king_fan) {
            (Some(query), Some(fan)) if fan > 0 && query.triggers > 0 => {
                let m = rising_factorial_multiplier(fan, query.win_count, query.triggers);
                debug!(
                    "predict: stage {key} king-call fan={fan} triggers={} -> {m}",
                    query.triggers
                );
                m
            }
            _ => input.final_multiplier.clone(),
        };

        let score = effective
            * &input.base
            * pow_int(&stage.daoyin, input.triggers.daoyin)
            * pow_int(&stage.fuzhong, input.triggers.fuzhong)
            * pow_int(&stage.yueguang, input.triggers.yueguang);

        if score >= stage.target {
            last_valid_level = key.clone();
            last_valid_score = Some(score);
            last_valid_target = Some(stage.target.clone());
        } else {
            return Prediction {
                can_pass: false,
                last_valid_level,
                last_valid_score,
                last_valid_target,
                first_failed_level: Some(key.clone()),
                first_failed_score: Some(score),
                first_failed_target: Some(stage.target.clone()),
            };
        }
    }

    Prediction {
        can_pass: true,
        last_valid_level,
        last_valid_score,
        last_valid_target,
        first_failed_level: None,
        first_failed_score: None,
        first_failed_target: None,
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    fn flat_stage(target: &str) -> StageSettings {
        StageSettings {
            target: dec(target),
            daoyin: dec("1"),
            fuzhong: dec("1"),
            yueguang: dec("1"),
            king_fan: None,
        }
    }

    fn input(stages: Vec<(String, StageSettings)>) -> LadderInput {
        LadderInput {
            base: dec("10"),
            final_multiplier: dec("15"),
            current_level: "level-0".to_string(),
            stages,
            triggers: TriggerCounts::default(),
            king_call: None,
        }
    }

    #[test]
    fn test_stops_at_first_failure() {
        let input = input(vec![
            ("stage-1".to_string(), flat_stage("100")),
            ("stage-2".to_string(), flat_stage("1000")),
            ("stage-3".to_string(), flat_stage("50")),
        ]);
        let p = predict(&input);

        assert!(!p.can_pass);
        assert_eq!(p.last_valid_level, "stage-1");
        assert_eq!(p.last_valid_score, Some(dec("150")));
        assert_eq!(p.last_valid_target, Some(dec("100")));
        assert_eq!(p.first_failed_level.as_deref(), Some("stage-2"));
        assert_eq!(p.first_failed_score, Some(dec("150")));
        assert_eq!(p.first_failed_target, Some(dec("1000")));
    }

    #[test]
    fn test_all_stages_pass() {
        let input = input(vec![
            ("stage-1".to_string(), flat_stage("100")),
            ("stage-2".to_string(), flat_stage("150")),
        ]);
        let p = predict(&input);

        assert!(p.can_pass);
        assert_eq!(p.last_valid_level, "stage-2");
        assert_eq!(p.last_valid_score, Some(dec("150")));
        assert!(p.first_failed_level.is_none());
    }

    #[test]
    fn test_empty_ladder_keeps_current_level() {
        let p = predict(&input(vec![]));
        assert!(p.can_pass);
        assert_eq!(p.last_valid_level, "level-0");
        assert!(p.last_valid_score.is_none());
        assert!(p.last_valid_target.is_none());
    }

    #[test]
    fn test_first_stage_failure_keeps_current_level() {
        let p = predict(&input(vec![("stage-1".to_string(), flat_stage("151"))]));
        assert!(!p.can_pass);
        assert_eq!(p.last_valid_level, "level-0");
        assert!(p.last_valid_score.is_none());
        assert_eq!(p.first_failed_level.as_deref(), Some("stage-1"));
    }

    #[test]
    fn test_stage_bonus_values_apply() {
        let mut stage = flat_stage("1000");
        stage.daoyin = dec("2");
        let mut inp = input(vec![("stage-1".to_string(), stage)]);
        inp.triggers = TriggerCounts {
            daoyin: 3,
            ..TriggerCounts::default()
        };
        let p = predict(&inp);
        // 15 × 10 × 2^3 = 1200
        assert!(p.can_pass);
        assert_eq!(p.last_valid_score, Some(dec("1200")));
    }

    #[test]
    fn test_king_call_recompute_per_stage() {
        let mut with_fan = flat_stage("150");
        with_fan.king_fan = Some(1);
        let without_fan = flat_stage("10");

        let mut inp = input(vec![
            ("stage-1".to_string(), with_fan),
            ("stage-2".to_string(), without_fan),
        ]);
        inp.base = dec("1");
        inp.final_multiplier = dec("10");
        inp.king_call = Some(KingCallQuery {
            triggers: 2,
            win_count: 1,
        });

        let p = predict(&inp);
        // stage-1：連乘式 25×2×3 = 150，恰好達標；stage-2 無底番，
        // 沿用固定倍率 10
        assert!(p.can_pass);
        assert_eq!(p.last_valid_level, "stage-2");
        assert_eq!(p.last_valid_score, Some(dec("10")));
    }

    #[test]
    fn test_king_call_needs_positive_triggers() {
        let mut stage = flat_stage("100");
        stage.king_fan = Some(1);
        let mut inp = input(vec![("stage-1".to_string(), stage)]);
        inp.king_call = Some(KingCallQuery {
            triggers: 0,
            win_count: 1,
        });
        let p = predict(&inp);
        // 選定次數為 0：不重算，沿用 15×10
        assert_eq!(p.last_valid_score, Some(dec("150")));
    }
}
