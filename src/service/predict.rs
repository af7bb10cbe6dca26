//! predict 操作
//!
//! 請求正規化後交給關卡預測器掃描。`levelData` 依插入順序迭代，
//! `type` 判別子在掃描前決定採用實際或理論最大的王之召喚觸發次數。

use log::debug;

use crate::game::ladder::{self, KingCallQuery, LadderInput, StageSettings};
use crate::game::numeric::to_wire_string;
use crate::game::scoring::TriggerCounts;

use super::types::{
    count_or_zero, decimal_or, PredictRequest, PredictResponse, StagePayload,
};

/// 預測可達的最遠關卡
pub fn predict(request: &PredictRequest) -> PredictResponse {
    let is_current = request.kind.as_deref() == Some("current");

    let triggers = request
        .triggers
        .as_ref()
        .map(|t| TriggerCounts {
            daoyin: count_or_zero(t.daoyin.as_ref()),
            fuzhong: count_or_zero(t.fuzhong.as_ref()),
            yueguang: count_or_zero(t.yueguang.as_ref()),
        })
        .unwrap_or_default();

    let king_call = request
        .king_call_data
        .as_ref()
        .filter(|k| k.enabled == Some(true))
        .map(|k| {
            let selected = if is_current {
                count_or_zero(k.triggers.as_ref())
            } else {
                count_or_zero(k.max_triggers.as_ref())
            };
            let win_count = match count_or_zero(k.win_count.as_ref()) {
                0 => 1,
                n => n,
            };
            KingCallQuery {
                triggers: selected,
                win_count,
            }
        });

    let stages: Vec<(String, StageSettings)> = request
        .level_data
        .as_ref()
        .map(|map| {
            map.iter()
                .map(|(key, value)| {
                    let payload: StagePayload =
                        serde_json::from_value(value.clone()).unwrap_or_default();
                    let settings = StageSettings {
                        target: decimal_or(payload.target_score.as_ref(), 0),
                        daoyin: decimal_or(payload.daoyin_value.as_ref(), 1),
                        fuzhong: decimal_or(payload.fuzhong_value.as_ref(), 1),
                        yueguang: decimal_or(payload.yueguang_value.as_ref(), 1),
                        king_fan: payload.king_value.as_ref().map(|raw| raw.to_count()),
                    };
                    (key.clone(), settings)
                })
                .collect()
        })
        .unwrap_or_default();

    let input = LadderInput {
        base: decimal_or(request.base_score.as_ref(), 0),
        final_multiplier: decimal_or(request.final_multiplier.as_ref(), 1),
        current_level: request.current_level.clone().unwrap_or_default(),
        stages,
        triggers,
        king_call,
    };

    let prediction = ladder::predict(&input);
    debug!(
        "predict: can_pass={} last_valid={}",
        prediction.can_pass, prediction.last_valid_level
    );

    let trigger_text = match (prediction.can_pass, is_current) {
        (_, false) => "理论最大次数",
        (false, true) => "当前触发次数",
        (true, true) => " ",
    };

    PredictResponse {
        can_pass: prediction.can_pass,
        last_valid_level: prediction.last_valid_level,
        last_valid_score: prediction.last_valid_score.as_ref().map(to_wire_string),
        last_valid_target: prediction.last_valid_target.as_ref().map(to_wire_string),
        first_failed_level: prediction.first_failed_level,
        first_failed_score: prediction.first_failed_score.as_ref().map(to_wire_string),
        first_failed_target: prediction.first_failed_target.as_ref().map(to_wire_string),
        trigger_text,
    }
}
