//! calc 操作
//!
//! 請求正規化（中文單位 → 科學記法 → 十進位）→ 計分引擎 → 回應
//! 附帶中文大數顯示區塊。結構性驗證（levelConfig/sequence 是否存在）
//! 由宿主傳輸層負責，本層對缺失的子欄位一律套用文件化的預設值。

use bigdecimal::BigDecimal;
use log::debug;

use crate::game::constants::DEFAULT_FORMAT_DIGITS;
use crate::game::notation::format_china_ji;
use crate::game::numeric::to_wire_string;
use crate::game::scoring::{
    self, BonusKind, CalcOptions, LevelSettings, ScoreSequence, SeqItem, TheoreticalOverrides,
    TriggerCounts,
};

use super::types::{
    count_or_zero, decimal_or, BonusPayload, BreakdownPayload, CalcOptionsPayload, CalcResponse,
    FormattedPayload, LevelConfig, RawNumber, SequencePayload, TheoreticalMaxesPayload,
};

/// 計算實際與理論最大得分
pub fn calc(
    level: &LevelConfig,
    sequence: &SequencePayload,
    options: &CalcOptionsPayload,
) -> CalcResponse {
    let level_settings = LevelSettings {
        target_score: decimal_or(level.target_score.as_ref(), 0),
        king_call_initial: decimal_or(level.king_call_initial_multiplier.as_ref(), 1),
        king_call_base: level.king_call_base.as_ref().map(|raw| raw.to_decimal(1)),
        king_call_triggers: level.king_call_triggers.as_ref().map(RawNumber::to_count),
    };

    let items: Vec<SeqItem> = sequence
        .items
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|item| SeqItem {
            lanxing: item.kind.as_deref() == Some("lanxing") || item.is_lan_xing == Some(true),
            plus: item.is_plus == Some(true),
            stamp: item.stamp_id.as_deref().and_then(BonusKind::from_stamp_id),
        })
        .collect();

    let seq = ScoreSequence {
        base_score: decimal_or(sequence.base_score.as_ref(), 0),
        items,
    };

    let calc_options = CalcOptions {
        daoyin_value: decimal_or(options.daoyin_value.as_ref(), 1),
        fuzhong_value: decimal_or(options.fuzhong_value.as_ref(), 1),
        yueguang_value: decimal_or(options.yueguang_value.as_ref(), 1),
        override_triggers: options.override_triggers.as_ref().map(|o| TriggerCounts {
            daoyin: count_or_zero(o.daoyin.as_ref()),
            fuzhong: count_or_zero(o.fuzhong.as_ref()),
            yueguang: count_or_zero(o.yueguang.as_ref()),
        }),
        override_theoretical_maxes: options.override_theoretical_maxes.as_ref().map(|o| {
            TheoreticalOverrides {
                daoyin: count_or_zero(o.daoyin.as_ref()),
                fuzhong: count_or_zero(o.fuzhong.as_ref()),
                yueguang: count_or_zero(o.yueguang.as_ref()),
                king_call: o.king_call.as_ref().map(RawNumber::to_count),
            }
        }),
        final_multiplier_override: options
            .final_multiplier_override
            .as_ref()
            .map(|raw| raw.to_decimal(1)),
        theoretical_final_multiplier_override: options
            .theoretical_final_multiplier_override
            .as_ref()
            .map(|raw| raw.to_decimal(1)),
    };

    let outcome = scoring::calculate(&seq, &level_settings, &calc_options);
    debug!(
        "calc: total={} theoretical={} status={}",
        outcome.total_score,
        outcome.theoretical_total_score,
        outcome.status.as_str()
    );

    let fmt = |d: &BigDecimal| format_china_ji(d, DEFAULT_FORMAT_DIGITS);
    let target_supplied = level
        .target_score
        .as_ref()
        .is_some_and(|raw| !raw.as_text().trim().is_empty());
    let formatted = FormattedPayload {
        total_score_china_ji: fmt(&outcome.total_score),
        theoretical_total_score_china_ji: fmt(&outcome.theoretical_total_score),
        target_score_china_ji: target_supplied.then(|| fmt(&level_settings.target_score)),
        daoyin_value_china_ji: fmt(&outcome.breakdown.daoyin.value),
        fuzhong_value_china_ji: fmt(&outcome.breakdown.fuzhong.value),
        yueguang_value_china_ji: fmt(&outcome.breakdown.yueguang.value),
    };

    let bonus_payload = |bonus: &scoring::Bonus| BonusPayload {
        value: to_wire_string(&bonus.value),
        triggers: bonus.triggers,
    };

    CalcResponse {
        total_score: to_wire_string(&outcome.total_score),
        total_multiplier: to_wire_string(&outcome.total_multiplier),
        breakdown: BreakdownPayload {
            daoyin: bonus_payload(&outcome.breakdown.daoyin),
            fuzhong: bonus_payload(&outcome.breakdown.fuzhong),
            yueguang: bonus_payload(&outcome.breakdown.yueguang),
        },
        status: outcome.status.as_str(),
        theoretical_maxes: TheoreticalMaxesPayload {
            daoyin: outcome.theoretical_maxes.daoyin,
            fuzhong: outcome.theoretical_maxes.fuzhong,
            yueguang: outcome.theoretical_maxes.yueguang,
            king_call: outcome.theoretical_maxes.king_call,
        },
        theoretical_total_score: to_wire_string(&outcome.theoretical_total_score),
        theoretical_total_multiplier: to_wire_string(&outcome.theoretical_total_multiplier),
        formatted,
    }
}
