//! 服務層請求/回應型別
//!
//! JSON 欄位一律 camelCase。數值欄位同時接受 JSON 字串與 JSON 數字，
//! 字串可含中文單位記法；正規化統一經過大數記法解析器，再做安全
//! 十進位轉換。所有十進位輸出一律序列化為精確字串，避免浮點損失。

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::game::notation::parse_china_ji;
use crate::game::numeric::safe_decimal;

// ============================================================================
// 數值欄位
// ============================================================================

/// 字串或數字皆可的數值欄位
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Text(String),
    Number(serde_json::Number),
}

impl RawNumber {
    /// 以文字形式取出（JSON 數字轉為其十進位字面）
    pub fn as_text(&self) -> String {
        match self {
            RawNumber::Text(s) => s.clone(),
            RawNumber::Number(n) => n.to_string(),
        }
    }

    /// 正規化：中文單位記法轉科學記法，其餘原樣保留
    pub fn normalized(&self) -> String {
        let text = self.as_text();
        parse_china_ji(&text).unwrap_or(text)
    }

    /// 正規化後安全轉十進位，失敗回退 `fallback`
    pub fn to_decimal(&self, fallback: i64) -> BigDecimal {
        safe_decimal(&self.normalized(), fallback)
    }

    /// 次數欄位的數值強制轉換；無法解析或非正值一律回 0
    pub fn to_count(&self) -> u32 {
        self.as_text()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    }
}

/// 欄位缺失時回退 `fallback` 的十進位轉換
pub fn decimal_or(field: Option<&RawNumber>, fallback: i64) -> BigDecimal {
    match field {
        Some(raw) => raw.to_decimal(fallback),
        None => BigDecimal::from(fallback),
    }
}

/// 欄位缺失時回 0 的次數轉換
pub fn count_or_zero(field: Option<&RawNumber>) -> u32 {
    field.map(RawNumber::to_count).unwrap_or(0)
}

// ============================================================================
// calc 請求
// ============================================================================

/// 關卡配置
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelConfig {
    pub target_score: Option<RawNumber>,
    pub king_call_initial_multiplier: Option<RawNumber>,
    pub king_call_base: Option<RawNumber>,
    pub king_call_triggers: Option<RawNumber>,
}

/// 出牌序列
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequencePayload {
    pub base_score: Option<RawNumber>,
    pub items: Option<Vec<ItemPayload>>,
}

/// 序列項目；`type == "lanxing"` 或 `isLanXing == true` 表示岚星
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_lan_xing: Option<bool>,
    pub is_plus: Option<bool>,
    pub stamp_id: Option<String>,
}

/// 各護身符的次數欄位
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerTriplet {
    pub daoyin: Option<RawNumber>,
    pub fuzhong: Option<RawNumber>,
    pub yueguang: Option<RawNumber>,
}

/// 理論最大次數覆寫；`kingCall` 的出現與否決定王之召喚理論分支
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TheoreticalPayload {
    pub daoyin: Option<RawNumber>,
    pub fuzhong: Option<RawNumber>,
    pub yueguang: Option<RawNumber>,
    pub king_call: Option<RawNumber>,
}

/// 計分選項
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcOptionsPayload {
    pub daoyin_value: Option<RawNumber>,
    pub fuzhong_value: Option<RawNumber>,
    pub yueguang_value: Option<RawNumber>,
    pub override_triggers: Option<TriggerTriplet>,
    pub override_theoretical_maxes: Option<TheoreticalPayload>,
    pub final_multiplier_override: Option<RawNumber>,
    pub theoretical_final_multiplier_override: Option<RawNumber>,
}

// ============================================================================
// calc 回應
// ============================================================================

/// 單個護身符的明細
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusPayload {
    pub value: String,
    pub triggers: u32,
}

/// 三個護身符的明細
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownPayload {
    pub daoyin: BonusPayload,
    pub fuzhong: BonusPayload,
    pub yueguang: BonusPayload,
}

/// 理論最大觸發次數
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoreticalMaxesPayload {
    pub daoyin: u32,
    pub fuzhong: u32,
    pub yueguang: u32,
    pub king_call: u32,
}

/// 中文大數顯示區塊
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPayload {
    pub total_score_china_ji: String,
    pub theoretical_total_score_china_ji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_score_china_ji: Option<String>,
    pub daoyin_value_china_ji: String,
    pub fuzhong_value_china_ji: String,
    pub yueguang_value_china_ji: String,
}

/// calc 操作的完整回應
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResponse {
    pub total_score: String,
    pub total_multiplier: String,
    pub breakdown: BreakdownPayload,
    pub status: &'static str,
    pub theoretical_maxes: TheoreticalMaxesPayload,
    pub theoretical_total_score: String,
    pub theoretical_total_multiplier: String,
    pub formatted: FormattedPayload,
}

// ============================================================================
// predict 請求/回應
// ============================================================================

/// 單一關卡的預測資料
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StagePayload {
    pub target_score: Option<RawNumber>,
    pub daoyin_value: Option<RawNumber>,
    pub fuzhong_value: Option<RawNumber>,
    pub yueguang_value: Option<RawNumber>,
    pub king_value: Option<RawNumber>,
}

/// 預測查詢的王之召喚參數
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KingCallPayload {
    pub enabled: Option<bool>,
    pub triggers: Option<RawNumber>,
    pub max_triggers: Option<RawNumber>,
    pub win_count: Option<RawNumber>,
}

/// predict 操作的請求
///
/// `levelData` 以 JSON 物件的插入順序迭代（關卡即進度順序），
/// 因此以保序 Map 承載。
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictRequest {
    pub base_score: Option<RawNumber>,
    pub final_multiplier: Option<RawNumber>,
    pub current_level: Option<String>,
    pub level_data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub triggers: Option<TriggerTriplet>,
    pub king_call_data: Option<KingCallPayload>,
}

/// predict 操作的完整回應
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub can_pass: bool,
    pub last_valid_level: String,
    pub last_valid_score: Option<String>,
    pub last_valid_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failed_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failed_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failed_target: Option<String>,
    pub trigger_text: &'static str,
}

// ============================================================================
// 單元測試
// ============================================================================
