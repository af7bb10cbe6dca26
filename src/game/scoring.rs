//! 計分引擎
//!
//! 給定小分分值、三個具名護身符（盗印/负重/月光）的番數與觸發次數、
//! 以及王之召喚倍率，計算實際總分、與目標分的相對狀態，並在另一套
//! 觸發次數假設下計算理論最大總分。
//!
//! 所有數值轉換失敗一律回退到中性預設值，本模組不報錯。

use bigdecimal::{BigDecimal, Zero};
use log::debug;

use super::constants::{KING_DEFAULT_BASE_FAN, NONPLUS_PATTERN, OVER_TARGET_RATIO, PLUS_PATTERN};
use super::kingcall::geometric_multiplier;
use super::numeric::pow_int;

// ============================================================================
// 護身符
// ============================================================================

/// 護身符種類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusKind {
    Daoyin,
    Fuzhong,
    Yueguang,
}

impl BonusKind {
    /// 從序列項目的標記 ID 解析
    pub fn from_stamp_id(id: &str) -> Option<BonusKind> {
        match id {
            "daoyin" => Some(BonusKind::Daoyin),
            "fuzhong" => Some(BonusKind::Fuzhong),
            "yueguang" => Some(BonusKind::Yueguang),
            _ => None,
        }
    }
}

/// 單個護身符：每次觸發的番數與觸發次數，貢獻 `value^triggers`
#[derive(Clone, Debug)]
pub struct Bonus {
    pub value: BigDecimal,
    pub triggers: u32,
}

/// 三個具名護身符，乘入順序固定為 daoyin → fuzhong → yueguang
#[derive(Clone, Debug)]
pub struct BonusSet {
    pub daoyin: Bonus,
    pub fuzhong: Bonus,
    pub yueguang: Bonus,
}

impl BonusSet {
    fn from_values(daoyin: BigDecimal, fuzhong: BigDecimal, yueguang: BigDecimal) -> Self {
        let bonus = |value| Bonus { value, triggers: 0 };
        Self {
            daoyin: bonus(daoyin),
            fuzhong: bonus(fuzhong),
            yueguang: bonus(yueguang),
        }
    }

    fn get_mut(&mut self, kind: BonusKind) -> &mut Bonus {
        match kind {
            BonusKind::Daoyin => &mut self.daoyin,
            BonusKind::Fuzhong => &mut self.fuzhong,
            BonusKind::Yueguang => &mut self.yueguang,
        }
    }

    /// 依固定順序把各護身符的 `value^exp` 乘入起始倍率
    fn fold_multiplier(&self, start: BigDecimal, exps: [u32; 3]) -> BigDecimal {
        let mut acc = start;
        acc = acc * pow_int(&self.daoyin.value, exps[0]);
        acc = acc * pow_int(&self.fuzhong.value, exps[1]);
        acc = acc * pow_int(&self.yueguang.value, exps[2]);
        acc
    }
}

// ============================================================================
// 輸入
// ============================================================================

/// 出牌序列中的單個項目
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqItem {
    /// 是否為岚星（觸發傳導者）
    pub lanxing: bool,
    /// 岚星+ 旗標，決定使用哪條傳導序列
    pub plus: bool,
    /// 此項目攜帶的護身符標記（最多一個）
    pub stamp: Option<BonusKind>,
}

/// 出牌序列：小分分值與項目列表
#[derive(Clone, Debug, Default)]
pub struct ScoreSequence {
    pub base_score: BigDecimal,
    pub items: Vec<SeqItem>,
}

/// 關卡設定
///
/// 王之召喚欄位以 `Option` 區分「未配置」與「配置為某值」：理論最大
/// 分支只在兩個欄位都有配置時啟用。
#[derive(Clone, Debug)]
pub struct LevelSettings {
    pub target_score: BigDecimal,
    pub king_call_initial: BigDecimal,
    pub king_call_base: Option<BigDecimal>,
    pub king_call_triggers: Option<u32>,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            target_score: BigDecimal::from(0),
            king_call_initial: BigDecimal::from(1),
            king_call_base: None,
            king_call_triggers: None,
        }
    }
}

/// 三個護身符各自的觸發次數
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerCounts {
    pub daoyin: u32,
    pub fuzhong: u32,
    pub yueguang: u32,
}

/// 理論最大觸發次數覆寫；`king_call` 以 `Option` 區分「呼叫方未提及
/// 王之召喚」與「提及且為某值」，前者不啟用王之召喚理論分支
#[derive(Clone, Copy, Debug, Default)]
pub struct TheoreticalOverrides {
    pub daoyin: u32,
    pub fuzhong: u32,
    pub yueguang: u32,
    pub king_call: Option<u32>,
}

/// 計分選項：護身符番數、觸發次數覆寫與倍率覆寫
#[derive(Clone, Debug)]
pub struct CalcOptions {
    pub daoyin_value: BigDecimal,
    pub fuzhong_value: BigDecimal,
    pub yueguang_value: BigDecimal,
    /// 給定時整組取代岚星傳導（缺欄位視為 0）
    pub override_triggers: Option<TriggerCounts>,
    pub override_theoretical_maxes: Option<TheoreticalOverrides>,
    /// 呼叫方已算好的王之召喚倍率，給定時直接使用不再重算
    pub final_multiplier_override: Option<BigDecimal>,
    pub theoretical_final_multiplier_override: Option<BigDecimal>,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            daoyin_value: BigDecimal::from(1),
            fuzhong_value: BigDecimal::from(1),
            yueguang_value: BigDecimal::from(1),
            override_triggers: None,
            override_theoretical_maxes: None,
            final_multiplier_override: None,
            theoretical_final_multiplier_override: None,
        }
    }
}

// ============================================================================
// 輸出
// ============================================================================

/// 與目標分的相對狀態
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Under,
    Ok,
    Over5x,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Under => "under",
            Status::Ok => "ok",
            Status::Over5x => "over5x",
        }
    }
}

/// 各護身符的理論最大觸發次數
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TheoreticalMaxes {
    pub daoyin: u32,
    pub fuzhong: u32,
    pub yueguang: u32,
    pub king_call: u32,
}

/// 計分結果
#[derive(Clone, Debug)]
pub struct ScoreOutcome {
    pub total_score: BigDecimal,
    pub total_multiplier: BigDecimal,
    pub breakdown: BonusSet,
    pub status: Status,
    pub theoretical_maxes: TheoreticalMaxes,
    pub theoretical_total_score: BigDecimal,
    pub theoretical_total_multiplier: BigDecimal,
}

// ============================================================================
// 計分
// ============================================================================

/// 計算一次出牌的實際總分與理論最大總分
///
/// 計算步驟順序固定，相同輸入的輸出逐位元可重現。
pub fn calculate(
    sequence: &ScoreSequence,
    level: &LevelSettings,
    options: &CalcOptions,
) -> ScoreOutcome {
    let base = &sequence.base_score;

    // 最終倍率：呼叫方覆寫優先，否則套幾何式王之召喚
    let final_multiplier = match &options.final_multiplier_override {
        Some(m) => m.clone(),
        None => {
            let initial = level.king_call_initial.clone();
            match (&level.king_call_base, level.king_call_triggers) {
                (Some(base_fan), Some(triggers)) if triggers > 0 && !base_fan.is_zero() => {
                    geometric_multiplier(&initial, base_fan, triggers)
                }
                _ => initial,
            }
        }
    };

    let mut bonuses = BonusSet::from_values(
        options.daoyin_value.clone(),
        options.fuzhong_value.clone(),
        options.yueguang_value.clone(),
    );

    // 觸發次數：顯式覆寫整組生效，否則掃描序列做岚星傳導
    match &options.override_triggers {
        Some(o) => {
            bonuses.daoyin.triggers = o.daoyin;
            bonuses.fuzhong.triggers = o.fuzhong;
            bonuses.yueguang.triggers = o.yueguang;
        }
        None => propagate_triggers(&sequence.items, &mut bonuses),
    }

    // 惰性護身符：番數為 0 的護身符不可疊乘，實際觸發次數歸零
    for kind in [BonusKind::Daoyin, BonusKind::Fuzhong, BonusKind::Yueguang] {
        let bonus = bonuses.get_mut(kind);
        if bonus.value.is_zero() {
            bonus.triggers = 0;
        }
    }

    let actual_exps = [
        bonuses.daoyin.triggers,
        bonuses.fuzhong.triggers,
        bonuses.yueguang.triggers,
    ];
    let total_multiplier = bonuses.fold_multiplier(final_multiplier.clone(), actual_exps);
    let total_score = base * &total_multiplier;

    let target = &level.target_score;
    let status = if total_score >= target * BigDecimal::from(OVER_TARGET_RATIO) {
        Status::Over5x
    } else if &total_score >= target {
        Status::Ok
    } else {
        Status::Under
    };

    debug!(
        "calculate: final_multiplier={} triggers={:?} status={}",
        final_multiplier,
        actual_exps,
        status.as_str()
    );

    // 理論最大觸發次數：覆寫優先，否則由序列推導
    let mut theoretical = match &options.override_theoretical_maxes {
        Some(o) => TheoreticalMaxes {
            daoyin: o.daoyin,
            fuzhong: o.fuzhong,
            yueguang: o.yueguang,
            king_call: o.king_call.unwrap_or(0),
        },
        None => derive_theoretical_maxes(&sequence.items),
    };

    // 惰性護身符同樣約束理論次數
    if bonuses.daoyin.value.is_zero() {
        theoretical.daoyin = 0;
    }
    if bonuses.fuzhong.value.is_zero() {
        theoretical.fuzhong = 0;
    }
    if bonuses.yueguang.value.is_zero() {
        theoretical.yueguang = 0;
    }

    // 理論起始倍率：只有呼叫方提及王之召喚且關卡有配置時才換用
    // 王之召喚理論值，否則沿用實際最終倍率
    let king_mentioned = matches!(&options.override_theoretical_maxes, Some(o) if o.king_call.is_some());
    let king_configured = level.king_call_base.is_some() && level.king_call_triggers.is_some();
    let theoretical_start = if king_mentioned && king_configured {
        if let Some(m) = &options.theoretical_final_multiplier_override {
            m.clone()
        } else if theoretical.king_call > 0 {
            let base_fan = match &level.king_call_base {
                Some(b) if !b.is_zero() => b.clone(),
                _ => BigDecimal::from(KING_DEFAULT_BASE_FAN),
            };
            geometric_multiplier(&level.king_call_initial, &base_fan, theoretical.king_call)
        } else {
            level.king_call_initial.clone()
        }
    } else {
        final_multiplier.clone()
    };

    let theoretical_exps = [theoretical.daoyin, theoretical.fuzhong, theoretical.yueguang];
    let theoretical_total_multiplier = bonuses.fold_multiplier(theoretical_start, theoretical_exps);
    let theoretical_total_score = base * &theoretical_total_multiplier;

    ScoreOutcome {
        total_score,
        total_multiplier,
        breakdown: bonuses,
        status,
        theoretical_maxes: theoretical,
        theoretical_total_score,
        theoretical_total_multiplier,
    }
}

/// 岚星傳導：每個岚星把其序列值加到右側相應位置項目所標記的護身符上
///
/// 超出序列長度或超出項目陣列範圍的位置不獲得任何加成。
fn propagate_triggers(items: &[SeqItem], bonuses: &mut BonusSet) {
    for i in 0..items.len() {
        if !items[i].lanxing {
            continue;
        }
        let pattern: &[u32] = if items[i].plus {
            &PLUS_PATTERN
        } else {
            &NONPLUS_PATTERN
        };
        for (j, &count) in pattern.iter().enumerate() {
            let Some(target) = items.get(i + 1 + j) else {
                break;
            };
            if let Some(kind) = target.stamp {
                bonuses.get_mut(kind).triggers += count;
            }
        }
    }
}

/// 由序列推導理論最大觸發次數
///
/// 取可傳導的最遠右側步數對應的序列值；完全沒有岚星時為 0。
fn derive_theoretical_maxes(items: &[SeqItem]) -> TheoreticalMaxes {
    let any_plus = items.iter().any(|it| it.lanxing && it.plus);
    let any_lanxing = items.iter().any(|it| it.lanxing);

    let available_right = items.len().saturating_sub(1) as i64;
    let pattern: &[u32] = if any_plus { &PLUS_PATTERN } else { &NONPLUS_PATTERN };
    let idx = (available_right - 1).clamp(0, pattern.len() as i64 - 1) as usize;

    let value = if any_plus {
        PLUS_PATTERN[idx]
    } else if any_lanxing {
        NONPLUS_PATTERN[idx]
    } else {
        0
    };

    TheoreticalMaxes {
        daoyin: value,
        fuzhong: value,
        yueguang: value,
        king_call: 0,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
