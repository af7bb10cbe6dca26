//! 服務層模組
//!
//! 提供宿主傳輸層所需的兩個邏輯操作（`calc` 與 `predict`）以及對應
//! 的 JSON 請求/回應型別。本層負責把線上格式（可含中文單位記法的
//! 字串或數字）正規化成核心層的十進位輸入。

pub mod calc;
pub mod predict;
pub mod types;

pub use calc::calc;
pub use predict::predict;
pub use types::{
    BonusPayload, BreakdownPayload, CalcOptionsPayload, CalcResponse, FormattedPayload,
    ItemPayload, KingCallPayload, LevelConfig, PredictRequest, PredictResponse, RawNumber,
    SequencePayload, StagePayload, TheoreticalMaxesPayload, TheoreticalPayload, TriggerTriplet,
};
