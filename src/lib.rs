//! 大數計分引擎
//!
//! 番數連乘計分計算器的計算核心：
//! - 任意精度十進位運算（倍率連乘與整數次冪精確無捨入）
//! - 中文大數單位記法（万/亿/兆/…/极，含「极」疊加後綴）的雙向轉換
//! - 多關卡目標階梯的可達性預測
//!
//! 三個組件都是純同步計算，不持有跨請求狀態，可被宿主服務並行
//! 呼叫。HTTP 傳輸、路由與持久化由宿主負責，本 crate 只暴露
//! `service::calc` 與 `service::predict` 兩個邏輯操作。

pub mod game;
pub mod service;

pub use game::{calculate, format_china_ji, parse_china_ji};
pub use service::{calc, predict};
