//! # Range Query Submit
//!
//! 拉取一个数字序列和一批区间查询，用预先构建的前缀和回答每个查询，并把答案提交回远程接口
//!
//! ## 架构设计
//!
//! ### ① 核心计算层（Engine）
//! - `engine/summary` - 前缀和 / 偶数位前缀和 / 奇数位前缀和，一次构建
//! - `engine/evaluator` - RangeSum / AlternatingSum 的 O(1) 求值
//!
//! ### ② 数据模型（Models）
//! - `Sequence` / `Answers` - 整数与小数两种表示，在边界一次决定
//! - `RawQuery` → `Query` - 接口的 `"1"` / `"2"` 在边界解析为 `QueryKind`
//!
//! ### ③ 流程层（Workflow）
//! - `batch_runner` - 一个批次的构建与求值，保持查询顺序，快速失败
//!
//! ### ④ 接口层（Clients）
//! - `ExchangeClient` - 输入 GET / 答案 POST（Bearer token）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 拉取 → 求值 → 提交

pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ExchangeClient;
pub use config::Config;
pub use engine::{evaluate, SummarySet};
pub use error::{AppError, AppResult, BatchError, QueryError, TransportError};
pub use models::{Answers, InputPayload, Query, QueryKind, RawQuery, Sequence};
pub use orchestrator::{App, BatchReport};
