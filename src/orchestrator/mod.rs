//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一个批次：拉取 → 求值 → 提交)
//!     ↓
//! workflow::batch_runner (构建一次汇总，按顺序求值全部查询)
//!     ↓
//! engine (SummarySet / evaluate，纯计算)
//! ```
//!
//! 远程调用只在本层发生，求值过程从不阻塞在 I/O 上

pub mod batch_processor;

pub use batch_processor::{App, BatchReport};
