//! 核心计算层（Engine）
//!
//! - `summary` - 一次构建前缀和 / 奇偶前缀和
//! - `evaluator` - O(1) 区间查询求值
//!
//! 本层不做 I/O，不持有全局状态，汇总集合以不可变值显式传递

pub mod evaluator;
pub mod summary;

pub use evaluator::evaluate;
pub use summary::{Numeric, SummarySet};
