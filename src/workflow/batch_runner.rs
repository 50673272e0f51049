//! 批处理流程 - 流程层
//!
//! 一个批次 = 一次构建 + 按顺序求值全部查询
//!
//! 输出第 i 项必须对应第 i 个查询，调用方按位置匹配答案，不按查询 ID

use crate::engine::{evaluate, Numeric, SummarySet};
use crate::error::BatchError;
use crate::models::{Answers, Query, RawQuery, Sequence};
use std::sync::Arc;
use tracing::{debug, warn};

/// 在系统边界解析并校验全部原始查询
///
/// # 参数
/// - `raw`: 接口返回的查询列表
/// - `len`: 序列长度
///
/// # 返回
/// 类型和区间在同一遍中校验，报告的是位置最靠前的失败查询，并中止整个批次
pub fn prepare_queries(raw: &[RawQuery], len: usize) -> Result<Vec<Query>, BatchError> {
    raw.iter()
        .enumerate()
        .map(|(position, query)| query.resolve(len).map_err(|e| BatchError::at(position, e)))
        .collect()
}

/// 串行执行一个批次
pub fn run<T: Numeric>(sequence: &[T], queries: &[Query]) -> Result<Vec<T>, BatchError> {
    let summary = SummarySet::build(sequence);
    debug!("汇总集合构建完成，序列长度: {}", summary.len());

    evaluate_all(&summary, queries, 0)
}

/// 按序列的数值表示分派
pub fn run_sequence(sequence: &Sequence, queries: &[Query]) -> Result<Answers, BatchError> {
    match sequence {
        Sequence::Integers(values) => run(values, queries).map(Answers::Integers),
        Sequence::Decimals(values) => run(values, queries).map(Answers::Decimals),
    }
}

/// 分块并发执行一个批次
///
/// 汇总集合只构建一次，通过 `Arc` 只读共享给各个阻塞任务；
/// 结果按块顺序拼回，出错时返回位置最靠前的错误。
/// `chunk_size == 0` 时退化为串行执行，两种方式结果完全相同。
pub async fn run_concurrent<T: Numeric>(
    sequence: &[T],
    queries: &[Query],
    chunk_size: usize,
) -> Result<Vec<T>, BatchError> {
    if chunk_size == 0 || queries.len() <= chunk_size {
        return run(sequence, queries);
    }

    let summary = Arc::new(SummarySet::build(sequence));
    debug!(
        "汇总集合构建完成，序列长度: {}，查询分为 {} 块",
        summary.len(),
        queries.len().div_ceil(chunk_size)
    );

    let mut handles = Vec::new();
    for (chunk_index, chunk) in queries.chunks(chunk_size).enumerate() {
        let summary = Arc::clone(&summary);
        let chunk = chunk.to_vec();
        let offset = chunk_index * chunk_size;

        let handle =
            tokio::task::spawn_blocking(move || evaluate_all(summary.as_ref(), &chunk, offset));
        handles.push(handle);
    }

    let mut answers = Vec::with_capacity(queries.len());
    for handle in handles {
        let chunk_answers = handle
            .await
            .map_err(|e| BatchError::TaskFailed(e.to_string()))??;
        answers.extend(chunk_answers);
    }

    Ok(answers)
}

/// `run_concurrent` 的分派版本
pub async fn run_sequence_concurrent(
    sequence: &Sequence,
    queries: &[Query],
    chunk_size: usize,
) -> Result<Answers, BatchError> {
    match sequence {
        Sequence::Integers(values) => run_concurrent(values, queries, chunk_size)
            .await
            .map(Answers::Integers),
        Sequence::Decimals(values) => run_concurrent(values, queries, chunk_size)
            .await
            .map(Answers::Decimals),
    }
}

fn evaluate_all<T: Numeric>(
    summary: &SummarySet<T>,
    queries: &[Query],
    offset: usize,
) -> Result<Vec<T>, BatchError> {
    queries
        .iter()
        .enumerate()
        .map(|(i, query)| {
            evaluate(query, summary).map_err(|e| {
                warn!("[查询 {}] {} 求值失败: {}", offset + i, query, e);
                BatchError::at(offset + i, e)
            })
        })
        .collect()
}
