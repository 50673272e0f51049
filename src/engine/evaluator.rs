//! 区间查询求值 - 核心计算层
//!
//! 只读访问 `SummarySet`，每次查询 O(1)，无共享状态

use crate::engine::summary::{Numeric, SummarySet};
use crate::error::QueryError;
use crate::models::{Query, QueryKind};

/// 对单个查询求值
///
/// # 参数
/// - `query`: 已在边界解析完成的查询
/// - `summary`: 本批次唯一的汇总集合
///
/// # 返回
/// 区间 `[l, r]` 不满足 `l <= r < n` 时返回 `InvalidRange`，不做任何截断
pub fn evaluate<T: Numeric>(query: &Query, summary: &SummarySet<T>) -> Result<T, QueryError> {
    let (l, r) = (query.l, query.r);

    if l > r || r >= summary.len() {
        return Err(QueryError::InvalidRange {
            l: to_signed(l),
            r: to_signed(r),
            len: summary.len(),
        });
    }

    let answer = match query.kind {
        QueryKind::RangeSum => range_sum(summary, l, r),
        QueryKind::AlternatingSum => alternating_sum(summary, l, r),
    };

    Ok(answer)
}

/// `Sequence[l] + ... + Sequence[r]`
fn range_sum<T: Numeric>(summary: &SummarySet<T>, l: usize, r: usize) -> T {
    let prefix = summary.prefix_sum();
    prefix[r + 1] - prefix[l]
}

/// `Sequence[l] - Sequence[l+1] + Sequence[l+2] - ...`
///
/// 汇总序列按绝对下标的奇偶分组，得到的是“偶数位减奇数位”。
/// 区间起点 `l` 落在奇数位时，区间内的正负号与绝对奇偶性正好相反，需要整体取反。
fn alternating_sum<T: Numeric>(summary: &SummarySet<T>, l: usize, r: usize) -> T {
    let even = summary.even_sum();
    let odd = summary.odd_sum();
    let raw_diff = (even[r + 1] - even[l]) - (odd[r + 1] - odd[l]);

    if starts_at_odd_index(l) {
        -raw_diff
    } else {
        raw_diff
    }
}

fn starts_at_odd_index(l: usize) -> bool {
    l % 2 == 1
}

fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i64; 5] = [1, 2, 3, 4, 5];

    fn direct_range_sum(data: &[i64], l: usize, r: usize) -> i64 {
        data[l..=r].iter().sum()
    }

    fn direct_alternating_sum(data: &[i64], l: usize, r: usize) -> i64 {
        data[l..=r]
            .iter()
            .enumerate()
            .map(|(offset, &v)| if offset % 2 == 0 { v } else { -v })
            .sum()
    }

    #[test]
    fn test_range_sum_sample() {
        let summary = SummarySet::build(&SAMPLE);

        assert_eq!(evaluate(&Query::range_sum(0, 4), &summary), Ok(15));
        assert_eq!(evaluate(&Query::range_sum(1, 3), &summary), Ok(9));
    }

    #[test]
    fn test_alternating_sum_from_even_start() {
        let summary = SummarySet::build(&SAMPLE);

        assert_eq!(evaluate(&Query::alternating_sum(0, 4), &summary), Ok(3));
    }

    #[test]
    fn test_alternating_sum_from_odd_start_flips_sign() {
        let summary = SummarySet::build(&SAMPLE);

        // 偶数位减奇数位: 3 - (2 + 4) = -3，起点为奇数位，取反后为 2 - 3 + 4 = 3
        assert_eq!(evaluate(&Query::alternating_sum(1, 3), &summary), Ok(3));
        assert_eq!(evaluate(&Query::alternating_sum(1, 2), &summary), Ok(-1));
    }

    #[test]
    fn test_single_element_range() {
        let summary = SummarySet::build(&[7i64]);

        assert_eq!(evaluate(&Query::range_sum(0, 0), &summary), Ok(7));
        assert_eq!(evaluate(&Query::alternating_sum(0, 0), &summary), Ok(7));
    }

    #[test]
    fn test_empty_sequence_rejects_any_query() {
        let summary = SummarySet::<i64>::build(&[]);

        assert_eq!(
            evaluate(&Query::range_sum(0, 0), &summary),
            Err(QueryError::InvalidRange { l: 0, r: 0, len: 0 })
        );
        assert!(evaluate(&Query::alternating_sum(0, 0), &summary).is_err());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let summary = SummarySet::build(&SAMPLE);

        assert_eq!(
            evaluate(&Query::range_sum(3, 1), &summary),
            Err(QueryError::InvalidRange { l: 3, r: 1, len: 5 })
        );
    }

    #[test]
    fn test_range_past_end_is_rejected() {
        let summary = SummarySet::build(&SAMPLE);

        assert!(evaluate(&Query::alternating_sum(2, 5), &summary).is_err());
        assert!(evaluate(&Query::range_sum(5, 5), &summary).is_err());
    }

    #[test]
    fn test_every_range_matches_direct_computation() {
        let data = [4i64, -3, 8, 0, 11, -6, 2, 9, -1];
        let summary = SummarySet::build(&data);

        for l in 0..data.len() {
            for r in l..data.len() {
                assert_eq!(
                    evaluate(&Query::range_sum(l, r), &summary),
                    Ok(direct_range_sum(&data, l, r)),
                    "RangeSum({}, {})",
                    l,
                    r
                );
                assert_eq!(
                    evaluate(&Query::alternating_sum(l, r), &summary),
                    Ok(direct_alternating_sum(&data, l, r)),
                    "AlternatingSum({}, {})",
                    l,
                    r
                );
            }
        }
    }

    #[test]
    fn test_decimal_alternating_sum() {
        let summary = SummarySet::build(&[1.5f64, 0.25, 2.0, 0.75]);

        // 0.25 - 2.0 + 0.75
        assert_eq!(evaluate(&Query::alternating_sum(1, 3), &summary), Ok(-1.0));
        assert_eq!(evaluate(&Query::range_sum(0, 3), &summary), Ok(4.5));
    }
}
