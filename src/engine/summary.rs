//! 前缀和汇总 - 核心计算层
//!
//! 一次遍历生成三条辅助序列，之后每个区间查询都是 O(1)

use std::fmt::Debug;
use std::ops::{Add, Neg, Sub};

/// 可参与区间汇总的数值类型
///
/// 整数输入走 `i128`，含小数的输入走 `f64`，两条路径共用同一套实现
pub trait Numeric:
    Copy
    + Default
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
}

impl<T> Numeric for T where
    T: Copy
        + Default
        + PartialEq
        + Debug
        + Add<Output = T>
        + Sub<Output = T>
        + Neg<Output = T>
        + Send
        + Sync
        + 'static
{
}

/// 汇总集合
///
/// 三条序列长度都是 `n + 1`，第 `i` 项表示原序列半开前缀 `[0, i)` 的汇总：
/// - `prefix_sum[i]`：全部元素之和
/// - `even_sum[i]`：偶数下标元素之和
/// - `odd_sum[i]`：奇数下标元素之和
///
/// 构建后不可变，可以在多个线程之间只读共享
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySet<T> {
    prefix_sum: Vec<T>,
    even_sum: Vec<T>,
    odd_sum: Vec<T>,
}

impl<T: Numeric> SummarySet<T> {
    /// 从原始序列构建汇总集合
    ///
    /// 空序列得到只含一个零元素的三条序列
    pub fn build(sequence: &[T]) -> Self {
        let n = sequence.len();
        let mut prefix_sum = Vec::with_capacity(n + 1);
        let mut even_sum = Vec::with_capacity(n + 1);
        let mut odd_sum = Vec::with_capacity(n + 1);

        let mut total = T::default();
        let mut even = T::default();
        let mut odd = T::default();
        prefix_sum.push(total);
        even_sum.push(even);
        odd_sum.push(odd);

        for (i, &value) in sequence.iter().enumerate() {
            total = total + value;
            if i % 2 == 0 {
                even = even + value;
            } else {
                odd = odd + value;
            }
            prefix_sum.push(total);
            even_sum.push(even);
            odd_sum.push(odd);
        }

        Self {
            prefix_sum,
            even_sum,
            odd_sum,
        }
    }

    /// 原序列长度 n
    pub fn len(&self) -> usize {
        self.prefix_sum.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prefix_sum(&self) -> &[T] {
        &self.prefix_sum
    }

    pub fn even_sum(&self) -> &[T] {
        &self.even_sum
    }

    pub fn odd_sum(&self) -> &[T] {
        &self.odd_sum
    }
}
