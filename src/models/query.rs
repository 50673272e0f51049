use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 查询类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    /// 区间和
    RangeSum,
    /// 交错和，区间第一个元素取正号
    AlternatingSum,
}

impl FromStr for QueryKind {
    type Err = QueryError;

    /// 同时接受接口编号（"1" / "2"）和类型名
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "1" | "RangeSum" => Ok(QueryKind::RangeSum),
            "2" | "AlternatingSum" => Ok(QueryKind::AlternatingSum),
            other => Err(QueryError::UnknownQueryKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::RangeSum => write!(f, "RangeSum"),
            QueryKind::AlternatingSum => write!(f, "AlternatingSum"),
        }
    }
}

/// 已解析的查询，闭区间 `[l, r]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    pub l: usize,
    pub r: usize,
}

impl Query {
    pub fn new(kind: QueryKind, l: usize, r: usize) -> Self {
        Self { kind, l, r }
    }

    pub fn range_sum(l: usize, r: usize) -> Self {
        Self::new(QueryKind::RangeSum, l, r)
    }

    pub fn alternating_sum(l: usize, r: usize) -> Self {
        Self::new(QueryKind::AlternatingSum, l, r)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind, self.l, self.r)
    }
}

/// 接口返回的原始查询
///
/// `type` 可能是字符串也可能是数字，所以先保留为 `Value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuery {
    #[serde(rename = "type")]
    pub kind: Value,
    pub range: [i64; 2],
}

impl RawQuery {
    pub fn new(kind: impl Into<Value>, l: i64, r: i64) -> Self {
        Self {
            kind: kind.into(),
            range: [l, r],
        }
    }

    /// 在系统边界把原始查询解析为 `Query`
    ///
    /// # 参数
    /// - `len`: 序列长度
    ///
    /// # 返回
    /// 类型无法识别返回 `UnknownQueryKind`，区间不满足 `0 <= l <= r < len` 返回 `InvalidRange`
    pub fn resolve(&self, len: usize) -> Result<Query, QueryError> {
        let kind = match &self.kind {
            Value::String(tag) => tag.parse::<QueryKind>()?,
            Value::Number(n) => n.to_string().parse::<QueryKind>()?,
            other => {
                return Err(QueryError::UnknownQueryKind {
                    kind: other.to_string(),
                })
            }
        };

        let [l, r] = self.range;
        let invalid = || QueryError::InvalidRange { l, r, len };
        let l = usize::try_from(l).map_err(|_| invalid())?;
        let r = usize::try_from(r).map_err(|_| invalid())?;
        if l > r || r >= len {
            return Err(invalid());
        }

        Ok(Query::new(kind, l, r))
    }
}
