use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// 输入序列
///
/// 反序列化时一次性决定数值表示：全部是整数时走整数路径，否则走小数路径。
/// 整数按 `i128` 累加，任何 `i64` / `u64` 输入的前缀和都不会溢出。
#[derive(Debug, Clone, PartialEq)]
pub enum Sequence {
    Integers(Vec<i128>),
    Decimals(Vec<f64>),
}

impl Sequence {
    pub fn len(&self) -> usize {
        match self {
            Sequence::Integers(values) => values.len(),
            Sequence::Decimals(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 从 JSON 数字列表构建
    pub fn from_numbers(numbers: &[Number]) -> Option<Self> {
        let integers: Option<Vec<i128>> = numbers.iter().map(as_integer).collect();
        if let Some(values) = integers {
            return Some(Sequence::Integers(values));
        }

        numbers
            .iter()
            .map(Number::as_f64)
            .collect::<Option<Vec<f64>>>()
            .map(Sequence::Decimals)
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::Integers(Vec::new())
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let numbers = Vec::<Number>::deserialize(deserializer)?;
        Sequence::from_numbers(&numbers).ok_or_else(|| D::Error::custom("序列中包含无法表示的数值"))
    }
}

impl Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Sequence::Integers(values) => values.serialize(serializer),
            Sequence::Decimals(values) => values.serialize(serializer),
        }
    }
}

/// 一个批次的答案，与查询列表按位置一一对应
///
/// 序列化为纯数字数组，即 POST 的请求体。
/// 小数答案恰好是整数时按整数输出（`4` 而不是 `4.0`）
#[derive(Debug, Clone, PartialEq)]
pub enum Answers {
    Integers(Vec<i128>),
    Decimals(Vec<f64>),
}

/// 能被 f64 精确表示的最大整数
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

struct PlainNumber(f64);

impl Serialize for PlainNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl Serialize for Answers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Answers::Integers(values) => values.serialize(serializer),
            Answers::Decimals(values) => {
                serializer.collect_seq(values.iter().copied().map(PlainNumber))
            }
        }
    }
}

impl Answers {
    pub fn len(&self) -> usize {
        match self {
            Answers::Integers(values) => values.len(),
            Answers::Decimals(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_input_stays_integer() {
        let seq: Sequence = serde_json::from_value(json!([1, -2, 3])).unwrap();
        assert_eq!(seq, Sequence::Integers(vec![1, -2, 3]));
    }

    #[test]
    fn test_any_fraction_switches_to_decimals() {
        let seq: Sequence = serde_json::from_value(json!([1, 2.5, 3])).unwrap();
        assert_eq!(seq, Sequence::Decimals(vec![1.0, 2.5, 3.0]));
    }

    #[test]
    fn test_empty_input() {
        let seq: Sequence = serde_json::from_value(json!([])).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq, Sequence::default());
    }

    #[test]
    fn test_non_numeric_input_fails() {
        assert!(serde_json::from_value::<Sequence>(json!([1, "2"])).is_err());
    }

    #[test]
    fn test_integers_beyond_i64_stay_integer() {
        let seq: Sequence =
            serde_json::from_str("[9000000000000000000, 18000000000000000000]").unwrap();
        assert_eq!(
            seq,
            Sequence::Integers(vec![9_000_000_000_000_000_000, 18_000_000_000_000_000_000])
        );
    }

    #[test]
    fn test_whole_decimal_answers_serialize_without_fraction() {
        let answers = Answers::Decimals(vec![4.0, -1.0, 0.5]);
        assert_eq!(serde_json::to_string(&answers).unwrap(), "[4,-1,0.5]");
    }

    #[test]
    fn test_answers_serialize_as_plain_array() {
        let ints = Answers::Integers(vec![15, 9, 3]);
        assert_eq!(serde_json::to_string(&ints).unwrap(), "[15,9,3]");

        let decimals = Answers::Decimals(vec![0.5, -1.25]);
        assert_eq!(serde_json::to_string(&decimals).unwrap(), "[0.5,-1.25]");
    }
}
