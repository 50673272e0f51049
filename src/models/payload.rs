use super::query::RawQuery;
use super::sequence::Sequence;
use serde::{Deserialize, Serialize};

/// 输入接口返回的文档：`{ token, data, query }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPayload {
    /// Bearer 凭证，提交答案时原样带回
    pub token: String,
    #[serde(default)]
    pub data: Sequence,
    #[serde(default)]
    pub query: Vec<RawQuery>,
}
