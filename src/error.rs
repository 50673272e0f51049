use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 批处理（查询解析 / 求值）错误
    #[error("批处理错误: {0}")]
    Batch(#[from] BatchError),
    /// 远程接口调用错误
    #[error("传输错误: {0}")]
    Transport(#[from] TransportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 单个查询的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// 区间越界或 l > r
    #[error("查询区间 [{l}, {r}] 非法 (序列长度: {len})")]
    InvalidRange { l: i64, r: i64, len: usize },
    /// 查询类型既不是 RangeSum 也不是 AlternatingSum
    #[error("未知的查询类型: {kind}")]
    UnknownQueryKind { kind: String },
}

/// 批处理错误
///
/// 任意一个查询失败都会中止整个批次，不返回部分结果
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error("第 {position} 个查询失败: {source}")]
    Query {
        position: usize,
        #[source]
        source: QueryError,
    },
    /// 并发求值任务异常退出
    #[error("并发计算任务失败: {0}")]
    TaskFailed(String),
}

impl BatchError {
    pub fn at(position: usize, source: QueryError) -> Self {
        BatchError::Query { position, source }
    }

    /// 出错查询的位置（并发任务失败时为 None）
    pub fn position(&self) -> Option<usize> {
        match self {
            BatchError::Query { position, .. } => Some(*position),
            BatchError::TaskFailed(_) => None,
        }
    }
}

/// 远程接口调用错误（不重试，直接交给调用方）
#[derive(Debug, Error)]
pub enum TransportError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体不是预期的 JSON
    #[error("响应解析失败 ({endpoint}): {source}")]
    DecodeFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

impl TransportError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
