//! 输入 / 输出接口客户端
//!
//! 封装批次前后的两次远程调用：拉取输入、提交答案
use crate::config::Config;
use crate::error::TransportError;
use crate::models::{Answers, InputPayload};
use crate::utils::logging::truncate_text;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 输入 / 输出接口客户端
///
/// 不做任何重试，失败直接交给调用方
pub struct ExchangeClient {
    http: Client,
    input_url: String,
    output_url: String,
}

impl ExchangeClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::request_failed(&config.input_url, e))?;

        Ok(Self {
            http,
            input_url: config.input_url.clone(),
            output_url: config.output_url.clone(),
        })
    }

    /// 拉取一个批次的输入
    ///
    /// # 返回
    /// 返回 `{ token, data, query }` 文档
    pub async fn fetch_input(&self) -> Result<InputPayload, TransportError> {
        debug!("GET {}", self.input_url);

        let response = self
            .http
            .get(&self.input_url)
            .send()
            .await
            .map_err(|e| TransportError::request_failed(&self.input_url, e))?;

        read_json(&self.input_url, response).await
    }

    /// 提交答案
    ///
    /// # 参数
    /// - `token`: 拉取输入时拿到的凭证，放入 `Authorization: Bearer` 头
    /// - `answers`: 与查询顺序一致的答案数组
    ///
    /// # 返回
    /// 返回接口的确认 JSON
    pub async fn submit_answers(
        &self,
        token: &str,
        answers: &Answers,
    ) -> Result<Value, TransportError> {
        debug!("POST {} ({} 个答案)", self.output_url, answers.len());

        let response = self
            .http
            .post(&self.output_url)
            .bearer_auth(token)
            .json(answers)
            .send()
            .await
            .map_err(|e| TransportError::request_failed(&self.output_url, e))?;

        let ack: Value = read_json(&self.output_url, response).await?;
        debug!("确认: {}", truncate_text(&ack.to_string(), 200));
        Ok(ack)
    }
}

/// 检查状态码并解析响应体
async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::request_failed(endpoint, e))?;

    if !status.is_success() {
        return Err(TransportError::BadStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    // 输入响应里带 token，只记录长度
    debug!("{} 响应: {} ({} 字节)", endpoint, status, body.len());

    serde_json::from_str(&body).map_err(|source| TransportError::DecodeFailed {
        endpoint: endpoint.to_string(),
        source,
    })
}
