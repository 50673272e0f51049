//! 批次处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一个批次从拉取到提交的完整生命周期。
//!
//! ## 核心流程
//!
//! 1. **应用初始化**：写日志文件头、创建接口客户端
//! 2. **拉取输入**：恰好一次 GET（或读取本地输入文件）
//! 3. **解析查询**：在边界把 `"1"` / `"2"` 解析为 `QueryKind`
//! 4. **批量求值**：委托 `workflow::batch_runner`，串行或分块并发
//! 5. **提交答案**：恰好一次 POST（dry run 时跳过）
//!
//! 任意一步失败都会中止批次，不提交部分结果

use crate::clients::ExchangeClient;
use crate::config::Config;
use crate::models::{load_input_payload, save_input_payload, Answers, InputPayload};
use crate::utils::logging::{
    append_log, init_log_file, log_payload_loaded, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::{prepare_queries, run_sequence, run_sequence_concurrent};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// 一个批次的处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// 序列长度
    pub data_len: usize,
    /// 查询数量
    pub query_count: usize,
    /// 与查询顺序一致的答案
    pub answers: Answers,
    /// 输出接口的确认（dry run 时为 None）
    pub acknowledgement: Option<Value>,
}

/// 应用主结构
pub struct App {
    config: Config,
    client: ExchangeClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        let source = config.input_file.as_deref().unwrap_or(&config.input_url);
        log_startup(source, config.parallel_chunk_size);

        let client = ExchangeClient::new(&config).context("创建接口客户端失败")?;

        Ok(Self { config, client })
    }

    /// 运行一个批次
    pub async fn run(&self) -> Result<BatchReport> {
        match self.run_batch().await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("❌ 批次处理失败: {:#}", e);
                if let Err(log_err) =
                    append_log(&self.config.output_log_file, &format!("失败: {:#}", e))
                {
                    warn!("写入日志文件失败: {}", log_err);
                }
                Err(e)
            }
        }
    }

    async fn run_batch(&self) -> Result<BatchReport> {
        let payload = self.load_payload().await?;

        let data_preview = serde_json::to_string(&payload.data)?;
        log_payload_loaded(
            payload.data.len(),
            payload.query.len(),
            &truncate_text(&data_preview, 120),
        );

        let queries =
            prepare_queries(&payload.query, payload.data.len()).context("查询解析失败")?;

        let answers = if self.config.parallel_chunk_size > 0 {
            run_sequence_concurrent(&payload.data, &queries, self.config.parallel_chunk_size)
                .await
        } else {
            run_sequence(&payload.data, &queries)
        }
        .context("查询求值失败")?;

        let answers_json = serde_json::to_string(&answers)?;
        info!("✓ 求值完成: {}", truncate_text(&answers_json, 120));
        append_log(
            &self.config.output_log_file,
            &format!("答案 ({} 个): {}", answers.len(), answers_json),
        )?;

        let acknowledgement = if self.config.dry_run {
            warn!("⚠️ dry run 模式，跳过提交");
            None
        } else {
            let ack = self
                .client
                .submit_answers(&payload.token, &answers)
                .await
                .context("提交答案失败")?;
            info!("📤 提交成功，接口响应: {}", ack);
            append_log(&self.config.output_log_file, &format!("接口响应: {}", ack))?;
            Some(ack)
        };

        print_final_stats(
            answers.len(),
            acknowledgement.is_some(),
            &self.config.output_log_file,
        );

        Ok(BatchReport {
            data_len: payload.data.len(),
            query_count: queries.len(),
            answers,
            acknowledgement,
        })
    }

    /// 拉取输入：优先本地文件，否则请求输入接口
    async fn load_payload(&self) -> Result<InputPayload> {
        if let Some(path) = &self.config.input_file {
            info!("\n📁 正在读取本地输入: {}", path);
            return load_input_payload(Path::new(path))
                .await
                .with_context(|| format!("无法加载输入文件: {}", path));
        }

        info!("\n🌐 正在拉取输入: {}", self.config.input_url);
        let payload = self.client.fetch_input().await.context("拉取输入失败")?;
        info!("🔑 已获取 token (长度: {})", payload.token.len());

        if let Some(path) = &self.config.save_input_file {
            save_input_payload(Path::new(path), &payload)
                .await
                .with_context(|| format!("无法保存输入文件: {}", path))?;
            info!("💾 输入已保存至: {}", path);
        }

        Ok(payload)
    }
}
