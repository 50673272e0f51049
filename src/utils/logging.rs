//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数
use crate::error::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n区间查询批处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::file_failed(log_file_path, e))?;
    Ok(())
}

/// 向日志文件追加一条带时间戳的记录
pub fn append_log(log_file_path: &str, message: &str) -> AppResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| AppError::file_failed(log_file_path, e))?;

    let line = format!(
        "[{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    );
    file.write_all(line.as_bytes())
        .map_err(|e| AppError::file_failed(log_file_path, e))?;

    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 输入来源（URL 或本地文件）
/// - `parallel_chunk_size`: 并发分块大小，0 为串行
pub fn log_startup(source: &str, parallel_chunk_size: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 区间查询批处理");
    info!("📥 输入来源: {}", source);
    if parallel_chunk_size > 0 {
        info!("📊 并发求值，每块 {} 个查询", parallel_chunk_size);
    } else {
        info!("📊 串行求值");
    }
    info!("{}", "=".repeat(60));
}

/// 记录输入加载信息
pub fn log_payload_loaded(data_len: usize, query_len: usize, data_preview: &str) {
    info!("✓ 收到 {} 个数据, {} 个查询", data_len, query_len);
    info!("📋 数据: {}", data_preview);
}

/// 打印最终统计信息
///
/// # 参数
/// - `answered`: 已求值的查询数
/// - `submitted`: 是否已提交
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(answered: usize, submitted: bool, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 批次完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已求值: {}", answered);
    if submitted {
        info!("📤 答案已提交");
    } else {
        info!("⏸️ 未提交 (dry run)");
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
