use crate::error::{AppError, AppResult};
use crate::models::payload::InputPayload;
use std::path::Path;
use tokio::fs;

/// 从本地 JSON 文件加载一个批次的输入（离线重放抓取下来的数据）
pub async fn load_input_payload(json_file_path: &Path) -> AppResult<InputPayload> {
    let content = fs::read_to_string(json_file_path)
        .await
        .map_err(|e| AppError::file_failed(json_file_path.display().to_string(), e))?;

    let payload: InputPayload = serde_json::from_str(&content)?;

    tracing::info!(
        "成功加载 {}: {} 个数据, {} 个查询",
        json_file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy(),
        payload.data.len(),
        payload.query.len()
    );

    Ok(payload)
}

/// 把一个批次的输入保存为 JSON 文件，供之后离线重放
pub async fn save_input_payload(json_file_path: &Path, payload: &InputPayload) -> AppResult<()> {
    let content = serde_json::to_string_pretty(payload)?;

    fs::write(json_file_path, content)
        .await
        .map_err(|e| AppError::file_failed(json_file_path.display().to_string(), e))?;

    Ok(())
}
