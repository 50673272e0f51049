use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "RANGE_QUERY_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 输入接口（GET）
    pub input_url: String,
    /// 输出接口（POST）
    pub output_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 本地输入文件，设置后不再请求输入接口
    pub input_file: Option<String>,
    /// 把拉取到的输入另存一份，便于离线重放
    pub save_input_file: Option<String>,
    /// 只计算不提交
    pub dry_run: bool,
    /// 并发求值的分块大小，0 表示串行
    pub parallel_chunk_size: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_url: "https://test-share.shub.edu.vn/api/intern-test/input".to_string(),
            output_url: "https://test-share.shub.edu.vn/api/intern-test/output".to_string(),
            request_timeout_secs: 30,
            input_file: None,
            save_input_file: None,
            dry_run: false,
            parallel_chunk_size: 0,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

/// TOML 配置文件的结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    input_url: Option<String>,
    output_url: Option<String>,
    request_timeout_secs: Option<u64>,
    input_file: Option<String>,
    save_input_file: Option<String>,
    dry_run: Option<bool>,
    parallel_chunk_size: Option<usize>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    /// 默认值 → TOML 文件（`RANGE_QUERY_CONFIG`）→ 环境变量，后者覆盖前者
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };

        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        let default = Self::default();

        Ok(Self {
            input_url: file.input_url.unwrap_or(default.input_url),
            output_url: file.output_url.unwrap_or(default.output_url),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(default.request_timeout_secs),
            input_file: file.input_file.or(default.input_file),
            save_input_file: file.save_input_file.or(default.save_input_file),
            dry_run: file.dry_run.unwrap_or(default.dry_run),
            parallel_chunk_size: file
                .parallel_chunk_size
                .unwrap_or(default.parallel_chunk_size),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            output_log_file: file.output_log_file.unwrap_or(default.output_log_file),
        })
    }

    /// 用环境变量覆盖当前配置
    ///
    /// # 参数
    /// - `lookup`: 按变量名取值，测试时可以传入固定表
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            input_url: lookup("INPUT_URL").unwrap_or(self.input_url),
            output_url: lookup("OUTPUT_URL").unwrap_or(self.output_url),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            input_file: lookup("INPUT_FILE").or(self.input_file),
            save_input_file: lookup("SAVE_INPUT_FILE").or(self.save_input_file),
            dry_run: parse_var(&lookup, "DRY_RUN", "bool")?.unwrap_or(self.dry_run),
            parallel_chunk_size: parse_var(&lookup, "PARALLEL_CHUNK_SIZE", "usize")?
                .unwrap_or(self.parallel_chunk_size),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        })
    }
}

fn parse_var<T, F>(
    lookup: &F,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_toml_overrides_some_fields() {
        let config = Config::from_toml_str(
            r#"
            input_file = "batch.json"
            dry_run = true
            parallel_chunk_size = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.input_file.as_deref(), Some("batch.json"));
        assert!(config.dry_run);
        assert_eq!(config.parallel_chunk_size, 64);
        assert_eq!(config.output_url, Config::default().output_url);
    }

    #[test]
    fn test_toml_wrong_type_fails() {
        assert!(Config::from_toml_str("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let base = Config::from_toml_str("dry_run = true\nrequest_timeout_secs = 5").unwrap();
        let config = base
            .with_overrides(lookup_from(&[
                ("DRY_RUN", "false"),
                ("OUTPUT_URL", "http://127.0.0.1:9/out"),
            ]))
            .unwrap();

        assert!(!config.dry_run);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.output_url, "http://127.0.0.1:9/out");
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("PARALLEL_CHUNK_SIZE", "many")]))
            .unwrap_err();

        match err {
            ConfigError::EnvVarParseFailed {
                var_name, value, ..
            } => {
                assert_eq!(var_name, "PARALLEL_CHUNK_SIZE");
                assert_eq!(value, "many");
            }
            other => panic!("意外的错误: {}", other),
        }
    }

    #[test]
    fn test_missing_toml_file() {
        let err = Config::from_toml_file("/nonexistent/range_query.toml").unwrap_err();

        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
