use serde::{Deserialize, Serialize};

use crate::errors::{GoLinksError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀（GOLINKS__SERVER__PORT=8080）
pub const ENV_PREFIX: &str = "GOLINKS";

/// 静态配置（启动时加载，运行期间不变）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - database: SQLite 数据库文件
/// - logging: 日志配置
/// - routes: portal 路由前缀
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

/// 命令行覆盖项（优先级最高）
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<String>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub db_path: Option<String>,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：GOLINKS，分隔符：__
    /// 示例：GOLINKS__SERVER__PORT=9999
    ///
    /// 显式给出的配置文件必须存在；默认的 config.toml 可以缺失。
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match config_path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            // 1. 从 TOML 文件加载
            .add_source(File::with_name(path).required(required))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GoLinksError::configuration(format!("Failed to build config: {}", e)))?;

        let config = settings.try_deserialize::<StaticConfig>().map_err(|e| {
            GoLinksError::configuration(format!("Failed to deserialize config: {}", e))
        })?;

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// 完整加载流程：文件 → GOLINKS__ 环境变量 → PORT/HOST/DB_PATH → 命令行
    pub fn load_with_overrides(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::load(overrides.config_path.as_deref())?;
        config.apply_legacy_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// 兼容旧部署的环境变量：PORT、HOST、DB_PATH
    ///
    /// 空值视为未设置。
    pub fn apply_legacy_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty("PORT") {
            self.server.port = parse_port(&port)?;
        }
        if let Some(host) = non_empty("HOST") {
            self.server.host = host;
        }
        if let Some(db_path) = non_empty("DB_PATH") {
            self.database.path = db_path;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(ref host) = overrides.host {
            self.server.host = host.clone();
        }
        if let Some(ref db_path) = overrides.db_path {
            self.database.path = db_path.clone();
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GoLinksError::configuration(
                "invalid port 0: must be between 1 and 65535",
            ));
        }

        if self.database.path.trim().is_empty() {
            return Err(GoLinksError::configuration("database path cannot be empty"));
        }

        let prefix = &self.routes.portal_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(GoLinksError::configuration(format!(
                "invalid portal prefix '{}': must look like /go",
                prefix
            )));
        }
        if prefix == "/api" {
            return Err(GoLinksError::configuration(
                "portal prefix cannot be /api (reserved for the JSON API)",
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(GoLinksError::configuration(format!(
                "invalid log format '{}': expected text or json",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// 监听地址，空 host 绑定所有网卡
    pub fn address(&self) -> String {
        let host = self.server.host.trim();
        let host = if host.is_empty() { "0.0.0.0" } else { host };

        // IPv6 字面量需要方括号
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.server.port)
        } else {
            format!("{}:{}", host, self.server.port)
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GoLinksError::serialization(format!("TOML 序列化失败: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim().parse::<u16>().map_err(|_| {
        GoLinksError::configuration(format!(
            "invalid port '{}': must be a number between 1 and 65535",
            raw
        ))
    })
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// actix worker 数量，未设置时由 actix 按 CPU 核数决定
    #[serde(default)]
    pub workers: Option<usize>,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 路由配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_portal_prefix")]
    pub portal_prefix: String,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "./links.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_portal_prefix() -> String {
    "/go".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_server_port(),
            workers: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            portal_prefix: default_portal_prefix(),
        }
    }
}
