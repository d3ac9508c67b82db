use std::sync::OnceLock;

use super::StaticConfig;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();
static FALLBACK: OnceLock<StaticConfig> = OnceLock::new();

/// Get the global configuration instance
///
/// 未调用 `init_config` 时返回默认配置（测试和库调用方不需要先初始化）。
pub fn get_config() -> &'static StaticConfig {
    CONFIG
        .get()
        .unwrap_or_else(|| FALLBACK.get_or_init(StaticConfig::default))
}

/// Initialize the global configuration
///
/// 只有第一次调用生效，返回是否成功安装。
pub fn init_config(config: StaticConfig) -> bool {
    CONFIG.set(config).is_ok()
}
