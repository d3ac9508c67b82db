//! 链接验证模块
//!
//! Pure checks for a link's `path` and `url`. Every surface (JSON API,
//! portal, CLI) runs these through `LinkService` before touching storage.

use url::Url;

/// path 最大长度
pub const MAX_PATH_LENGTH: usize = 50;

/// 保留路径（与路由前缀及常见静态资源冲突）
pub const RESERVED_PATHS: &[&str] = &["api", "swagger", "go", "favicon.ico", "robots.txt"];

/// 错误所属的表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Path,
    Url,
}

impl LinkField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkField::Path => "path",
            LinkField::Url => "url",
        }
    }
}

/// 链接验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValidationError {
    EmptyPath,
    PathTooLong(usize),
    InvalidPathFormat,
    ReservedPath(String),
    EmptyUrl,
    MalformedUrl(String),
    UnsupportedScheme(String),
    MissingHost,
}

impl LinkValidationError {
    /// 错误对应的字段，portal 用它把错误渲染在对应输入框旁边
    pub fn field(&self) -> LinkField {
        match self {
            Self::EmptyPath
            | Self::PathTooLong(_)
            | Self::InvalidPathFormat
            | Self::ReservedPath(_) => LinkField::Path,
            Self::EmptyUrl
            | Self::MalformedUrl(_)
            | Self::UnsupportedScheme(_)
            | Self::MissingHost => LinkField::Url,
        }
    }
}

impl std::fmt::Display for LinkValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "path is required"),
            Self::PathTooLong(_) => {
                write!(f, "path must be {} characters or less", MAX_PATH_LENGTH)
            }
            Self::InvalidPathFormat => write!(
                f,
                "path can only contain letters, numbers, hyphens, and underscores"
            ),
            Self::ReservedPath(path) => write!(f, "'{}' is a reserved path", path),
            Self::EmptyUrl => write!(f, "url is required"),
            Self::MalformedUrl(_) => write!(f, "invalid url"),
            Self::UnsupportedScheme(_) => write!(f, "unsupported url scheme"),
            Self::MissingHost => write!(f, "url host is required"),
        }
    }
}

impl std::error::Error for LinkValidationError {}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_reserved(path: &str) -> bool {
    let lower = path.to_lowercase();
    RESERVED_PATHS.iter().any(|reserved| *reserved == lower)
}

/// 验证 path，返回去除首尾空白后的值
///
/// 检查顺序：
/// 1. 不为空
/// 2. 不超过 50 个字符
/// 3. 不是保留路径（大小写不敏感）
/// 4. 只包含字母、数字、`-` 和 `_`
pub fn validate_path(raw: &str) -> Result<String, LinkValidationError> {
    let path = raw.trim();

    if path.is_empty() {
        return Err(LinkValidationError::EmptyPath);
    }

    let len = path.chars().count();
    if len > MAX_PATH_LENGTH {
        return Err(LinkValidationError::PathTooLong(len));
    }

    // 保留词先于字符集检查，否则 favicon.ico 会因为 '.' 报格式错误
    if is_reserved(path) {
        return Err(LinkValidationError::ReservedPath(path.to_string()));
    }

    if !path.chars().all(is_path_char) {
        return Err(LinkValidationError::InvalidPathFormat);
    }

    Ok(path.to_string())
}

/// 验证目标 URL，返回去除首尾空白后的原始值（不做规范化）
pub fn validate_url(raw: &str) -> Result<String, LinkValidationError> {
    let url = raw.trim();

    if url.is_empty() {
        return Err(LinkValidationError::EmptyUrl);
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        // http:// 这类空 host 在解析阶段就会失败，需要区分 scheme 问题和 host 问题
        Err(url::ParseError::EmptyHost) => {
            let scheme = url.split(':').next().unwrap_or_default().to_lowercase();
            return Err(if is_supported_scheme(&scheme) {
                LinkValidationError::MissingHost
            } else {
                LinkValidationError::UnsupportedScheme(scheme)
            });
        }
        Err(e) => return Err(LinkValidationError::MalformedUrl(e.to_string())),
    };

    if !is_supported_scheme(parsed.scheme()) {
        return Err(LinkValidationError::UnsupportedScheme(
            parsed.scheme().to_string(),
        ));
    }

    // WHATWG 解析会为 https:///foo、http:example.com、https:\\x 补出 host，
    // 而存储和 Location 用的是原始字符串：scheme: 之后必须紧跟 //
    let after_scheme = url.get(parsed.scheme().len() + 1..).unwrap_or_default();
    if !after_scheme.starts_with("//") {
        return Err(LinkValidationError::MissingHost);
    }

    if url.contains('\\') {
        return Err(LinkValidationError::MalformedUrl(
            "backslash in url".to_string(),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) || after_scheme.starts_with("///") {
        return Err(LinkValidationError::MissingHost);
    }

    Ok(url.to_string())
}

fn is_supported_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// 依次验证 path 和 url，第一个失败即返回
pub fn validate_link(path: &str, url: &str) -> Result<(String, String), LinkValidationError> {
    let path = validate_path(path)?;
    let url = validate_url(url)?;
    Ok((path, url))
}

/// 重定向入口的快速预检：不可能存在的 alias 直接 404，不查库
pub fn is_lookup_candidate(alias: &str) -> bool {
    !alias.is_empty() && alias.len() <= MAX_PATH_LENGTH && alias.chars().all(is_path_char)
}
