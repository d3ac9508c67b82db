use std::fmt;

use actix_web::http::StatusCode;

use crate::utils::validation::LinkValidationError;

#[derive(Debug, Clone)]
pub enum GoLinksError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(LinkValidationError),
    LinkNotFound(String),
    LinkAlreadyExists(String),
    Serialization(String),
    Template(String),
    Configuration(String),
}

impl GoLinksError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GoLinksError::DatabaseConfig(_) => "E001",
            GoLinksError::DatabaseConnection(_) => "E002",
            GoLinksError::DatabaseOperation(_) => "E003",
            GoLinksError::FileOperation(_) => "E004",
            GoLinksError::Validation(_) => "E005",
            GoLinksError::LinkNotFound(_) => "E006",
            GoLinksError::LinkAlreadyExists(_) => "E007",
            GoLinksError::Serialization(_) => "E008",
            GoLinksError::Template(_) => "E009",
            GoLinksError::Configuration(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GoLinksError::DatabaseConfig(_) => "Database Configuration Error",
            GoLinksError::DatabaseConnection(_) => "Database Connection Error",
            GoLinksError::DatabaseOperation(_) => "Database Operation Error",
            GoLinksError::FileOperation(_) => "File Operation Error",
            GoLinksError::Validation(_) => "Validation Error",
            GoLinksError::LinkNotFound(_) => "Link Not Found",
            GoLinksError::LinkAlreadyExists(_) => "Link Already Exists",
            GoLinksError::Serialization(_) => "Serialization Error",
            GoLinksError::Template(_) => "Template Error",
            GoLinksError::Configuration(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            GoLinksError::Validation(err) => err.to_string(),
            GoLinksError::DatabaseConfig(msg)
            | GoLinksError::DatabaseConnection(msg)
            | GoLinksError::DatabaseOperation(msg)
            | GoLinksError::FileOperation(msg)
            | GoLinksError::LinkNotFound(msg)
            | GoLinksError::LinkAlreadyExists(msg)
            | GoLinksError::Serialization(msg)
            | GoLinksError::Template(msg)
            | GoLinksError::Configuration(msg) => msg.clone(),
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// 只有验证、未找到、冲突三类错误会把 message 暴露给客户端，
    /// 其余一律 500 + 通用消息。
    pub fn http_status(&self) -> StatusCode {
        match self {
            GoLinksError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GoLinksError::LinkNotFound(_) => StatusCode::NOT_FOUND,
            GoLinksError::LinkAlreadyExists(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否属于客户端可见的错误
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于 Server 模式和 CLI）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GoLinksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GoLinksError {}

// 便捷的构造函数
impl GoLinksError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GoLinksError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GoLinksError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GoLinksError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GoLinksError::FileOperation(msg.into())
    }

    pub fn link_not_found<T: Into<String>>(msg: T) -> Self {
        GoLinksError::LinkNotFound(msg.into())
    }

    pub fn link_already_exists<T: Into<String>>(msg: T) -> Self {
        GoLinksError::LinkAlreadyExists(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GoLinksError::Serialization(msg.into())
    }

    pub fn template<T: Into<String>>(msg: T) -> Self {
        GoLinksError::Template(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        GoLinksError::Configuration(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<LinkValidationError> for GoLinksError {
    fn from(err: LinkValidationError) -> Self {
        GoLinksError::Validation(err)
    }
}

impl From<std::io::Error> for GoLinksError {
    fn from(err: std::io::Error) -> Self {
        GoLinksError::FileOperation(err.to_string())
    }
}

impl From<askama::Error> for GoLinksError {
    fn from(err: askama::Error) -> Self {
        GoLinksError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GoLinksError>;
