use serde::{Deserialize, Serialize};

/// 一条 go link：`path` 是别名，`url` 是跳转目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub path: String,
    pub url: String,
}
