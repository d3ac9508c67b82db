use crate::storage::Link;
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        path: model.path,
        url: model.url,
    }
}

/// 构造用于插入/更新的 ActiveModel（id 由数据库分配，不参与写入）
pub fn new_link_active_model(path: &str, url: &str) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        path: Set(path.to_string()),
        url: Set(url.to_string()),
    }
}
