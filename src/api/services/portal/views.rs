//! Portal 模板与视图模型

use askama::Template;

use crate::errors::GoLinksError;
use crate::services::LinkInput;
use crate::storage::Link;
use crate::utils::validation::LinkField;

/// 创建/编辑表单的视图模型
#[derive(Debug, Clone)]
pub struct LinkFormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    /// 无 JS 时的表单提交地址（POST）
    pub action: String,
    /// htmx 提交方式（post / put）
    pub hx_method: &'static str,
    pub hx_action: String,
    pub path: String,
    pub url: String,
    pub path_error: Option<String>,
    pub url_error: Option<String>,
    pub general_error: Option<String>,
    pub editing: bool,
}

impl LinkFormView {
    pub fn create(prefix: &str) -> Self {
        Self {
            title: "New link",
            submit_label: "Create",
            action: format!("{}/links", prefix),
            hx_method: "post",
            hx_action: format!("{}/fragments/links", prefix),
            path: String::new(),
            url: String::new(),
            path_error: None,
            url_error: None,
            general_error: None,
            editing: false,
        }
    }

    pub fn edit(prefix: &str, id: i64) -> Self {
        Self {
            title: "Edit link",
            submit_label: "Save",
            action: format!("{}/links/{}/update", prefix, id),
            hx_method: "put",
            hx_action: format!("{}/fragments/links/{}", prefix, id),
            editing: true,
            ..Self::create(prefix)
        }
    }

    pub fn for_link(prefix: &str, link: &Link) -> Self {
        Self {
            path: link.path.clone(),
            url: link.url.clone(),
            ..Self::edit(prefix, link.id)
        }
    }

    /// 回填用户提交的原始值
    pub fn with_values(mut self, input: &LinkInput) -> Self {
        self.path = input.path.clone();
        self.url = input.url.clone();
        self
    }

    /// 把错误放到对应字段旁边：验证错误按字段，重复 path 归到 path 字段
    pub fn with_error(mut self, err: &GoLinksError) -> Self {
        match err {
            GoLinksError::Validation(v) => match v.field() {
                LinkField::Path => self.path_error = Some(v.to_string()),
                LinkField::Url => self.url_error = Some(v.to_string()),
            },
            GoLinksError::LinkAlreadyExists(msg) => self.path_error = Some(msg.clone()),
            other => self.general_error = Some(other.message()),
        }
        self
    }
}

/// 完整页面
#[derive(Template)]
#[template(path = "portal/index.html")]
pub struct PortalPage {
    pub prefix: String,
    pub links: Vec<Link>,
    pub search: String,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub form: LinkFormView,
}

/// 表格行片段（htmx）
#[derive(Template)]
#[template(path = "portal/rows_fragment.html")]
pub struct RowsFragment {
    pub prefix: String,
    pub links: Vec<Link>,
}

/// 表单片段（htmx）
#[derive(Template)]
#[template(path = "portal/form_fragment.html")]
pub struct FormFragment {
    pub prefix: String,
    pub form: LinkFormView,
}
