//! # 人员领域模型

use entity::persons;
use serde::{Deserialize, Serialize};

/// 人员记录
///
/// `id` 由数据库在插入成功后分配；请求体中的 `id` 会被忽略。
/// 请求体缺少的字段取零值（空字符串、0）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl From<persons::Model> for Person {
    fn from(model: persons::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
        }
    }
}
