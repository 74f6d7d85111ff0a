//! # 实体定义测试

use crate::persons;
use sea_orm::{ActiveValue, EntityName, Iterable, Set};

#[tokio::test]
async fn test_person_active_model_creation() {
    let person = persons::ActiveModel {
        name: Set("Alice".to_string()),
        age: Set(30),
        ..Default::default()
    };

    assert_eq!(person.name.as_ref(), "Alice");
    assert_eq!(person.age.as_ref(), &30);
    // id 由数据库分配
    assert!(matches!(person.id, ActiveValue::NotSet));
}

#[test]
fn test_person_table_layout() {
    assert_eq!(persons::Entity.table_name(), "persons");

    let columns: Vec<String> = persons::Column::iter()
        .map(|column| format!("{column:?}"))
        .collect();
    assert_eq!(columns, vec!["Id", "Name", "Age"]);
}
