//! # 持久化网关
//!
//! 唯一持有数据库连接的组件。每次调用只执行一条参数化语句，
//! 不缓存、不重试，失败立即返回。

use super::Person;
use crate::error::PersistenceError;
use crate::telemetry::{ServiceTracer, SpanScope, start_span};
use async_trait::async_trait;
use entity::{Persons, persons};
use opentelemetry::{Context, KeyValue};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::debug;

/// 人员记录的数据访问接口
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// 插入一条记录，返回新分配的 id
    async fn create_person(
        &self,
        cx: &Context,
        name: &str,
        age: i64,
    ) -> Result<i64, PersistenceError>;

    /// 按插入顺序返回全部记录；没有记录时返回空列表
    async fn list_persons(&self, cx: &Context) -> Result<Vec<Person>, PersistenceError>;
}

/// 基于 Sea-ORM 的持久化网关
#[derive(Clone)]
pub struct PersonStore {
    db: Arc<DatabaseConnection>,
    tracer: ServiceTracer,
}

impl PersonStore {
    /// 创建持久化网关，`db` 需已完成建表迁移
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, tracer: ServiceTracer) -> Self {
        Self { db, tracer }
    }

    fn start_db_span(
        &self,
        cx: &Context,
        name: &'static str,
        operation: &'static str,
    ) -> SpanScope {
        let scope = start_span(&self.tracer, cx, name);
        scope.set_attribute(KeyValue::new("db.system", "sqlite"));
        scope.set_attribute(KeyValue::new("db.operation", operation));
        scope.set_attribute(KeyValue::new("db.sql.table", "persons"));
        scope
    }
}

#[async_trait]
impl PersonRepository for PersonStore {
    async fn create_person(
        &self,
        cx: &Context,
        name: &str,
        age: i64,
    ) -> Result<i64, PersistenceError> {
        let mut scope = self.start_db_span(cx, "createPerson", "INSERT");

        let row = persons::ActiveModel {
            name: Set(name.to_owned()),
            age: Set(age),
            ..Default::default()
        };
        let result = Persons::insert(row)
            .exec(self.db.as_ref())
            .await
            .map(|inserted| inserted.last_insert_id)
            .map_err(PersistenceError::Insert);

        if let Ok(id) = &result {
            debug!(component = "persons", id, "person inserted");
        }
        scope.complete(result)
    }

    async fn list_persons(&self, cx: &Context) -> Result<Vec<Person>, PersistenceError> {
        let mut scope = self.start_db_span(cx, "listPersons", "SELECT");

        let result = Persons::find()
            .order_by_asc(persons::Column::Id)
            .all(self.db.as_ref())
            .await
            .map(|rows| rows.into_iter().map(Person::from).collect::<Vec<_>>())
            .map_err(PersistenceError::Query);

        if let Ok(persons) = &result {
            scope.set_attribute(KeyValue::new(
                "db.rows_returned",
                i64::try_from(persons.len()).unwrap_or(i64::MAX),
            ));
        }
        scope.complete(result)
    }
}
