//! # 人员业务函数

use super::{Person, PersonRepository};
use crate::error::PersistenceError;
use crate::telemetry::{ServiceTracer, start_span};
use opentelemetry::{Context, KeyValue};
use std::sync::Arc;

/// 位于处理器与持久化网关之间的业务层
#[derive(Clone)]
pub struct PersonService {
    repository: Arc<dyn PersonRepository>,
    tracer: ServiceTracer,
}

impl PersonService {
    /// 创建业务层，`tracer` 用于开启业务 span
    #[must_use]
    pub fn new(repository: Arc<dyn PersonRepository>, tracer: ServiceTracer) -> Self {
        Self { repository, tracer }
    }

    /// 保存人员记录，返回新分配的 id
    pub async fn add_person(&self, cx: &Context, person: &Person) -> Result<i64, PersistenceError> {
        let mut scope = start_span(&self.tracer, cx, "addPerson");

        let result = self
            .repository
            .create_person(scope.context(), &person.name, person.age)
            .await;
        if let Ok(id) = &result {
            scope.set_attribute(KeyValue::new("user.id", *id));
        }
        scope.complete(result)
    }

    /// 读取全部人员记录
    pub async fn get_persons(&self, cx: &Context) -> Result<Vec<Person>, PersistenceError> {
        let mut scope = start_span(&self.tracer, cx, "getPersons");
        let result = self.repository.list_persons(scope.context()).await;
        scope.complete(result)
    }
}
