//! # 人员 HTTP 处理器
//!
//! 入站请求不携带调用方上下文，每个处理器都从空 `Context` 开启根 span。
//! 任何失败都会先记录到 span，再以纯文本错误体返回。

use super::Person;
use crate::error::{Result, ServiceError};
use crate::server::AppState;
use crate::telemetry::{SpanScope, start_span};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use opentelemetry::{Context, KeyValue};
use serde::Serialize;
use tracing::warn;

/// `POST /users`
pub async fn users_post_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let mut scope = start_span(state.tracer(), &Context::new(), "usersPostHandler");
    scope.set_attribute(KeyValue::new("http.request.method", "POST"));
    scope.set_attribute(KeyValue::new("http.route", "/users"));

    let result = create_person(&state, &scope, &body).await;
    respond(&mut scope, result)
}

/// `GET /users`
pub async fn users_get_handler(State(state): State<AppState>) -> Response {
    let mut scope = start_span(state.tracer(), &Context::new(), "usersGetHandler");
    scope.set_attribute(KeyValue::new("http.request.method", "GET"));
    scope.set_attribute(KeyValue::new("http.route", "/users"));

    let result = list_persons(&state, &scope).await;
    respond(&mut scope, result)
}

async fn create_person(state: &AppState, scope: &SpanScope, body: &[u8]) -> Result<Response> {
    let mut person: Person = serde_json::from_slice(body).map_err(ServiceError::Decode)?;

    let id = state.persons().add_person(scope.context(), &person).await?;
    person.id = id;

    json_response(&person)
}

async fn list_persons(state: &AppState, scope: &SpanScope) -> Result<Response> {
    let persons = state.persons().get_persons(scope.context()).await?;

    scope.set_attribute(KeyValue::new(
        "users.count",
        i64::try_from(persons.len()).unwrap_or(i64::MAX),
    ));

    if persons.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    json_response(&persons)
}

fn json_response<T: Serialize>(value: &T) -> Result<Response> {
    let body = serde_json::to_vec(value).map_err(ServiceError::Encode)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// 结束处理器 span 的结果记录，并把错误转换为响应
fn respond(scope: &mut SpanScope, result: Result<Response>) -> Response {
    match scope.complete(result) {
        Ok(response) => response,
        Err(err) => {
            let (status, code) = err.to_http_response_parts();
            warn!(
                component = "persons",
                status = status.as_u16(),
                code,
                error = %err,
                "请求处理失败"
            );
            err.into_response()
        }
    }
}
