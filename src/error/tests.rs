//! # 错误处理测试

use crate::error::{Context, PersistenceError, ServiceError};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rstest::rstest;
use sea_orm::DbErr;
use std::error::Error;

fn decode_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("not-json").unwrap_err()
}

#[test]
fn test_config_error_creation() {
    let err = ServiceError::config("端口无效");
    assert!(matches!(err, ServiceError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 端口无效");
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = ServiceError::config_with_source("配置文件加载失败", io_err);

    assert!(err.to_string().contains("配置错误: 配置文件加载失败"));
    assert!(err.source().is_some());
}

#[test]
fn test_request_errors_keep_raw_text() {
    let raw = decode_error().to_string();
    let err = ServiceError::Decode(decode_error());
    assert_eq!(err.to_string(), raw);

    let db_err = DbErr::Custom("no such table: persons".to_string());
    let raw = db_err.to_string();
    let err: ServiceError = PersistenceError::Query(db_err).into();
    assert_eq!(err.to_string(), raw);
}

#[rstest]
#[case::decode(ServiceError::Decode(decode_error()), "DECODE_ERROR")]
#[case::persistence(
    ServiceError::Persistence(PersistenceError::Insert(DbErr::Custom("x".into()))),
    "PERSISTENCE_ERROR"
)]
#[case::encode(ServiceError::Encode(decode_error()), "ENCODE_ERROR")]
#[case::database(
    ServiceError::database_with_source("x", DbErr::Custom("x".into())),
    "DATABASE_ERROR"
)]
#[case::server(
    ServiceError::server_with_source("x", std::io::Error::other("x")),
    "SERVER_ERROR"
)]
fn test_every_error_maps_to_500(#[case] err: ServiceError, #[case] code: &str) {
    assert_eq!(
        err.to_http_response_parts(),
        (StatusCode::INTERNAL_SERVER_ERROR, code)
    );
}

#[test]
fn test_error_context_trait() {
    let result: Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::AddrInUse,
        "地址已被占用",
    ));

    let err = result.context("绑定监听地址失败").unwrap_err();
    assert!(matches!(err, ServiceError::Context { .. }));
    assert!(err.to_string().starts_with("绑定监听地址失败: "));
    assert_eq!(err.to_http_response_parts().1, "IO_ERROR");
}

#[tokio::test]
async fn test_into_response_is_plain_text_500() {
    let response = ServiceError::Decode(decode_error()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[axum::http::header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, decode_error().to_string().as_bytes());
}
