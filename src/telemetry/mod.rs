//! # 分布式追踪模块
//!
//! - [`lifecycle`]：进程级 `TracerProvider` 的创建、注册与关闭
//! - [`context`]：在显式传递的 `Context` 上开启子 span，并保证 span 恰好结束一次

pub mod context;
pub mod lifecycle;

pub use context::{SpanScope, start_span};
pub use lifecycle::Telemetry;

/// 注入到服务各层的 tracer 句柄
pub type ServiceTracer = opentelemetry_sdk::trace::SdkTracer;

/// instrumentation scope 名称
pub const TRACER_NAME: &str = "person-api";
