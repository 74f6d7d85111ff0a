//! # Span 上下文传播
//!
//! [`start_span`] 以传入的 `Context` 中的活动 span 作为父 span 开启新 span
//! （没有活动 span 时为根 span），返回的 [`SpanScope`] 同时持有派生出的子
//! `Context` 与 span 本身。嵌套调用必须使用 [`SpanScope::context`]，否则父子
//! 关系会断开。
//!
//! `SpanScope` 在 `Drop` 时结束 span，因此正常返回、错误返回、panic 以及
//! future 被取消时 span 都只会结束一次。

use opentelemetry::trace::{Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use std::error::Error;

/// 未完成即被丢弃的 span 使用的错误描述
pub const ABANDONED_DESCRIPTION: &str = "span dropped before completion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Pending,
    Succeeded,
    Failed,
}

/// 持有一个已开启 span 的作用域
#[derive(Debug)]
pub struct SpanScope {
    cx: Context,
    outcome: Outcome,
}

/// 在 `parent` 之下开启名为 `name` 的 span
pub fn start_span<T>(tracer: &T, parent: &Context, name: &'static str) -> SpanScope
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let span = tracer.start_with_context(name, parent);
    SpanScope {
        cx: parent.with_span(span),
        outcome: Outcome::Pending,
    }
}

impl SpanScope {
    /// 携带本 span 的子上下文，传给需要继续开启子 span 的调用
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.cx
    }

    /// 附加 span 属性
    pub fn set_attribute(&self, attribute: KeyValue) {
        self.cx.span().set_attribute(attribute);
    }

    /// 记录错误并将状态置为 `Error`
    pub fn record_error(&mut self, err: &dyn Error) {
        let span = self.cx.span();
        span.record_error(err);
        span.set_status(Status::error(err.to_string()));
        self.outcome = Outcome::Failed;
    }

    /// 根据调用结果结束作用域：`Err` 记录到 span，`Ok` 标记成功；结果原样返回
    pub fn complete<T, E>(&mut self, result: Result<T, E>) -> Result<T, E>
    where
        E: Error,
    {
        match &result {
            Ok(_) => {
                if self.outcome == Outcome::Pending {
                    self.outcome = Outcome::Succeeded;
                }
            }
            Err(err) => self.record_error(err),
        }
        result
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        let span = self.cx.span();
        match self.outcome {
            Outcome::Succeeded => span.set_status(Status::Ok),
            Outcome::Pending => span.set_status(Status::error(ABANDONED_DESCRIPTION)),
            Outcome::Failed => {}
        }
        span.end();
    }
}
