//! # 持久化错误
//!
//! 数据访问层的错误类型，原样保留底层驱动错误文本

use sea_orm::DbErr;
use thiserror::Error;

/// 持久化网关返回的错误
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// 插入语句准备或执行失败
    #[error(transparent)]
    Insert(DbErr),

    /// 查询或行解码失败
    #[error(transparent)]
    Query(DbErr),
}
