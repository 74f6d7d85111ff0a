//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod persons;

pub use persons::Entity as Persons;

#[cfg(test)]
mod tests;
