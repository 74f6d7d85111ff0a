//! # 人员记录
//!
//! 请求处理 → 业务函数 → 持久化网关，每一层各自开启一个 span：
//!
//! ```text
//! usersPostHandler ─ addPerson ─ createPerson
//! usersGetHandler  ─ getPersons ─ listPersons
//! ```

pub mod handlers;
pub mod model;
pub mod service;
pub mod store;

pub use model::Person;
pub use service::PersonService;
pub use store::{PersonRepository, PersonStore};
