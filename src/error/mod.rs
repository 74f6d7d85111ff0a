//! The unified error handling system for the application.

// 1. Core Types
pub use persistence::PersistenceError;
pub use types::ServiceError;

/// A unified `Result` type for the entire application.
///
/// All functions that can fail should return this type.
pub type Result<T> = std::result::Result<T, ServiceError>;

// 2. Module declarations
pub mod persistence;
pub mod types;

// 3. Context Trait for adding context to errors.
/// Attach a human-readable context message to a fallible result.
pub trait Context<T, E> {
    /// Wrap the error with a fixed context message.
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display;

    /// Wrap the error with a lazily built context message.
    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<ServiceError>,
{
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display,
    {
        self.with_context(|| context)
    }

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ServiceError::Context {
                context: context().to_string(),
                source: Box::new(error.into()),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
