//! Result type alias and context helpers.

use super::context::ErrorContext;
use super::tuiman_error::TuimanError;

/// Type alias for Results using TuimanError.
pub type TuimanResult<T> = Result<T, TuimanError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tuiman::error::{ErrorContext, ResultExt};
    ///
    /// store.load(id).context(ErrorContext::new("replay").with_request_id(id))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> TuimanResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> TuimanResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<TuimanError>,
{
    fn context(self, ctx: ErrorContext) -> TuimanResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> TuimanResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_context_on_ok_is_noop() {
        let ok: Result<u32, StorageError> = Ok(3);
        assert_eq!(ok.context(ErrorContext::new("x")).ok(), Some(3));
    }

    #[test]
    fn test_with_context_lazy() {
        let err: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let result = err.with_context(|| ErrorContext::new("read_manifest"));
        let err = result.unwrap_err();
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("read_manifest"));
    }
}
