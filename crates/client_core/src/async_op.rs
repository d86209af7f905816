//! Loading/error bookkeeping shared by every store action.

use std::future::Future;

use tracing::debug;

use crate::error::{error_message, ClientError};

type LoadingFn<'a> = Box<dyn Fn(bool) + Send + 'a>;
type ErrorFn<'a> = Box<dyn Fn(Option<String>) + Send + 'a>;
type DataFn<'a, T> = Box<dyn FnOnce(T) + Send + 'a>;

/// Callbacks a store hands to [`with_async_operation`].
pub struct AsyncOperationConfig<'a, T> {
    set_loading: LoadingFn<'a>,
    set_error: ErrorFn<'a>,
    set_data: Option<DataFn<'a, T>>,
    rethrow: bool,
}

impl<'a, T> AsyncOperationConfig<'a, T> {
    pub fn new(
        set_loading: impl Fn(bool) + Send + 'a,
        set_error: impl Fn(Option<String>) + Send + 'a,
    ) -> Self {
        Self {
            set_loading: Box::new(set_loading),
            set_error: Box::new(set_error),
            set_data: None,
            rethrow: false,
        }
    }

    pub fn on_data(mut self, set_data: impl FnOnce(T) + Send + 'a) -> Self {
        self.set_data = Some(Box::new(set_data));
        self
    }

    /// Return the failure to the caller after recording it.
    pub fn rethrow(mut self) -> Self {
        self.rethrow = true;
        self
    }
}

/// Clears the loading flag when the operation ends, including when the
/// enclosing future is dropped mid-flight.
struct LoadingGuard<'a> {
    set_loading: LoadingFn<'a>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        (self.set_loading)(false);
    }
}

/// Runs `operation` with standard loading and error bookkeeping.
///
/// Loading is raised and the previous error cleared before the operation
/// starts. On success the result goes to the `on_data` callback if one was
/// given. On failure the normalized message is recorded and, with
/// [`AsyncOperationConfig::rethrow`], the error is returned. Loading is
/// lowered exactly once on every exit path.
///
/// A [`ClientError::Cancelled`] failure is not recorded as an error.
pub async fn with_async_operation<'a, T, F, Fut>(
    operation: F,
    config: AsyncOperationConfig<'a, T>,
) -> Result<(), ClientError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let AsyncOperationConfig {
        set_loading,
        set_error,
        set_data,
        rethrow,
    } = config;

    set_loading(true);
    let _loading = LoadingGuard { set_loading };
    set_error(None);

    match operation().await {
        Ok(data) => {
            if let Some(set_data) = set_data {
                set_data(data);
            }
            Ok(())
        }
        Err(err) => {
            if err.is_cancelled() {
                debug!("async operation cancelled");
            } else {
                set_error(Some(error_message(&err)));
            }
            if rethrow {
                Err(err)
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/async_op_tests.rs"]
mod tests;
