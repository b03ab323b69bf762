use crate::error::{AppError, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Run a blocking closure on the ambient runtime's blocking pool.
///
/// The closure's result is returned unchanged. A panic inside the closure is
/// resumed on the calling task.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    join(tokio::task::spawn_blocking(f)).await
}

/// Same as [`run_blocking`], on the blocking pool of an explicit runtime.
pub async fn run_blocking_on<F, T>(handle: &Handle, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    join(handle.spawn_blocking(f)).await
}

async fn join<T>(task: JoinHandle<Result<T>>) -> Result<T> {
    match task.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(AppError::Task(e.to_string())),
    }
}
