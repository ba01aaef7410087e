use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by collaborator traits. The engine runs on a single
/// thread, so nothing here needs to be `Send`.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
