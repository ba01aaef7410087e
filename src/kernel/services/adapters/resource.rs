use std::path::PathBuf;
use std::rc::Rc;

use crate::kernel::services::ports::{LocalBoxFuture, ResourceProvider};
use crate::models::{Resource, Uri};

/// Resolves `file://` URIs that point at an existing regular file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalResourceProvider;

impl LocalResourceProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceProvider for LocalResourceProvider {
    fn get_resource<'a>(&'a self, uri: &'a Uri) -> LocalBoxFuture<'a, Option<Resource>> {
        Box::pin(async move {
            if uri.scheme() != "file" {
                return None;
            }
            let path = PathBuf::from(uri.path());
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => Some(Resource::new(uri.clone())),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(uri = %uri, error = %e, "stat failed");
                    None
                }
            }
        })
    }

    fn should_close_resource<'a>(
        &'a self,
        _resource: &'a Resource,
        _open_lists: &'a [Vec<Rc<Resource>>],
    ) -> LocalBoxFuture<'a, bool> {
        Box::pin(async { true })
    }
}
