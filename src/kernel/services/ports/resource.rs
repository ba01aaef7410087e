use std::rc::Rc;

use super::runtime::LocalBoxFuture;
use crate::models::{Resource, Uri};

/// Turns URIs into resources and arbitrates whether a resource may close.
pub trait ResourceProvider {
    /// `None` means the URI cannot be opened.
    fn get_resource<'a>(&'a self, uri: &'a Uri) -> LocalBoxFuture<'a, Option<Resource>>;

    /// `open_lists` holds the tab list of every live group, so the provider
    /// can tell whether this is the last tab showing the resource.
    fn should_close_resource<'a>(
        &'a self,
        resource: &'a Resource,
        open_lists: &'a [Vec<Rc<Resource>>],
    ) -> LocalBoxFuture<'a, bool>;
}
