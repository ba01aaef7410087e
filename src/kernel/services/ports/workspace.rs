use crate::models::Uri;

pub trait WorkspaceService {
    fn set_most_recently_opened_file(&self, uri: &Uri);
}
