use super::Uri;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceMetadata {
    Diff { original: Uri, modified: Uri },
}

/// A resolved, addressable document or view.
///
/// Groups share resources by identity (`uri`) but each group holds the
/// object its own resolution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub uri: Uri,
    pub name: String,
    pub metadata: Option<ResourceMetadata>,
}

impl Resource {
    pub fn new(uri: Uri) -> Self {
        let name = uri.file_name().to_string();
        Self {
            uri,
            name,
            metadata: None,
        }
    }

    pub fn diff(uri: Uri, original: Uri, modified: Uri) -> Self {
        Self {
            metadata: Some(ResourceMetadata::Diff { original, modified }),
            ..Self::new(uri)
        }
    }

    pub fn diff_sides(&self) -> Option<(&Uri, &Uri)> {
        match &self.metadata {
            Some(ResourceMetadata::Diff { original, modified }) => Some((original, modified)),
            None => None,
        }
    }
}
