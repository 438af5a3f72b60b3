use std::path::{Path, PathBuf};

use crate::document::is_flat_name;

/// Existence checks against the static asset location
pub trait AssetLookup {
    fn contains(&self, name: &str) -> bool;
}

/// Flat directory of publicly served files (images)
#[derive(Debug, Clone)]
pub struct PublicAssets {
    root: PathBuf,
}

impl PublicAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an existing asset, `None` for missing or non-flat names
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        if !is_flat_name(name) {
            return None;
        }
        let path = self.root.join(name);
        path.is_file().then_some(path)
    }
}

impl AssetLookup for PublicAssets {
    fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_some()
    }
}

impl<T: AssetLookup + ?Sized> AssetLookup for &T {
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}
