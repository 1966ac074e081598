//! Listing: delimited, paginated listing grouped into directories and files.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BrowseError, BrowseResult};
use crate::object_type::{ObjectType, classify_key};
use crate::provider::ObjectBrowser;
use crate::store::ObjectStore;

/// Delimiter used to derive synthetic directories from keys.
pub const DELIMITER: &str = "/";

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// Full store key (ends in `/` for directories).
    pub key: String,
    /// Key with the configured key prefix stripped; used to build links.
    pub relative_key: String,
    /// Key with the listed prefix stripped and any trailing `/` removed.
    pub display_name: String,
    /// Directory, audio, or other.
    pub object_type: ObjectType,
}

impl<S: ObjectStore> ObjectBrowser<S> {
    /// List the entries directly under `effective_prefix`.
    ///
    /// A non-empty prefix without a trailing `/` is normalized first.
    /// Directories come first, then files; each group is sorted by display
    /// name. Any failed page fails the whole listing.
    pub async fn list(&self, effective_prefix: &str) -> BrowseResult<Vec<ListingEntry>> {
        let prefix = if effective_prefix.is_empty() || effective_prefix.ends_with('/') {
            effective_prefix.to_owned()
        } else {
            format!("{effective_prefix}/")
        };

        let deadline = self.deadline();
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        let mut continuation = None;
        let mut pages = 0_usize;

        loop {
            let page = self
                .bounded(
                    deadline,
                    self.store.list_page(&prefix, DELIMITER, continuation.take()),
                )
                .await
                .map_err(|source| {
                    warn!(prefix = %prefix, page = pages, error = %source, "listing failed");
                    BrowseError::List {
                        prefix: prefix.clone(),
                        source,
                    }
                })?;
            pages += 1;

            for key in page.keys {
                if let Some(entry) = self.file_entry(&prefix, key) {
                    files.push(entry);
                }
            }
            for common in page.common_prefixes {
                dirs.push(self.directory_entry(&prefix, common));
            }

            match page.next_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        dirs.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        files.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        debug!(
            prefix = %prefix,
            pages,
            directories = dirs.len(),
            files = files.len(),
            "listing completed"
        );

        dirs.append(&mut files);
        Ok(dirs)
    }

    /// Build a file entry, skipping the folder marker for `prefix` itself.
    fn file_entry(&self, prefix: &str, key: String) -> Option<ListingEntry> {
        let display_name = key.strip_prefix(prefix).unwrap_or(&key).to_owned();
        if display_name.is_empty() {
            return None;
        }
        Some(ListingEntry {
            relative_key: self.relative_key(&key),
            display_name,
            object_type: classify_key(&key),
            key,
        })
    }

    fn directory_entry(&self, prefix: &str, common: String) -> ListingEntry {
        let name = common.strip_prefix(prefix).unwrap_or(&common);
        ListingEntry {
            relative_key: self.relative_key(&common),
            display_name: name.strip_suffix(DELIMITER).unwrap_or(name).to_owned(),
            object_type: ObjectType::Directory,
            key: common,
        }
    }

    fn relative_key(&self, key: &str) -> String {
        key.strip_prefix(self.key_prefix.as_str())
            .unwrap_or(key)
            .to_owned()
    }
}
