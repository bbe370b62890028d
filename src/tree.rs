//! Recursive resolution of a shared folder into a fully materialized tree.

use futures::future::BoxFuture;

use crate::error::{Error, Result};
use crate::extract;
use crate::fetch::PageFetcher;
use crate::listing::{EntryKind, FolderListing};
use crate::url;

/// A fully resolved node of the remote folder tree.
///
/// `children` is `None` for a file node and a possibly-empty ordered list
/// for a folder node. The tree is immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// Remote id of the node.
    pub id: String,
    /// Local name the node will get on disk.
    pub name: String,
    /// Folder or file.
    pub kind: EntryKind,
    /// Resolved children for a folder node, `None` for a file node.
    pub children: Option<Vec<FolderNode>>,
}

impl FolderNode {
    /// Returns true if this node is a folder.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// Counts the file nodes in this subtree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => children.iter().map(FolderNode::file_count).sum(),
        }
    }
}

/// Resolves folder listings recursively through an injected page fetcher.
pub struct TreeBuilder<P: PageFetcher> {
    fetcher: P,
    max_depth: usize,
}

impl<P: PageFetcher> TreeBuilder<P> {
    /// Creates a builder that refuses to recurse past `max_depth` nested
    /// folders. The remote structure is untrusted; without the cap a cyclic
    /// or pathologically deep listing would recurse unboundedly.
    #[must_use]
    pub const fn new(fetcher: P, max_depth: usize) -> Self {
        Self { fetcher, max_depth }
    }

    /// Fetches and resolves the folder at `listing_url` into a complete
    /// [`FolderNode`] tree.
    ///
    /// Children keep listing order. Any failure anywhere in the recursion
    /// aborts the whole build; no partial tree is returned.
    ///
    /// # Errors
    ///
    /// Propagates fetch, extraction, and parse failures unchanged, and fails
    /// with [`Error::MaxDepthExceeded`] when nesting passes the configured
    /// limit.
    pub async fn build(&self, listing_url: &str) -> Result<FolderNode> {
        self.build_at(listing_url.to_string(), 0).await
    }

    fn build_at(&self, listing_url: String, depth: usize) -> BoxFuture<'_, Result<FolderNode>> {
        Box::pin(async move {
            if depth >= self.max_depth {
                return Err(Error::MaxDepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            let page = self.fetcher.fetch_page(&listing_url).await?;
            let decoded = extract::extract(&page)?;
            let listing = FolderListing::parse(&page, &decoded, &listing_url)?;
            log::info!("retrieving folder {} ({})", listing.name, listing.id);

            let mut children = Vec::with_capacity(listing.entries.len());
            for entry in listing.entries {
                match entry.kind {
                    EntryKind::File => {
                        log::debug!("processing file {} ({})", entry.name, entry.id);
                        children.push(FolderNode {
                            id: entry.id,
                            name: entry.name,
                            kind: EntryKind::File,
                            children: None,
                        });
                    }
                    EntryKind::Folder => {
                        let child = self
                            .build_at(url::folder_url(&entry.id), depth + 1)
                            .await?;
                        children.push(child);
                    }
                }
            }

            Ok(FolderNode {
                id: listing.id,
                name: listing.name,
                kind: EntryKind::Folder,
                children: Some(children),
            })
        })
    }
}
