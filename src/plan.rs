//! Flattening a resolved folder tree into an ordered action plan.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::tree::FolderNode;

/// One filesystem operation in a download plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a local directory (and any missing parents).
    MkDir(PathBuf),
    /// Fetch the remote file `id` into `path`.
    FetchFile {
        /// Remote id of the file.
        id: String,
        /// Local destination path.
        path: PathBuf,
    },
}

impl Action {
    /// Returns the local path this action touches.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MkDir(path) | Self::FetchFile { path, .. } => path,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MkDir(path) => write!(f, "mkdir {}", path.display()),
            Self::FetchFile { id, path } => write!(f, "fetch {id} -> {}", path.display()),
        }
    }
}

/// Flattens a resolved tree into the ordered sequence of actions that
/// materializes it under `root_path`.
///
/// Traversal is depth-first pre-order: the plan opens with `MkDir(root_path)`
/// (so an empty folder still materializes), every folder's `MkDir` precedes
/// anything inside it, and every file becomes `FetchFile(id, parent/name)`.
/// Sibling name collisions are not deduplicated; the remote host allows
/// duplicate names and the last fetch wins.
///
/// The tree is already fully resolved, so this is a pure, total function.
#[must_use]
pub fn plan(root: &FolderNode, root_path: &Path) -> Vec<Action> {
    let mut actions = vec![Action::MkDir(root_path.to_path_buf())];
    walk(root, root_path, &mut actions);
    actions
}

fn walk(node: &FolderNode, dir: &Path, actions: &mut Vec<Action>) {
    let Some(children) = &node.children else {
        return;
    };
    for child in children {
        let child_path = dir.join(&child.name);
        if child.is_folder() {
            actions.push(Action::MkDir(child_path.clone()));
            walk(child, &child_path, actions);
        } else {
            actions.push(Action::FetchFile {
                id: child.id.clone(),
                path: child_path,
            });
        }
    }
}
