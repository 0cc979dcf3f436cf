//! Folder: an ordered container of folders and requests.

use serde::{Deserialize, Serialize};

use super::CollectionChild;
use crate::id::generate_id;
use crate::persistence::{FolderInfoFile, Id};

/// A folder inside a collection or another folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Stable identifier.
    pub id: Id,

    /// Id of the parent collection or folder. Not persisted; rebuilt from
    /// the directory structure on load.
    pub parent_id: Id,

    /// Human-readable name, also the basis of the directory name.
    pub title: String,

    /// Explicit sibling position. Unindexed items sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Nested folders and requests, in sibling order.
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

impl Folder {
    /// Creates an empty folder with a fresh id.
    #[must_use]
    pub fn new(parent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            parent_id: parent_id.into(),
            title: title.into(),
            index: None,
            children: Vec::new(),
        }
    }

    /// Rebuilds a folder (without children) from its info file.
    #[must_use]
    pub fn from_info(info: FolderInfoFile, parent_id: impl Into<String>) -> Self {
        Self {
            id: info.id,
            parent_id: parent_id.into(),
            title: info.title,
            index: info.index,
            children: Vec::new(),
        }
    }

    /// Appends a child, re-parenting it to this folder.
    #[must_use]
    pub fn with_child(mut self, mut child: CollectionChild) -> Self {
        child.set_parent_id(self.id.clone());
        self.children.push(child);
        self
    }

    /// Deep-clones this folder, giving it and every descendant a fresh id.
    ///
    /// Parent ids inside the copy point at the copied parents. The copy's
    /// own `parent_id` is unchanged.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let id = generate_id();
        let children = self
            .children
            .iter()
            .map(|child| match child {
                CollectionChild::Folder(folder) => {
                    let mut copy = folder.duplicate();
                    copy.parent_id.clone_from(&id);
                    CollectionChild::Folder(copy)
                }
                CollectionChild::Request(request) => {
                    let mut copy = request.duplicate();
                    copy.parent_id.clone_from(&id);
                    CollectionChild::Request(copy)
                }
            })
            .collect();

        Self {
            id,
            parent_id: self.parent_id.clone(),
            title: self.title.clone(),
            index: self.index,
            children,
        }
    }
}
