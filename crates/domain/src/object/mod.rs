//! The in-memory object tree.
//!
//! A collection is the root; folders and requests hang below it. All
//! tree-walking code dispatches on the variant rather than on a shared
//! supertype, and parents are referenced by id (`parent_id`), never by pointer.

mod collection;
mod folder;
mod request;
mod tree;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use collection::Collection;
pub use folder::Folder;
pub use request::TrufosRequest;
pub use tree::sort_children;

/// Discriminant of the three persisted object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// Root of a tree, stored in a caller-chosen directory.
    Collection,
    /// Container of folders and requests.
    Folder,
    /// A single HTTP request.
    Request,
}

impl ObjectType {
    /// Name of the info file stored in this object's directory.
    #[must_use]
    pub const fn info_file_name(self) -> &'static str {
        match self {
            Self::Collection => crate::persistence::COLLECTION_FILE,
            Self::Folder => crate::persistence::FOLDER_FILE,
            Self::Request => crate::persistence::REQUEST_FILE,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Collection => "collection",
            Self::Folder => "folder",
            Self::Request => "request",
        };
        write!(f, "{s}")
    }
}

/// Any persisted object, owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TrufosObject {
    /// A collection with its whole subtree.
    Collection(Collection),
    /// A folder with its whole subtree.
    Folder(Folder),
    /// A request.
    Request(TrufosRequest),
}

impl TrufosObject {
    /// Borrows this object.
    #[must_use]
    pub const fn as_object_ref(&self) -> ObjectRef<'_> {
        match self {
            Self::Collection(c) => ObjectRef::Collection(c),
            Self::Folder(f) => ObjectRef::Folder(f),
            Self::Request(r) => ObjectRef::Request(r),
        }
    }

    /// Mutably borrows this object.
    pub fn as_object_mut(&mut self) -> ObjectMut<'_> {
        match self {
            Self::Collection(c) => ObjectMut::Collection(c),
            Self::Folder(f) => ObjectMut::Folder(f),
            Self::Request(r) => ObjectMut::Request(r),
        }
    }
}

/// A child of a collection or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CollectionChild {
    /// A nested folder.
    Folder(Folder),
    /// A request.
    Request(TrufosRequest),
}

impl CollectionChild {
    /// Returns the id of this child.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(f) => &f.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the title of this child.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Folder(f) => &f.title,
            Self::Request(r) => &r.title,
        }
    }

    /// Returns the explicit sibling position, if any.
    #[must_use]
    pub const fn index(&self) -> Option<u32> {
        match self {
            Self::Folder(f) => f.index,
            Self::Request(r) => r.index,
        }
    }

    /// Sets the explicit sibling position.
    pub fn set_index(&mut self, index: Option<u32>) {
        match self {
            Self::Folder(f) => f.index = index,
            Self::Request(r) => r.index = index,
        }
    }

    /// Returns the id of the parent collection or folder.
    #[must_use]
    pub fn parent_id(&self) -> &str {
        match self {
            Self::Folder(f) => &f.parent_id,
            Self::Request(r) => &r.parent_id,
        }
    }

    /// Re-parents this child (in memory only).
    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
        match self {
            Self::Folder(f) => f.parent_id = parent_id.into(),
            Self::Request(r) => r.parent_id = parent_id.into(),
        }
    }

    /// Returns the object type of this child.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Folder(_) => ObjectType::Folder,
            Self::Request(_) => ObjectType::Request,
        }
    }

    /// Borrows this child as an object.
    #[must_use]
    pub const fn as_object_ref(&self) -> ObjectRef<'_> {
        match self {
            Self::Folder(f) => ObjectRef::Folder(f),
            Self::Request(r) => ObjectRef::Request(r),
        }
    }

    /// Mutably borrows this child as an object.
    pub fn as_object_mut(&mut self) -> ObjectMut<'_> {
        match self {
            Self::Folder(f) => ObjectMut::Folder(f),
            Self::Request(r) => ObjectMut::Request(r),
        }
    }
}

/// A borrowed view of any object.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    /// A collection.
    Collection(&'a Collection),
    /// A folder.
    Folder(&'a Folder),
    /// A request.
    Request(&'a TrufosRequest),
}

impl<'a> ObjectRef<'a> {
    /// Returns the id of the object.
    #[must_use]
    pub fn id(self) -> &'a str {
        match self {
            Self::Collection(c) => &c.id,
            Self::Folder(f) => &f.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the title of the object.
    #[must_use]
    pub fn title(self) -> &'a str {
        match self {
            Self::Collection(c) => &c.title,
            Self::Folder(f) => &f.title,
            Self::Request(r) => &r.title,
        }
    }

    /// Returns the parent id; `None` for collections.
    #[must_use]
    pub fn parent_id(self) -> Option<&'a str> {
        match self {
            Self::Collection(_) => None,
            Self::Folder(f) => Some(&f.parent_id),
            Self::Request(r) => Some(&r.parent_id),
        }
    }

    /// Returns the children; empty for requests.
    #[must_use]
    pub fn children(self) -> &'a [CollectionChild] {
        match self {
            Self::Collection(c) => &c.children,
            Self::Folder(f) => &f.children,
            Self::Request(_) => &[],
        }
    }

    /// Returns the discriminant.
    #[must_use]
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Collection(_) => ObjectType::Collection,
            Self::Folder(_) => ObjectType::Folder,
            Self::Request(_) => ObjectType::Request,
        }
    }
}

/// A mutable borrowed view of any object.
#[derive(Debug)]
pub enum ObjectMut<'a> {
    /// A collection.
    Collection(&'a mut Collection),
    /// A folder.
    Folder(&'a mut Folder),
    /// A request.
    Request(&'a mut TrufosRequest),
}

impl ObjectMut<'_> {
    /// Reborrows as a shared view.
    #[must_use]
    pub fn as_object_ref(&self) -> ObjectRef<'_> {
        match self {
            Self::Collection(c) => ObjectRef::Collection(c),
            Self::Folder(f) => ObjectRef::Folder(f),
            Self::Request(r) => ObjectRef::Request(r),
        }
    }
}

impl<'a> From<&'a Collection> for ObjectRef<'a> {
    fn from(collection: &'a Collection) -> Self {
        Self::Collection(collection)
    }
}

impl<'a> From<&'a Folder> for ObjectRef<'a> {
    fn from(folder: &'a Folder) -> Self {
        Self::Folder(folder)
    }
}

impl<'a> From<&'a TrufosRequest> for ObjectRef<'a> {
    fn from(request: &'a TrufosRequest) -> Self {
        Self::Request(request)
    }
}

impl<'a> From<&'a CollectionChild> for ObjectRef<'a> {
    fn from(child: &'a CollectionChild) -> Self {
        child.as_object_ref()
    }
}
