//! Id-based lookups and edits on a collection tree.

use super::{Collection, CollectionChild, ObjectRef};
use crate::error::{DomainError, DomainResult};

/// Sorts children by explicit `index` ascending; unindexed children go last.
///
/// The sort is stable, so ties keep their incoming (directory-read) order.
pub fn sort_children(children: &mut [CollectionChild]) {
    children.sort_by_key(|child| (child.index().is_none(), child.index()));
}

fn find_in<'a>(children: &'a [CollectionChild], id: &str) -> Option<&'a CollectionChild> {
    for child in children {
        if child.id() == id {
            return Some(child);
        }
        if let CollectionChild::Folder(folder) = child
            && let Some(found) = find_in(&folder.children, id)
        {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(
    children: &'a mut [CollectionChild],
    id: &str,
) -> Option<&'a mut CollectionChild> {
    for child in children.iter_mut() {
        if child.id() == id {
            return Some(child);
        }
        if let CollectionChild::Folder(folder) = child
            && let Some(found) = find_in_mut(&mut folder.children, id)
        {
            return Some(found);
        }
    }
    None
}

impl Collection {
    /// Finds the collection itself or any descendant by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<ObjectRef<'_>> {
        if self.id == id {
            return Some(ObjectRef::Collection(self));
        }
        find_in(&self.children, id).map(CollectionChild::as_object_ref)
    }

    /// Finds a descendant by id.
    #[must_use]
    pub fn find_child(&self, id: &str) -> Option<&CollectionChild> {
        find_in(&self.children, id)
    }

    /// Mutably finds a descendant by id.
    pub fn find_child_mut(&mut self, id: &str) -> Option<&mut CollectionChild> {
        find_in_mut(&mut self.children, id)
    }

    /// Returns true if `id` is this collection or one of its descendants.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Returns the children list of the collection or folder with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ItemNotFound`] if no such object exists and
    /// [`DomainError::NotAParent`] if it is a request.
    pub fn children_of_mut(&mut self, id: &str) -> DomainResult<&mut Vec<CollectionChild>> {
        if self.id == id {
            return Ok(&mut self.children);
        }
        match find_in_mut(&mut self.children, id) {
            Some(CollectionChild::Folder(folder)) => Ok(&mut folder.children),
            Some(CollectionChild::Request(_)) => Err(DomainError::NotAParent(id.to_string())),
            None => Err(DomainError::ItemNotFound(id.to_string())),
        }
    }

    /// Returns the children list of the collection or folder with the given id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::children_of_mut`].
    pub fn children_of(&self, id: &str) -> DomainResult<&[CollectionChild]> {
        match self.find(id) {
            Some(ObjectRef::Request(_)) => Err(DomainError::NotAParent(id.to_string())),
            Some(object) => Ok(object.children()),
            None => Err(DomainError::ItemNotFound(id.to_string())),
        }
    }

    /// Returns the parent id of a descendant.
    #[must_use]
    pub fn parent_id_of(&self, id: &str) -> Option<&str> {
        self.find_child(id).map(CollectionChild::parent_id)
    }

    /// Returns true if `ancestor` is `id` itself or lies on the path from the
    /// collection down to `id`.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == ancestor {
                return true;
            }
            current = self.parent_id_of(cursor);
        }
        false
    }

    /// Removes a descendant from its parent's children and returns it together
    /// with its former position.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ItemNotFound`] if the id is not a descendant.
    pub fn detach(&mut self, id: &str) -> DomainResult<(CollectionChild, usize)> {
        let parent_id = self
            .parent_id_of(id)
            .map(str::to_string)
            .ok_or_else(|| DomainError::ItemNotFound(id.to_string()))?;
        let siblings = self.children_of_mut(&parent_id)?;
        let position = siblings
            .iter()
            .position(|child| child.id() == id)
            .ok_or_else(|| DomainError::ItemNotFound(id.to_string()))?;
        Ok((siblings.remove(position), position))
    }

    /// Inserts a child under the given parent at `position` (clamped to the
    /// end), re-parenting it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::children_of_mut`].
    pub fn attach(
        &mut self,
        parent_id: &str,
        mut child: CollectionChild,
        position: usize,
    ) -> DomainResult<()> {
        child.set_parent_id(parent_id);
        let siblings = self.children_of_mut(parent_id)?;
        let position = position.min(siblings.len());
        siblings.insert(position, child);
        Ok(())
    }
}
