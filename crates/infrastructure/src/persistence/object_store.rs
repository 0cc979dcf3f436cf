//! File system based object store.
//!
//! Directory layout of a collection:
//!
//! ```text
//! my-collection/
//! ├── collection.json
//! ├── .gitignore
//! ├── .secrets.bin          (only if something is secret)
//! ├── users/
//! │   ├── folder.json
//! │   └── list-users/
//! │       ├── request.json
//! │       ├── request-body.txt
//! │       └── .draft/       (only while the request has unsaved changes)
//! │           ├── request.json
//! │           └── request-body.txt
//! └── health/
//!     └── request.json
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::io::AsyncReadExt;
use tracing::{debug, instrument, warn};
use trufos_application::ports::{
    CopyOptions, FileSystem, FileSystemError, ObjectStore, ReadStream, SecretCodec,
};
use trufos_application::{PathIndex, StoreError, StoreResult};
use trufos_domain::naming::numbered_name;
use trufos_domain::persistence::{
    BODY_FILE, COLLECTION_FILE, DRAFT_DIR, FOLDER_FILE, GITIGNORE_FILE, InfoFile,
    LEGACY_DRAFT_REQUEST_FILE, REQUEST_FILE, RequestBody, SECRETS_FILE, gitignore_contents,
};
use trufos_domain::{
    Collection, CollectionChild, DomainError, Folder, ObjectMut, ObjectRef, TrufosRequest,
    directory_name, sort_children,
};

use super::InfoFileCodec;
use crate::bootstrap::default_collection;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// File system based implementation of [`ObjectStore`].
///
/// Owns the [`PathIndex`]; every structural operation updates it after the
/// corresponding filesystem change has succeeded.
pub struct FileSystemObjectStore<F: FileSystem, C: SecretCodec> {
    fs: F,
    info_files: InfoFileCodec<F, C>,
    index: PathIndex,
}

impl<F: FileSystem + Clone, C: SecretCodec> FileSystemObjectStore<F, C> {
    /// Creates a store with an empty path index.
    #[must_use]
    pub fn new(fs: F, codec: C) -> Self {
        Self {
            info_files: InfoFileCodec::new(fs.clone(), codec),
            fs,
            index: PathIndex::new(),
        }
    }
}

impl<F: FileSystem, C: SecretCodec> FileSystemObjectStore<F, C> {
    /// Returns the path index.
    #[must_use]
    pub const fn path_index(&self) -> &PathIndex {
        &self.index
    }

    /// Returns the directory of an indexed object.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotIndexed`] if the id has never been loaded or saved.
    pub fn indexed_path(&self, id: &str) -> StoreResult<&Path> {
        self.index
            .get(id)
            .ok_or_else(|| StoreError::NotIndexed(id.to_string()))
    }

    /// Loads the collection in `dir`, or creates the default collection
    /// there if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or bootstrapping fails.
    pub async fn open_or_bootstrap(&mut self, dir: &Path) -> StoreResult<Collection> {
        if self.fs.exists(&dir.join(COLLECTION_FILE)).await {
            self.load_collection(dir, true).await
        } else {
            self.create_default_collection(dir).await
        }
    }

    /// Persists the default collection into `dir` and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_default_collection(&mut self, dir: &Path) -> StoreResult<Collection> {
        let collection = default_collection(dir);
        self.save_collection(&collection, true).await?;
        Ok(collection)
    }

    /// Reads the request's text body into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not indexed or the body is not UTF-8.
    pub async fn load_text_body_string(
        &mut self,
        request: &TrufosRequest,
    ) -> StoreResult<Option<String>> {
        let Some(path) = self.text_body_path(request).await? else {
            return Ok(None);
        };
        let mut stream = self.fs.open_read(&path).await?;
        let mut text = String::new();
        stream
            .read_to_string(&mut text)
            .await
            .map_err(|e| FileSystemError::from_io(e, &path))?;
        Ok(Some(text))
    }

    /// Resolves the directory of an object, deriving and indexing a new one
    /// for objects that have never been persisted.
    async fn dir_path(&mut self, object: ObjectRef<'_>) -> StoreResult<PathBuf> {
        if let ObjectRef::Collection(collection) = object {
            self.index.insert(&collection.id, &collection.dir_path);
            return Ok(collection.dir_path.clone());
        }
        if let Some(path) = self.index.get(object.id()) {
            return Ok(path.to_path_buf());
        }

        let parent_id = object.parent_id().unwrap_or_default();
        let parent_dir = self
            .index
            .get(parent_id)
            .map(Path::to_path_buf)
            .ok_or_else(|| StoreError::ParentNotIndexed {
                id: object.id().to_string(),
                parent_id: parent_id.to_string(),
            })?;

        let dir = self
            .derive_dir(&parent_dir, object.title(), object.id())
            .await;
        debug!(id = object.id(), dir = %dir.display(), "assigned directory");
        self.index.insert(object.id(), &dir);
        Ok(dir)
    }

    /// Picks the first of `name`, `name-2`, `name-3`, ... below `parent` that
    /// is neither on disk nor claimed by another object. The object's own
    /// current directory always qualifies.
    async fn derive_dir(&self, parent: &Path, title: &str, id: &str) -> PathBuf {
        let base = directory_name(title);
        let current = self.index.get(id);
        let mut n = 1;
        loop {
            let candidate = parent.join(numbered_name(&base, n));
            if current == Some(candidate.as_path()) {
                return candidate;
            }
            if !self.index.is_claimed(&candidate, Some(id)) && !self.fs.exists(&candidate).await {
                return candidate;
            }
            n += 1;
        }
    }

    async fn is_request_dir(&self, dir: &Path) -> bool {
        self.fs.exists(&dir.join(REQUEST_FILE)).await
            || self.fs.exists(&dir.join(DRAFT_DIR).join(REQUEST_FILE)).await
            || self.fs.exists(&dir.join(LEGACY_DRAFT_REQUEST_FILE)).await
    }

    /// Loads every folder and request below `dir`, depth first.
    fn load_children<'a>(
        &'a mut self,
        dir: &'a Path,
        parent_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<CollectionChild>>> {
        Box::pin(async move {
            let mut children = Vec::new();

            for entry in self.fs.read_dir(dir).await? {
                let is_draft_dir = entry.file_name().is_some_and(|name| name == DRAFT_DIR);
                if is_draft_dir || !self.fs.is_dir(&entry).await {
                    continue;
                }

                if self.fs.exists(&entry.join(FOLDER_FILE)).await {
                    let info = self.info_files.read_folder(&entry).await?;
                    let mut folder = Folder::from_info(info, parent_id);
                    self.index.insert(&folder.id, &entry);
                    let id = folder.id.clone();
                    folder.children = self.load_children(&entry, &id).await?;
                    children.push(CollectionChild::Folder(folder));
                } else if self.is_request_dir(&entry).await {
                    let request = self.load_request(&entry, parent_id).await?;
                    children.push(CollectionChild::Request(request));
                } else {
                    debug!(dir = %entry.display(), "skipping foreign directory");
                }
            }

            sort_children(&mut children);
            Ok(children)
        })
    }

    /// Loads a request, preferring its draft files when a draft exists.
    ///
    /// The primary file is always read first so a stale layout is migrated
    /// (which may move a legacy draft into `.draft/`) before the draft is looked at.
    async fn load_request(&mut self, dir: &Path, parent_id: &str) -> StoreResult<TrufosRequest> {
        let primary = dir.join(REQUEST_FILE);
        let draft = dir.join(DRAFT_DIR).join(REQUEST_FILE);
        let legacy_draft = dir.join(LEGACY_DRAFT_REQUEST_FILE);

        let mut loaded = None;
        if self.fs.exists(&primary).await {
            loaded = Some(self.info_files.read_request(&primary).await?);
        } else if self.fs.exists(&legacy_draft).await {
            self.info_files.read_request(&legacy_draft).await?;
        }

        let request = if self.fs.exists(&draft).await {
            let mut info = self.info_files.read_request(&draft).await?;
            // the primary record owns the id; the draft file must agree before
            // save_changes moves it over the primary
            if let Some(primary) = loaded
                && info.id != primary.id
            {
                debug!(draft = %info.id, primary = %primary.id, "aligning draft id");
                info.id = primary.id;
                self.info_files
                    .write_file(&draft, &InfoFile::Request(info.clone()))
                    .await?;
            }
            TrufosRequest::from_info(info, parent_id, true)
        } else {
            let info = loaded.ok_or_else(|| StoreError::NotFound(primary.clone()))?;
            TrufosRequest::from_info(info, parent_id, false)
        };

        self.index.insert(&request.id, dir);
        Ok(request)
    }

    /// Location of the text body to read: the draft body for a draft that
    /// has one, else the primary body, else nothing.
    async fn text_body_path(&self, request: &TrufosRequest) -> StoreResult<Option<PathBuf>> {
        let dir = self.indexed_path(&request.id)?.to_path_buf();
        if request.draft {
            let draft_body = dir.join(DRAFT_DIR).join(BODY_FILE);
            if self.fs.exists(&draft_body).await {
                return Ok(Some(draft_body));
            }
        }
        let body = dir.join(BODY_FILE);
        Ok(self.fs.exists(&body).await.then_some(body))
    }

    /// Copies the body file of `source` next to the freshly written `copy`.
    async fn copy_body(&self, source: &TrufosRequest, copy: &TrufosRequest) -> StoreResult<()> {
        if !copy.body.is_text() || copy.body.inline_text().is_some() {
            return Ok(());
        }
        let Some(from) = self.text_body_path(source).await? else {
            return Ok(());
        };
        let to = self.indexed_path(&copy.id)?.join(BODY_FILE);
        self.fs.copy_file(&from, &to).await?;
        Ok(())
    }

    async fn remove_best_effort(&self, path: &Path) {
        if self.fs.exists(path).await
            && let Err(e) = self.fs.remove_file(path).await
        {
            warn!(path = %path.display(), error = %e, "failed to remove stale file");
        }
    }

    async fn move_file_if_exists(&self, from: &Path, to: &Path) -> StoreResult<bool> {
        if !self.fs.exists(from).await {
            return Ok(false);
        }
        self.fs.rename(from, to).await?;
        Ok(true)
    }

    /// Deletes the directories of `object` and its descendants, children first.
    fn delete_tree<'a>(&'a mut self, object: ObjectRef<'a>) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            for child in object.children() {
                if self.index.get(child.id()).is_some() {
                    self.delete_tree(child.as_object_ref()).await?;
                }
            }

            let dir = self.indexed_path(object.id())?.to_path_buf();
            if self.fs.exists(&dir).await {
                self.fs.remove_dir_all(&dir).await?;
            }
            let purged = self.index.purge(&dir);
            debug!(dir = %dir.display(), purged, "deleted directory");
            Ok(())
        })
    }

    async fn save_child(&mut self, child: &CollectionChild) -> StoreResult<()> {
        match child {
            CollectionChild::Folder(folder) => self.save_folder(folder).await,
            CollectionChild::Request(request) => self.save_request(request, None).await,
        }
    }

    /// Moves an object's directory under `parent_dir` with a name derived
    /// from `title`, then rebases the index. Returns the new directory.
    ///
    /// An object that was indexed but never written only has its index entry moved.
    async fn relocate(&mut self, id: &str, title: &str, parent_dir: &Path) -> StoreResult<PathBuf> {
        let old = self.indexed_path(id)?.to_path_buf();
        let new = self.derive_dir(parent_dir, title, id).await;
        if new != old {
            if self.fs.exists(&old).await {
                self.fs.rename(&old, &new).await?;
            }
            let rebased = self.index.rebase(&old, &new);
            debug!(from = %old.display(), to = %new.display(), rebased, "renamed directory");
        }
        Ok(new)
    }
}

impl<F: FileSystem, C: SecretCodec> ObjectStore for FileSystemObjectStore<F, C> {
    #[instrument(level = "debug", skip(self))]
    async fn load_collection(&mut self, dir_path: &Path, recursive: bool) -> StoreResult<Collection> {
        let info = self.info_files.read_collection(dir_path).await?;
        let mut collection = Collection::from_info(info, dir_path);
        self.index.insert(&collection.id, dir_path);

        if recursive {
            let id = collection.id.clone();
            collection.children = self.load_children(dir_path, &id).await?;
        }
        Ok(collection)
    }

    #[instrument(level = "debug", skip_all, fields(id = %collection.id, recursive = recursive))]
    async fn save_collection(&mut self, collection: &Collection, recursive: bool) -> StoreResult<()> {
        let dir = self.dir_path(ObjectRef::Collection(collection)).await?;

        if recursive {
            if !self.fs.exists(&dir).await {
                self.fs.create_dir_all(&dir).await?;
            }
            let gitignore = dir.join(GITIGNORE_FILE);
            if !self.fs.exists(&gitignore).await {
                self.fs
                    .write_file(&gitignore, gitignore_contents().as_bytes())
                    .await?;
            }
        }

        self.info_files
            .write(&dir, &InfoFile::from_object(ObjectRef::Collection(collection)))
            .await?;

        if recursive {
            let mut queue: VecDeque<&CollectionChild> = collection.children.iter().collect();
            while let Some(child) = queue.pop_front() {
                self.save_child(child).await?;
                if let CollectionChild::Folder(folder) = child {
                    queue.extend(folder.children.iter());
                }
            }
        }
        Ok(())
    }

    async fn save_request(&mut self, request: &TrufosRequest, text_body: Option<&str>) -> StoreResult<()> {
        let dir = self.dir_path(ObjectRef::Request(request)).await?;
        let target = if request.draft {
            dir.join(DRAFT_DIR)
        } else {
            dir
        };

        let mut info = InfoFile::from_object(ObjectRef::Request(request));
        if text_body.is_some()
            && let InfoFile::Request(record) = &mut info
            && let RequestBody::File { mime_type, .. } = &record.body
        {
            // a supplied text body replaces a file reference
            record.body = RequestBody::Text {
                text: None,
                mime_type: mime_type.clone(),
            };
        }
        self.info_files.write(&target, &info).await?;

        let body_path = target.join(BODY_FILE);
        if let Some(text) = text_body.or_else(|| request.body.inline_text()) {
            self.fs.write_file(&body_path, text.as_bytes()).await?;
        } else if !request.body.is_text() {
            self.remove_best_effort(&body_path).await;
        }
        Ok(())
    }

    async fn save_folder(&mut self, folder: &Folder) -> StoreResult<()> {
        let dir = self.dir_path(ObjectRef::Folder(folder)).await?;
        self.info_files
            .write(&dir, &InfoFile::from_object(ObjectRef::Folder(folder)))
            .await?;
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(id = %request.id))]
    async fn save_changes(&mut self, request: &mut TrufosRequest) -> StoreResult<()> {
        let dir = self.indexed_path(&request.id)?.to_path_buf();
        let draft_dir = dir.join(DRAFT_DIR);
        if !self.fs.exists(&draft_dir).await {
            return Ok(());
        }

        self.move_file_if_exists(&draft_dir.join(REQUEST_FILE), &dir.join(REQUEST_FILE))
            .await?;
        self.move_file_if_exists(&draft_dir.join(BODY_FILE), &dir.join(BODY_FILE))
            .await?;
        let moved_secrets = self
            .move_file_if_exists(&draft_dir.join(SECRETS_FILE), &dir.join(SECRETS_FILE))
            .await?;
        if !moved_secrets && self.fs.exists(&dir.join(SECRETS_FILE)).await {
            self.fs.remove_file(&dir.join(SECRETS_FILE)).await?;
        }

        self.fs.remove_dir_all(&draft_dir).await?;
        request.draft = false;
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(id = %request.id))]
    async fn discard_changes(&mut self, request: &mut TrufosRequest) -> StoreResult<()> {
        if !request.draft {
            return Ok(());
        }

        let dir = self.indexed_path(&request.id)?.to_path_buf();
        let draft_dir = dir.join(DRAFT_DIR);
        if self.fs.exists(&draft_dir).await {
            self.fs.remove_dir_all(&draft_dir).await?;
        }

        let info = self.info_files.read_request(&dir.join(REQUEST_FILE)).await?;
        *request = TrufosRequest::from_info(info, request.parent_id.clone(), false);
        Ok(())
    }

    #[instrument(level = "debug", skip(self, object))]
    async fn rename(&mut self, object: ObjectMut<'_>, title: &str) -> StoreResult<()> {
        match object {
            ObjectMut::Collection(collection) => {
                collection.title = title.to_string();
                self.save_collection(collection, false).await
            }
            ObjectMut::Folder(folder) => {
                let current = self.dir_path(ObjectRef::Folder(folder)).await?;
                let parent = current.parent().map(Path::to_path_buf).unwrap_or_default();
                self.relocate(&folder.id, title, &parent).await?;
                folder.title = title.to_string();
                self.save_folder(folder).await
            }
            ObjectMut::Request(request) => {
                let current = self.dir_path(ObjectRef::Request(request)).await?;
                let parent = current.parent().map(Path::to_path_buf).unwrap_or_default();
                self.relocate(&request.id, title, &parent).await?;
                request.title = title.to_string();
                self.save_request(request, None).await
            }
        }
    }

    #[instrument(level = "debug", skip(self, collection))]
    async fn move_child(
        &mut self,
        collection: &mut Collection,
        child_id: &str,
        new_parent_id: &str,
    ) -> StoreResult<()> {
        let (title, old_parent_id) = {
            let child = collection
                .find_child(child_id)
                .ok_or_else(|| DomainError::ItemNotFound(child_id.to_string()))?;
            (child.title().to_string(), child.parent_id().to_string())
        };
        collection.children_of(new_parent_id)?;
        if collection.is_ancestor_or_self(child_id, new_parent_id) {
            return Err(DomainError::InvalidMove {
                item: child_id.to_string(),
                target: new_parent_id.to_string(),
            }
            .into());
        }
        if old_parent_id == new_parent_id {
            return Ok(());
        }

        let new_parent = collection
            .find(new_parent_id)
            .ok_or_else(|| DomainError::ItemNotFound(new_parent_id.to_string()))?;
        let parent_dir = self.dir_path(new_parent).await?;
        if let Some(child) = collection.find_child(child_id) {
            self.dir_path(child.as_object_ref()).await?;
        }
        self.relocate(child_id, &title, &parent_dir).await?;

        let (child, _) = collection.detach(child_id)?;
        collection.attach(new_parent_id, child, usize::MAX)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, collection))]
    async fn reorder_item(
        &mut self,
        collection: &mut Collection,
        item_id: &str,
        new_parent_id: &str,
        new_index: usize,
    ) -> StoreResult<()> {
        let old_parent_id = collection
            .parent_id_of(item_id)
            .ok_or_else(|| DomainError::ItemNotFound(item_id.to_string()))?
            .to_string();

        if old_parent_id != new_parent_id {
            self.move_child(collection, item_id, new_parent_id).await?;
        }
        let (child, _) = collection.detach(item_id)?;
        collection.attach(new_parent_id, child, new_index)?;

        let mut parents = vec![new_parent_id.to_string()];
        if old_parent_id != new_parent_id {
            parents.push(old_parent_id);
        }

        for parent_id in &parents {
            for (position, child) in collection.children_of_mut(parent_id)?.iter_mut().enumerate() {
                let index = u32::try_from(position)
                    .map_err(|_| StoreError::Integrity(format!("too many children in {parent_id}")))?;
                child.set_index(Some(index));
            }
            for child in collection.children_of(parent_id)? {
                self.save_child(child).await?;
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(id = %folder.id))]
    async fn copy_folder(&mut self, folder: &Folder, options: CopyOptions) -> StoreResult<Folder> {
        let mut copy = folder.duplicate();
        copy.title = options.title_for(&folder.title);
        if let Some(parent_id) = options.parent_id {
            copy.parent_id = parent_id;
        }
        self.save_folder(&copy).await?;

        let mut queue: VecDeque<(&CollectionChild, &CollectionChild)> =
            folder.children.iter().zip(copy.children.iter()).collect();
        while let Some(pair) = queue.pop_front() {
            match pair {
                (CollectionChild::Folder(original), CollectionChild::Folder(duplicate)) => {
                    self.save_folder(duplicate).await?;
                    queue.extend(original.children.iter().zip(duplicate.children.iter()));
                }
                (CollectionChild::Request(original), CollectionChild::Request(duplicate)) => {
                    self.save_request(duplicate, None).await?;
                    if self.index.get(&original.id).is_some() {
                        self.copy_body(original, duplicate).await?;
                    }
                }
                _ => {
                    return Err(StoreError::Integrity(format!(
                        "copy of folder {} does not mirror the original",
                        folder.id
                    )));
                }
            }
        }
        Ok(copy)
    }

    #[instrument(level = "debug", skip_all, fields(id = %request.id))]
    async fn copy_request(&mut self, request: &TrufosRequest, options: CopyOptions) -> StoreResult<TrufosRequest> {
        self.indexed_path(&request.id)?;

        let mut copy = request.duplicate();
        copy.title = options.title_for(&request.title);
        if let Some(parent_id) = options.parent_id {
            copy.parent_id = parent_id;
        }
        self.save_request(&copy, None).await?;
        self.copy_body(request, &copy).await?;
        Ok(copy)
    }

    #[instrument(level = "debug", skip_all, fields(id = object.id()))]
    async fn delete(&mut self, object: ObjectRef<'_>) -> StoreResult<()> {
        self.indexed_path(object.id())?;
        self.delete_tree(object).await
    }

    async fn load_text_body(&mut self, request: &TrufosRequest) -> StoreResult<Option<ReadStream>> {
        match self.text_body_path(request).await? {
            Some(path) => Ok(Some(self.fs.open_read(&path).await?)),
            None => Ok(None),
        }
    }
}
