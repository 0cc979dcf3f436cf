//! Integration tests for the file system object store.
//!
//! These tests drive the public store API against a real directory tree and
//! check both the returned objects and what ends up on disk.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::tempdir;
use tokio::io::AsyncReadExt;

use trufos_application::ports::{CopyOptions, ObjectStore};
use trufos_application::{InfoFileError, StoreError};
use trufos_domain::persistence::{
    AuthorizationInformation, RequestBody, RequestMethod, SchemaVersion, TrufosUrl, VariableObject,
};
use trufos_domain::{Collection, CollectionChild, DomainError, Folder, ObjectRef, TrufosRequest};
use trufos_infrastructure::{AesGcmSecretCodec, FileSystemObjectStore, TokioFileSystem};

type Store = FileSystemObjectStore<TokioFileSystem, AesGcmSecretCodec>;

fn new_key() -> String {
    AesGcmSecretCodec::generate_key()
}

fn store_with_key(key: &str) -> Store {
    FileSystemObjectStore::new(
        TokioFileSystem::new(),
        AesGcmSecretCodec::from_base64(key).unwrap(),
    )
}

fn store() -> Store {
    store_with_key(&new_key())
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn text_request(parent_id: &str, title: &str, text: &str) -> TrufosRequest {
    TrufosRequest::new(parent_id, title)
        .with_url(TrufosUrl::parse_lenient("https://example.com/api?page=1"))
        .with_body(RequestBody::text(text, Some("text/plain".to_string())))
}

fn titles(children: &[CollectionChild]) -> Vec<&str> {
    children.iter().map(CollectionChild::title).collect()
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("my-collection");
    let mut store = store();

    let collection = Collection::new(&dir, "My Collection")
        .with_variable("host", VariableObject::new("example.com"));
    let folder = Folder::new(&collection.id, "Users");
    let request = TrufosRequest::new(&folder.id, "List Users")
        .with_method(RequestMethod::Post)
        .with_url(TrufosUrl::parse_lenient("https://{{host}}/users?limit=10"))
        .with_header("Accept", "application/json");
    let folder = folder.with_child(CollectionChild::Request(request));
    let collection = collection.with_child(CollectionChild::Folder(folder));

    store.save_collection(&collection, true).await.unwrap();

    assert!(dir.join("collection.json").is_file());
    assert_eq!(fs::read_to_string(dir.join(".gitignore")).unwrap().trim(), ".draft");
    assert!(dir.join("users").join("folder.json").is_file());
    assert!(dir.join("users").join("list-users").join("request.json").is_file());

    let mut fresh = store_with_key(&new_key());
    let loaded = fresh.load_collection(&dir, true).await.unwrap();
    assert_eq!(loaded, collection);

    let written = read_json(&dir.join("users").join("list-users").join("request.json"));
    assert_eq!(written["version"], SchemaVersion::CURRENT.to_string());
    assert_eq!(written["url"]["query"][0]["key"], "limit");
}

#[tokio::test]
async fn test_non_recursive_load_has_no_children() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let request = TrufosRequest::new(&collection.id, "Ping");
    let collection = collection.with_child(CollectionChild::Request(request));
    store.save_collection(&collection, true).await.unwrap();

    let loaded = store.load_collection(&dir, false).await.unwrap();
    assert_eq!(loaded.id, collection.id);
    assert!(loaded.children.is_empty());
}

#[tokio::test]
async fn test_directory_names_avoid_collisions() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let mut ids = Vec::new();
    for title in ["A B", "a b", "A-B"] {
        let request = TrufosRequest::new(&collection.id, title);
        store.save_request(&request, None).await.unwrap();
        ids.push(request.id);
    }

    let dirs: Vec<_> = ids
        .iter()
        .map(|id| store.indexed_path(id).unwrap().to_path_buf())
        .collect();
    assert_eq!(dirs, vec![dir.join("a-b"), dir.join("a-b-2"), dir.join("a-b-3")]);

    let mut on_disk: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_dir())
        .collect();
    on_disk.sort();
    assert_eq!(on_disk, dirs);

    // saving again keeps the directory already assigned
    let mut again = TrufosRequest::new(&collection.id, "A B");
    again.id = ids[1].clone();
    store.save_request(&again, None).await.unwrap();
    assert_eq!(store.indexed_path(&ids[1]).unwrap(), dir.join("a-b-2"));
}

#[tokio::test]
async fn test_unknown_parent_is_rejected() {
    let mut store = store();

    let request = TrufosRequest::new("no-such-parent", "Orphan");
    let result = store.save_request(&request, None).await;
    assert!(matches!(result, Err(StoreError::ParentNotIndexed { .. })));
}

#[tokio::test]
async fn test_children_are_loaded_in_index_order() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let mut first = TrufosRequest::new(&collection.id, "Zeta");
    first.index = Some(0);
    let mut second = TrufosRequest::new(&collection.id, "Alpha");
    second.index = Some(1);
    let unindexed = Folder::new(&collection.id, "Beta");
    let collection = collection
        .with_child(CollectionChild::Folder(unindexed))
        .with_child(CollectionChild::Request(second))
        .with_child(CollectionChild::Request(first));
    store.save_collection(&collection, true).await.unwrap();

    let loaded = store.load_collection(&dir, true).await.unwrap();
    assert_eq!(titles(&loaded.children), vec!["Zeta", "Alpha", "Beta"]);
}

#[tokio::test]
async fn test_secrets_are_encrypted_and_restored() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let key = new_key();
    let mut store = store_with_key(&key);

    let collection = Collection::new(&dir, "C")
        .with_variable("token", VariableObject::secret("s3cr3t"))
        .with_variable("host", VariableObject::new("example.com"))
        .with_auth(AuthorizationInformation::bearer("{{token}}"));
    let request = TrufosRequest::new(&collection.id, "Login")
        .with_auth(AuthorizationInformation::basic("admin", "hunter2"));
    let collection = collection.with_child(CollectionChild::Request(request));
    store.save_collection(&collection, true).await.unwrap();

    let plain = fs::read_to_string(dir.join("collection.json")).unwrap();
    assert!(!plain.contains("s3cr3t"));
    assert!(!plain.contains("bearer"));
    let info = read_json(&dir.join("collection.json"));
    assert_eq!(info["variables"]["token"]["value"], "");
    assert_eq!(info["variables"]["token"]["secret"], true);
    assert_eq!(info["variables"]["host"]["value"], "example.com");

    let request_plain = fs::read_to_string(dir.join("login").join("request.json")).unwrap();
    assert!(!request_plain.contains("hunter2"));

    let secrets = fs::read(dir.join(".secrets.bin")).unwrap();
    assert!(secrets.starts_with(b"TRUFOS-SECRETS-V1"));
    assert!(dir.join("login").join(".secrets.bin").is_file());

    let loaded = store_with_key(&key).load_collection(&dir, true).await.unwrap();
    assert_eq!(loaded, collection);

    let wrong_key = store_with_key(&new_key()).load_collection(&dir, true).await;
    assert!(matches!(
        wrong_key,
        Err(StoreError::InfoFile(InfoFileError::Secrets { .. }))
    ));
}

#[tokio::test]
async fn test_secrets_file_removed_when_nothing_is_secret() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let mut collection =
        Collection::new(&dir, "C").with_auth(AuthorizationInformation::bearer("abc"));
    store.save_collection(&collection, true).await.unwrap();
    assert!(dir.join(".secrets.bin").is_file());

    collection.auth = None;
    store.save_collection(&collection, false).await.unwrap();
    assert!(!dir.join(".secrets.bin").exists());
}

#[tokio::test]
async fn test_draft_is_isolated_until_saved() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let mut request = text_request(&collection.id, "Echo", "original");
    store.save_request(&request, None).await.unwrap();
    let request_dir = dir.join("echo");
    assert_eq!(
        fs::read_to_string(request_dir.join("request-body.txt")).unwrap(),
        "original"
    );

    request.draft = true;
    request.url = TrufosUrl::new("https://example.com/edited");
    store.save_request(&request, Some("edited")).await.unwrap();

    let primary = read_json(&request_dir.join("request.json"));
    assert_eq!(primary["url"]["base"], "https://example.com/api");
    assert_eq!(
        fs::read_to_string(request_dir.join("request-body.txt")).unwrap(),
        "original"
    );

    let loaded = store.load_collection(&dir, true).await.unwrap();
    let CollectionChild::Request(mut loaded_request) = loaded.children[0].clone() else {
        panic!("expected a request");
    };
    assert!(loaded_request.draft);
    assert_eq!(loaded_request.id, request.id);
    assert_eq!(loaded_request.url.base, "https://example.com/edited");
    assert_eq!(
        store.load_text_body_string(&loaded_request).await.unwrap().as_deref(),
        Some("edited")
    );

    store.save_changes(&mut loaded_request).await.unwrap();
    assert!(!loaded_request.draft);
    assert!(!request_dir.join(".draft").exists());
    assert_eq!(
        read_json(&request_dir.join("request.json"))["url"]["base"],
        "https://example.com/edited"
    );
    assert_eq!(
        fs::read_to_string(request_dir.join("request-body.txt")).unwrap(),
        "edited"
    );
}

#[tokio::test]
async fn test_discard_changes_restores_primary() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let mut request = text_request(&collection.id, "Echo", "original");
    store.save_request(&request, None).await.unwrap();

    request.draft = true;
    request.method = RequestMethod::Delete;
    store.save_request(&request, Some("scratch")).await.unwrap();
    assert!(dir.join("echo").join(".draft").join("request.json").is_file());

    store.discard_changes(&mut request).await.unwrap();
    assert!(!request.draft);
    assert_eq!(request.method, RequestMethod::Get);
    assert!(!dir.join("echo").join(".draft").exists());
    assert_eq!(
        store.load_text_body_string(&request).await.unwrap().as_deref(),
        Some("original")
    );

    // without a draft both operations leave the request alone
    store.discard_changes(&mut request).await.unwrap();
    store.save_changes(&mut request).await.unwrap();
    assert_eq!(request.method, RequestMethod::Get);
}

#[tokio::test]
async fn test_load_text_body_streams_file() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let request = text_request(&collection.id, "Body", "{\"a\": 1}");
    store.save_request(&request, None).await.unwrap();
    let info = read_json(&dir.join("body").join("request.json"));
    assert!(info["body"].get("text").is_none());

    let mut stream = store.load_text_body(&request).await.unwrap().unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).await.unwrap();
    assert_eq!(text, "{\"a\": 1}");

    let empty = TrufosRequest::new(&collection.id, "Empty");
    store.save_request(&empty, None).await.unwrap();
    assert!(store.load_text_body(&empty).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_body_removes_stale_text_body() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let mut request = text_request(&collection.id, "Upload", "old text");
    store.save_request(&request, None).await.unwrap();
    assert!(dir.join("upload").join("request-body.txt").is_file());

    request.body = RequestBody::file("/data/payload.bin");
    store.save_request(&request, None).await.unwrap();
    assert!(!dir.join("upload").join("request-body.txt").exists());
    assert_eq!(
        read_json(&dir.join("upload").join("request.json"))["body"]["type"],
        "file"
    );
}

#[tokio::test]
async fn test_rename_folder_moves_directory_and_descendants() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let folder = Folder::new(&collection.id, "Old Name");
    let folder_id = folder.id.clone();
    let request = TrufosRequest::new(&folder.id, "Inner");
    let request_id = request.id.clone();
    let folder = folder.with_child(CollectionChild::Request(request));
    let mut collection = collection.with_child(CollectionChild::Folder(folder));
    store.save_collection(&collection, true).await.unwrap();

    let child = collection.find_child_mut(&folder_id).unwrap();
    store.rename(child.as_object_mut(), "New Name").await.unwrap();

    assert_eq!(collection.find_child(&folder_id).unwrap().title(), "New Name");
    assert!(!dir.join("old-name").exists());
    assert_eq!(
        read_json(&dir.join("new-name").join("folder.json"))["title"],
        "New Name"
    );
    assert_eq!(
        store.indexed_path(&request_id).unwrap(),
        dir.join("new-name").join("inner")
    );

    let loaded = store.load_collection(&dir, true).await.unwrap();
    assert_eq!(loaded, collection);
}

#[tokio::test]
async fn test_rename_collection_keeps_directory() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let mut collection = Collection::new(&dir, "Before");
    store.save_collection(&collection, true).await.unwrap();

    store
        .rename(trufos_domain::ObjectMut::Collection(&mut collection), "After")
        .await
        .unwrap();
    assert_eq!(collection.title, "After");
    assert_eq!(read_json(&dir.join("collection.json"))["title"], "After");
}

#[tokio::test]
async fn test_move_request_between_folders() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let source = Folder::new(&collection.id, "Source");
    let target = Folder::new(&collection.id, "Target");
    let target_id = target.id.clone();
    let request = text_request(&source.id, "Mover", "payload");
    let request_id = request.id.clone();
    let source = source.with_child(CollectionChild::Request(request));
    let mut collection = collection
        .with_child(CollectionChild::Folder(source))
        .with_child(CollectionChild::Folder(target));
    store.save_collection(&collection, true).await.unwrap();

    store
        .move_child(&mut collection, &request_id, &target_id)
        .await
        .unwrap();

    assert_eq!(collection.parent_id_of(&request_id), Some(target_id.as_str()));
    assert!(!dir.join("source").join("mover").exists());
    assert_eq!(
        fs::read_to_string(dir.join("target").join("mover").join("request-body.txt")).unwrap(),
        "payload"
    );
    assert_eq!(
        store.indexed_path(&request_id).unwrap(),
        dir.join("target").join("mover")
    );

    let loaded = store.load_collection(&dir, true).await.unwrap();
    let moved = loaded.find_child(&request_id).unwrap();
    assert_eq!(moved.parent_id(), target_id);
}

#[tokio::test]
async fn test_move_folder_into_itself_is_rejected() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let outer = Folder::new(&collection.id, "Outer");
    let outer_id = outer.id.clone();
    let inner = Folder::new(&outer.id, "Inner");
    let inner_id = inner.id.clone();
    let outer = outer.with_child(CollectionChild::Folder(inner));
    let mut collection = collection.with_child(CollectionChild::Folder(outer));
    store.save_collection(&collection, true).await.unwrap();

    let result = store.move_child(&mut collection, &outer_id, &inner_id).await;
    assert!(matches!(
        result,
        Err(StoreError::Domain(DomainError::InvalidMove { .. }))
    ));
    assert!(dir.join("outer").join("inner").join("folder.json").is_file());
}

#[tokio::test]
async fn test_reorder_item_persists_indexes() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let collection_id = collection.id.clone();
    let a = TrufosRequest::new(&collection.id, "A");
    let b = TrufosRequest::new(&collection.id, "B");
    let c = TrufosRequest::new(&collection.id, "C");
    let c_id = c.id.clone();
    let mut collection = collection
        .with_child(CollectionChild::Request(a))
        .with_child(CollectionChild::Request(b))
        .with_child(CollectionChild::Request(c));
    store.save_collection(&collection, true).await.unwrap();

    store
        .reorder_item(&mut collection, &c_id, &collection_id, 0)
        .await
        .unwrap();

    assert_eq!(titles(&collection.children), vec!["C", "A", "B"]);
    assert_eq!(read_json(&dir.join("c").join("request.json"))["index"], 0);
    assert_eq!(read_json(&dir.join("b").join("request.json"))["index"], 2);

    let loaded = store.load_collection(&dir, true).await.unwrap();
    assert_eq!(titles(&loaded.children), vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_reorder_into_another_folder() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let folder = Folder::new(&collection.id, "Folder");
    let folder_id = folder.id.clone();
    let existing = TrufosRequest::new(&folder.id, "Existing");
    let folder = folder.with_child(CollectionChild::Request(existing));
    let loose = TrufosRequest::new(&collection.id, "Loose");
    let loose_id = loose.id.clone();
    let mut collection = collection
        .with_child(CollectionChild::Folder(folder))
        .with_child(CollectionChild::Request(loose));
    store.save_collection(&collection, true).await.unwrap();

    store
        .reorder_item(&mut collection, &loose_id, &folder_id, 0)
        .await
        .unwrap();

    assert_eq!(
        titles(collection.children_of(&folder_id).unwrap()),
        vec!["Loose", "Existing"]
    );
    assert!(dir.join("folder").join("loose").join("request.json").is_file());

    let loaded = store.load_collection(&dir, true).await.unwrap();
    assert_eq!(
        titles(loaded.children_of(&folder_id).unwrap()),
        vec!["Loose", "Existing"]
    );
}

#[tokio::test]
async fn test_copy_request_duplicates_body() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let request = text_request(&collection.id, "Source", "body text");
    store.save_request(&request, None).await.unwrap();

    let copy = store
        .copy_request(&request, CopyOptions::default())
        .await
        .unwrap();

    assert_ne!(copy.id, request.id);
    assert_eq!(copy.title, "Source (Copy)");
    assert_eq!(store.indexed_path(&copy.id).unwrap(), dir.join("source-copy"));
    assert_eq!(
        store.load_text_body_string(&copy).await.unwrap().as_deref(),
        Some("body text")
    );

    let named = store
        .copy_request(&request, CopyOptions::default().with_title("Renamed"))
        .await
        .unwrap();
    assert_eq!(named.title, "Renamed");
    assert!(dir.join("renamed").join("request.json").is_file());
}

#[tokio::test]
async fn test_copy_folder_duplicates_subtree() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let folder = Folder::new(&collection.id, "Users");
    let nested = Folder::new(&folder.id, "Admins");
    let request = text_request(&nested.id, "Promote", "{}");
    let nested = nested.with_child(CollectionChild::Request(request));
    let folder = folder.with_child(CollectionChild::Folder(nested));
    let collection = collection.with_child(CollectionChild::Folder(folder.clone()));
    store.save_collection(&collection, true).await.unwrap();

    let copy = store
        .copy_folder(&folder, CopyOptions::default())
        .await
        .unwrap();

    assert_ne!(copy.id, folder.id);
    assert_eq!(copy.title, "Users (Copy)");
    let copy_dir = dir.join("users-copy");
    assert!(copy_dir.join("folder.json").is_file());
    assert_eq!(
        fs::read_to_string(copy_dir.join("admins").join("promote").join("request-body.txt"))
            .unwrap(),
        "{}"
    );

    let CollectionChild::Folder(nested_copy) = &copy.children[0] else {
        panic!("expected a folder");
    };
    assert_eq!(nested_copy.parent_id, copy.id);
    assert_ne!(nested_copy.id, folder.children[0].id());
}

#[tokio::test]
async fn test_delete_removes_directory_and_index_entries() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    let folder = Folder::new(&collection.id, "Doomed");
    let request = TrufosRequest::new(&folder.id, "Inside");
    let request_id = request.id.clone();
    let folder = folder.with_child(CollectionChild::Request(request));
    let collection = collection.with_child(CollectionChild::Folder(folder.clone()));
    store.save_collection(&collection, true).await.unwrap();

    store.delete(ObjectRef::Folder(&folder)).await.unwrap();

    assert!(!dir.join("doomed").exists());
    assert!(matches!(
        store.indexed_path(&folder.id),
        Err(StoreError::NotIndexed(_))
    ));
    assert!(matches!(
        store.indexed_path(&request_id),
        Err(StoreError::NotIndexed(_))
    ));
    assert!(dir.join("collection.json").is_file());
}

#[tokio::test]
async fn test_legacy_collection_is_migrated_on_load() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("legacy");
    let request_dir = dir.join("old-folder").join("ping");
    fs::create_dir_all(&request_dir).unwrap();

    fs::write(
        dir.join("collection.json"),
        r#"{"version": "1.0.0", "title": "Legacy", "variables": {}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("old-folder").join("folder.json"),
        r#"{"version": "1.0.0", "title": "Old Folder"}"#,
    )
    .unwrap();
    fs::write(
        request_dir.join("request.json"),
        r#"{
            "version": "1.0.0",
            "title": "Ping",
            "url": "https://example.com/ping?a=1&b",
            "method": "GET",
            "headers": [],
            "body": {"type": "text", "mimeType": "text/plain"}
        }"#,
    )
    .unwrap();
    fs::write(request_dir.join("request-body.txt"), "saved").unwrap();
    fs::write(
        request_dir.join("~request.json"),
        r#"{
            "version": "1.0.0",
            "title": "Ping",
            "url": "https://example.com/ping?a=2",
            "method": "POST",
            "headers": [],
            "body": {"type": "text", "mimeType": "text/plain"}
        }"#,
    )
    .unwrap();
    fs::write(request_dir.join("~request-body.txt"), "unsaved").unwrap();

    let mut store = store();
    let collection = store.load_collection(&dir, true).await.unwrap();

    assert_eq!(collection.title, "Legacy");
    assert!(collection.environments.is_empty());
    assert!(dir.join(".gitignore").is_file());

    let CollectionChild::Folder(folder) = &collection.children[0] else {
        panic!("expected a folder");
    };
    assert_eq!(folder.title, "Old Folder");
    let CollectionChild::Request(request) = &folder.children[0] else {
        panic!("expected a request");
    };
    assert!(request.draft);
    assert_eq!(request.method, RequestMethod::Post);
    assert_eq!(request.url.base, "https://example.com/ping");
    assert_eq!(request.url.query[0].value, "2");

    assert!(!request_dir.join("~request.json").exists());
    assert!(!request_dir.join("~request-body.txt").exists());
    assert_eq!(
        fs::read_to_string(request_dir.join(".draft").join("request-body.txt")).unwrap(),
        "unsaved"
    );

    let current = SchemaVersion::CURRENT.to_string();
    for path in [
        dir.join("collection.json"),
        dir.join("old-folder").join("folder.json"),
        request_dir.join("request.json"),
        request_dir.join(".draft").join("request.json"),
    ] {
        let written = read_json(&path);
        assert_eq!(written["version"], current, "{}", path.display());
        assert!(written["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    let primary = read_json(&request_dir.join("request.json"));
    assert_eq!(primary["url"]["query"][0]["key"], "a");
    assert_eq!(primary["url"]["query"][1]["key"], "b");
    assert_eq!(primary["url"]["query"][1]["value"], "");

    // a second load finds everything current and keeps the ids
    let reloaded = store.load_collection(&dir, true).await.unwrap();
    assert_eq!(reloaded, collection);
}

#[tokio::test]
async fn test_newer_version_is_rejected() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("future");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("collection.json"),
        r#"{"version": "99.0.0", "id": "x", "title": "Future", "variables": {}, "environments": {}}"#,
    )
    .unwrap();

    let err = store().load_collection(&dir, true).await.unwrap_err();
    assert!(err.to_string().contains("99.0.0"), "{err}");
}

#[tokio::test]
async fn test_open_or_bootstrap_creates_default_collection() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("fresh");
    let mut store = store();

    let created = store.open_or_bootstrap(&dir).await.unwrap();
    assert!(dir.join("collection.json").is_file());
    assert_eq!(created.children.len(), 1);

    let CollectionChild::Request(example) = &created.children[0] else {
        panic!("expected a request");
    };
    let body = store.load_text_body_string(example).await.unwrap();
    assert!(body.is_some_and(|text| text.contains("foo")));

    let opened = store.open_or_bootstrap(&dir).await.unwrap();
    assert_eq!(opened.id, created.id);
    assert_eq!(opened.children[0].id(), example.id);
}

#[tokio::test]
async fn test_legacy_draft_keeps_id_after_save_changes() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("legacy");
    let request_dir = dir.join("ping");
    fs::create_dir_all(&request_dir).unwrap();

    fs::write(
        dir.join("collection.json"),
        r#"{"version": "1.0.0", "title": "Legacy", "variables": {}}"#,
    )
    .unwrap();
    let record = |url: &str| {
        format!(
            r#"{{"version": "1.0.0", "title": "Ping", "url": "{url}", "method": "GET",
                "headers": [], "body": {{"type": "text"}}}}"#
        )
    };
    fs::write(request_dir.join("request.json"), record("https://example.com/saved")).unwrap();
    fs::write(request_dir.join("~request.json"), record("https://example.com/draft")).unwrap();

    let mut store = store();
    let collection = store.load_collection(&dir, true).await.unwrap();
    let CollectionChild::Request(mut request) = collection.children[0].clone() else {
        panic!("expected a request");
    };
    assert!(request.draft);

    let primary_id = read_json(&request_dir.join("request.json"))["id"].clone();
    assert_eq!(primary_id, request.id.as_str());
    assert_eq!(
        read_json(&request_dir.join(".draft").join("request.json"))["id"],
        primary_id
    );

    store.save_changes(&mut request).await.unwrap();

    let reloaded = store_with_key(&new_key())
        .load_collection(&dir, true)
        .await
        .unwrap();
    let CollectionChild::Request(reloaded_request) = &reloaded.children[0] else {
        panic!("expected a request");
    };
    assert_eq!(reloaded_request.id, request.id);
    assert_eq!(reloaded_request.url.base, "https://example.com/draft");
    assert!(!reloaded_request.draft);
}

#[tokio::test]
async fn test_save_request_without_body_keeps_body_file() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let request = TrufosRequest::new(&collection.id, "Echo");
    let body_path = dir.join("echo").join("request-body.txt");
    store.save_request(&request, Some("kept")).await.unwrap();
    assert_eq!(fs::read_to_string(&body_path).unwrap(), "kept");

    store.save_request(&request, None).await.unwrap();
    assert_eq!(fs::read_to_string(&body_path).unwrap(), "kept");

    store.save_request(&request, Some("")).await.unwrap();
    assert!(body_path.is_file());
    assert_eq!(fs::read_to_string(&body_path).unwrap(), "");
}

#[tokio::test]
async fn test_supplied_text_replaces_file_body() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("c");
    let mut store = store();

    let collection = Collection::new(&dir, "C");
    store.save_collection(&collection, true).await.unwrap();

    let request = TrufosRequest::new(&collection.id, "Upload").with_body(RequestBody::File {
        file_path: "/data/payload.bin".to_string(),
        mime_type: Some("application/octet-stream".to_string()),
    });
    store.save_request(&request, Some("x")).await.unwrap();

    let info = read_json(&dir.join("upload").join("request.json"));
    assert_eq!(info["body"]["type"], "text");
    assert_eq!(info["body"]["mimeType"], "application/octet-stream");
    assert!(info["body"].get("filePath").is_none());
    assert_eq!(
        fs::read_to_string(dir.join("upload").join("request-body.txt")).unwrap(),
        "x"
    );
}
