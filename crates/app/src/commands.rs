use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tokio::io::AsyncWriteExt;
use tracing::info;
use trufos_application::ports::ObjectStore;
use trufos_domain::persistence::COLLECTION_FILE;
use trufos_domain::{Collection, CollectionChild, EngineSettings};
use trufos_infrastructure::{
    AesGcmSecretCodec, FileSystemObjectStore, SettingsRepository, TokioFileSystem,
};

use crate::cli::{Cli, Command, DirArgs};

const COLLECTION_DIR_ENV: &str = "TRUFOS_COLLECTION_DIR";

type Store = FileSystemObjectStore<TokioFileSystem, AesGcmSecretCodec>;

pub async fn run_command(
    cli: Cli,
    settings_repo: &SettingsRepository,
    settings: &EngineSettings,
) -> anyhow::Result<()> {
    let mut store = open_store(settings_repo, settings).await?;
    match cli.command {
        Command::Init(args) => cmd_init(&mut store, &resolve_dir(args, settings)?).await,
        Command::Load(args) => cmd_load(&mut store, &resolve_dir(args, settings)?).await,
        Command::Migrate(args) => cmd_migrate(&mut store, &resolve_dir(args, settings)?).await,
    }
}

async fn cmd_init(store: &mut Store, dir: &Path) -> anyhow::Result<()> {
    if dir.join(COLLECTION_FILE).exists() {
        bail!("{} already holds a collection", dir.display());
    }
    let collection = store
        .create_default_collection(dir)
        .await
        .with_context(|| format!("failed to initialize {}", dir.display()))?;
    println!("Initialized \"{}\" in {}", collection.title, dir.display());
    Ok(())
}

async fn cmd_load(store: &mut Store, dir: &Path) -> anyhow::Result<()> {
    let collection = store
        .load_collection(dir, true)
        .await
        .with_context(|| format!("failed to load {}", dir.display()))?;
    print!("{}", render_tree(&collection));
    Ok(())
}

async fn cmd_migrate(store: &mut Store, dir: &Path) -> anyhow::Result<()> {
    let collection = store
        .load_collection(dir, true)
        .await
        .with_context(|| format!("failed to load {}", dir.display()))?;
    store
        .save_collection(&collection, true)
        .await
        .with_context(|| format!("failed to save {}", dir.display()))?;
    info!(dir = %dir.display(), "collection written at the current version");
    println!("Migrated \"{}\"", collection.title);
    Ok(())
}

fn resolve_dir(args: DirArgs, settings: &EngineSettings) -> anyhow::Result<PathBuf> {
    args.dir
        .or_else(|| std::env::var_os(COLLECTION_DIR_ENV).map(PathBuf::from))
        .or_else(|| settings.default_collection_dir.clone())
        .context("no collection directory given and no default configured")
}

async fn open_store(
    settings_repo: &SettingsRepository,
    settings: &EngineSettings,
) -> anyhow::Result<Store> {
    let key_path = settings_repo
        .secret_key_path(settings)
        .context("could not determine the secret key location")?;
    let codec = load_or_create_key(&key_path).await?;
    Ok(FileSystemObjectStore::new(TokioFileSystem::new(), codec))
}

/// Reads the base64 key at `path`, writing a freshly generated one first if
/// the file is missing.
async fn load_or_create_key(path: &Path) -> anyhow::Result<AesGcmSecretCodec> {
    let encoded = match tokio::fs::read_to_string(path).await {
        Ok(encoded) => encoded,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let key = AesGcmSecretCodec::generate_key();
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            write_key_file(path, &key)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "generated secret key");
            key
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    AesGcmSecretCodec::from_base64(encoded.trim())
        .with_context(|| format!("invalid secret key in {}", path.display()))
}

/// Creates the key file readable by its owner only.
async fn write_key_file(path: &Path, key: &str) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(key.as_bytes()).await?;
    file.flush().await
}

fn render_tree(collection: &Collection) -> String {
    let mut out = format!("{} [{}]\n", collection.title, collection.id);
    render_children(&collection.children, 1, &mut out);
    out
}

fn render_children(children: &[CollectionChild], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for child in children {
        match child {
            CollectionChild::Folder(folder) => {
                let _ = writeln!(out, "{indent}{}/", folder.title);
                render_children(&folder.children, depth + 1, out);
            }
            CollectionChild::Request(request) => {
                let marker = if request.draft { " *" } else { "" };
                let _ = writeln!(
                    out,
                    "{indent}{} {}{marker}",
                    request.method, request.url.base
                );
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trufos_domain::{Folder, TrufosRequest};

    #[test]
    fn test_render_tree() {
        let collection = Collection::new("/tmp/c", "Demo");
        let folder = Folder::new(&collection.id, "Users");
        let request = TrufosRequest::new(&folder.id, "List")
            .with_url(trufos_domain::persistence::TrufosUrl::new("https://example.com/users"));
        let folder = folder.with_child(CollectionChild::Request(request));
        let collection = collection.with_child(CollectionChild::Folder(folder));

        let tree = render_tree(&collection);
        let lines: Vec<&str> = tree.lines().skip(1).collect();
        assert_eq!(lines, vec!["  Users/", "    GET https://example.com/users"]);
    }

    #[test]
    fn test_resolve_dir_prefers_argument() {
        let settings = EngineSettings {
            default_collection_dir: Some(PathBuf::from("/from/settings")),
            ..EngineSettings::default()
        };
        let args = DirArgs {
            dir: Some(PathBuf::from("/from/args")),
        };
        assert_eq!(
            resolve_dir(args, &settings).unwrap(),
            PathBuf::from("/from/args")
        );
    }

    #[tokio::test]
    async fn test_key_is_created_once() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("keys").join("secret.key");

        load_or_create_key(&path).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        load_or_create_key(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_key_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("secret.key");

        load_or_create_key(&path).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
