//! Default collection bootstrapper.
//!
//! Produces the tree written when a user opens a directory that holds no
//! collection yet.

use std::path::Path;

use trufos_domain::persistence::{RequestBody, RequestMethod, TrufosUrl};
use trufos_domain::{Collection, CollectionChild, TrufosRequest};

/// Title of the bootstrapped collection.
pub const DEFAULT_COLLECTION_TITLE: &str = "Default Collection";

/// Builds the default collection rooted at `dir`.
#[must_use]
pub fn default_collection(dir: &Path) -> Collection {
    let collection = Collection::new(dir, DEFAULT_COLLECTION_TITLE);
    let example = TrufosRequest::new(&collection.id, "Example Request")
        .with_method(RequestMethod::Post)
        .with_url(TrufosUrl::parse_lenient(
            "https://echo.zuplo.io/api?foo=bar",
        ))
        .with_header("Content-Type", "application/json")
        .with_body(RequestBody::text(
            "{\n  \"foo\": \"bar\"\n}\n",
            Some("application/json".to_string()),
        ));

    collection.with_child(CollectionChild::Request(example))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection_has_example_request() {
        let collection = default_collection(Path::new("/tmp/default"));
        assert_eq!(collection.title, DEFAULT_COLLECTION_TITLE);
        assert_eq!(collection.children.len(), 1);
        assert_eq!(collection.children[0].parent_id(), collection.id);
        assert!(collection.children[0].title().starts_with("Example"));
    }
}
