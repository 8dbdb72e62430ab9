//! Integration tests for the typed repository over a file-backed cache.

use serde::{Deserialize, Serialize};
use tempfile::tempdir;

use satchel::cache::{Cache, FileBackend};
use satchel::repository::{Entity, Repository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Article {
    id: String,
    title: String,
    published: bool,
}

impl Entity for Article {
    fn id(&self) -> &str {
        &self.id
    }
    fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }
}

fn article(title: &str, published: bool) -> Article {
    Article { id: String::new(), title: title.to_string(), published }
}

fn repo_at(path: &std::path::Path) -> Repository<Article> {
    Repository::new(Cache::new(Box::new(FileBackend::new(path))).with_namespace("article"))
}

#[test]
fn entities_survive_a_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repo.json");

    let mut repo = repo_at(&path);
    let saved = repo.save(article("Hello", true)).unwrap();
    repo.save(article("Draft", false)).unwrap();
    repo.flush().unwrap();

    let mut reopened = repo_at(&path);
    assert_eq!(reopened.count(), 2);
    let found = reopened.find(&saved.id).unwrap().unwrap();
    assert_eq!(found.title, "Hello");

    let published = reopened.find_where(|a| a.published).unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title, "Hello");
}

#[test]
fn remove_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repo.json");

    let mut repo = repo_at(&path);
    let saved = repo.save(article("Gone", true)).unwrap();
    repo.flush().unwrap();

    let mut repo = repo_at(&path);
    assert!(repo.remove(&saved.id));
    repo.flush().unwrap();

    let mut reopened = repo_at(&path);
    assert_eq!(reopened.count(), 0);
    assert_eq!(reopened.find(&saved.id).unwrap(), None);
}
