#![allow(dead_code)]

use git2::{Commit, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Throwaway repository with `file` committed and tagged `v1.0.0`
pub struct TestRepo {
    dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let test_repo = TestRepo { dir, repo };

        fs::create_dir(test_repo.path().join("dir")).unwrap();
        fs::create_dir(test_repo.path().join("stage")).unwrap();
        test_repo.write("dir/.keep", "");
        test_repo.write("stage/.keep", "");
        test_repo.commit("file", "0", "initial");
        test_repo.tag("v1.0.0");
        test_repo
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    fn write(&self, file: &str, content: &str) {
        fs::write(self.path().join(file), content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
    }

    /// Write and stage a change without committing it
    pub fn make_dirty(&self, file: &str, content: &str) {
        self.write(file, content);
    }

    pub fn commit(&self, file: &str, content: &str, message: &str) {
        self.write(file, content);

        let mut index = self.repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap();
    }

    /// Lightweight tag at HEAD
    pub fn tag(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .unwrap();
    }

    pub fn head_id(&self) -> String {
        self.repo
            .head()
            .unwrap()
            .peel_to_commit()
            .unwrap()
            .id()
            .to_string()
    }

    pub fn branch_name(&self) -> String {
        self.repo.head().unwrap().shorthand().unwrap().to_string()
    }
}
