use assert_cmd::Command;
use git2::{Repository, Signature};
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

#[allow(dead_code)]
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn setup_test_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
            .is_test(true)
            .init();
    });
}

/// Repository with a configured user and one commit containing `README.md`.
#[allow(dead_code)]
pub fn setup_test_repo() -> (TempDir, Repository) {
    setup_test_env();

    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let repo = Repository::init(dir.path()).expect("Failed to initialize git repository");
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    std::fs::write(dir.path().join("README.md"), "# test\n").unwrap();
    stage(&repo, "README.md");
    commit(&repo, "Initial commit");

    (dir, repo)
}

#[allow(dead_code)]
pub fn stage(repo: &Repository, path: &str) {
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
}

#[allow(dead_code)]
pub fn commit(repo: &Repository, message: &str) {
    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents = parent.iter().collect::<Vec<_>>();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap();
}

#[allow(dead_code)]
pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

#[allow(dead_code)]
pub fn head_message(repo: &Repository) -> String {
    repo.head()
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .message()
        .unwrap()
        .to_string()
}

/// The binary running inside `dir`, isolated from the user's configuration.
#[allow(dead_code)]
pub fn gitrecipe(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitrecipe").unwrap();
    cmd.current_dir(dir)
        .env("RUST_LOG", "off")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir);
    cmd
}
