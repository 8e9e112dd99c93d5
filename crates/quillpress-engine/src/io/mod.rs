//! Content directory IO: enumerate post sources and load them into posts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::post::{self, Post, PostError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("content directory not found: {0}")]
    InvalidContentDir(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load {path}: {source}")]
    Post { path: PathBuf, source: PostError },
}

/// Recursively enumerates `.md` sources under `content_root`, sorted by path.
pub fn scan_post_files(content_root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !content_root.is_dir() {
        return Err(LoadError::InvalidContentDir(content_root.to_path_buf()));
    }
    let mut files = Vec::new();
    scan_directory_recursive(content_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Loads every post under `content_root`, newest first.
///
/// The first source that fails to parse aborts the load, with the failure
/// attributed to its path.
pub fn load_posts(content_root: &Path) -> Result<Vec<Post>, LoadError> {
    let files = scan_post_files(content_root)?;
    debug!(count = files.len(), "loading post sources");
    let mut posts = Vec::with_capacity(files.len());
    for path in files {
        let post = Post::from_file(&path).map_err(|source| LoadError::Post {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), permalink = post.permalink(), "loaded post");
        posts.push(post);
    }
    post::sort_by_created(&mut posts);
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str) {
        let source = format!("```toml\ntitle = \"{title}\"\ndate = \"{date}\"\n```\nbody\n");
        fs::write(dir.join(name), source).unwrap();
    }

    #[test]
    fn scan_finds_nested_sources() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "a.md", "A", "2024-01-01 00:00:00");
        fs::create_dir(root.path().join("drafts")).unwrap();
        write_post(&root.path().join("drafts"), "b.md", "B", "2024-01-02 00:00:00");
        fs::write(root.path().join("notes.txt"), "not a post").unwrap();

        let files = scan_post_files(root.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "md"));
    }

    #[test]
    fn missing_content_dir_errors() {
        let err = scan_post_files(Path::new("/does/not/exist")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidContentDir(_)));
    }

    #[test]
    fn load_posts_sorts_newest_first() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "old.md", "Old", "2023-05-01 09:00:00");
        write_post(root.path(), "new.md", "New", "2024-05-01 09:00:00");

        let posts = load_posts(root.path()).unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[test]
    fn load_failure_names_the_offending_file() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "good.md", "Good", "2024-05-01 09:00:00");
        fs::write(root.path().join("bad.md"), "no front matter here\n").unwrap();

        let err = load_posts(root.path()).unwrap_err();
        match err {
            LoadError::Post { path, .. } => {
                assert!(path.ends_with("bad.md"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
