//! Target discovery: turns the positional path argument into the list of
//! files to repair.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// Resolves `target` into the files to process.
///
/// A file path is taken as-is regardless of extension; a directory is walked
/// recursively and filtered to `ext`. The list is sorted so runs are
/// deterministic.
pub fn collect_targets(target: &Utf8Path, ext: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let meta = fs::metadata(target).with_context(|| format!("stat {}", target))?;

    if meta.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    walk(target, ext, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Utf8Path, ext: &str, files: &mut Vec<Utf8PathBuf>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir))? {
        let entry = entry.with_context(|| format!("read dir entry in {}", dir))?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| anyhow::anyhow!("non-UTF-8 path {}", p.display()))?;
        let file_type = entry.file_type().with_context(|| format!("stat {}", path))?;

        if file_type.is_dir() {
            walk(&path, ext, files)?;
        } else if file_type.is_file() && path.extension() == Some(ext) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8")
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let file = root.join("notes.txt");
        std::fs::write(&file, "").expect("write");

        let got = collect_targets(&file, "rs").expect("collect");
        assert_eq!(got, vec![file]);
    }

    #[test]
    fn directory_walk_filters_by_extension_and_sorts() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        std::fs::create_dir(root.join("nested")).expect("mkdir");
        for name in ["b.rs", "a.rs", "skip.txt", "nested/c.rs"] {
            std::fs::write(root.join(name), "").expect("write");
        }

        let got = collect_targets(&root, "rs").expect("collect");
        assert_eq!(
            got,
            vec![root.join("a.rs"), root.join("b.rs"), root.join("nested/c.rs")]
        );
    }

    #[test]
    fn missing_target_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let missing = utf8_root(&temp).join("absent");
        let err = collect_targets(&missing, "rs").expect_err("missing");
        assert!(err.to_string().contains("absent"));
    }
}
