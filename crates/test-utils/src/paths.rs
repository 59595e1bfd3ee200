//! Locating optional data files and scratch directories for tests.

use std::path::{Path, PathBuf};

/// Environment variable naming an extra directory of data files.
pub const TEST_DATA_ENV: &str = "TEST_DATA_DIR";

/// The workspace directory, two levels above this crate.
pub fn workspace_root() -> PathBuf {
    let crate_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .ancestors()
        .nth(2)
        .unwrap_or(crate_dir)
        .to_path_buf()
}

/// Directories searched by [`find_test_file`], in order.
pub fn test_data_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    std::env::var_os(TEST_DATA_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain([root.join("testdata"), root.clone()])
        .collect()
}

/// First existing `dir/name` over [`test_data_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    test_data_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// A scratch directory named `<prefix>XXXX`, removed on drop.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    match tempfile::Builder::new().prefix(prefix).tempdir() {
        Ok(dir) => dir,
        Err(e) => panic!("cannot create scratch directory {}*: {}", prefix, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_holds_workspace_manifest() {
        assert!(workspace_root().join("Cargo.toml").is_file());
        assert!(workspace_root().join("crates").is_dir());
    }

    #[test]
    fn test_scratch_dir_prefix() {
        let dir = temp_test_dir_with_prefix("fwi_scratch_");
        let name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("fwi_scratch_"));
    }

    #[test]
    fn test_absent_file_is_none() {
        assert!(find_test_file("no_such_fwi_file.nc").is_none());
    }
}
