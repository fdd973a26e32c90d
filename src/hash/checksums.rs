//! Batch checksums for a directory tree

use super::integrity::FileHasher;
use crate::config::HashAlgorithm;
use crate::error::Result;
use crate::fs::regular_files;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Digest per file path, produced by a directory scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumMap {
    /// Algorithm used for all digests
    pub algorithm: HashAlgorithm,
    /// Directory that was scanned
    pub root: String,
    /// Path (as produced by the walk) to lowercase hex digest
    pub entries: BTreeMap<String, String>,
}

impl ChecksumMap {
    /// Create an empty map
    pub fn new(algorithm: HashAlgorithm, root: &str) -> Self {
        Self {
            algorithm,
            root: root.to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no regular files were found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Digest recorded for `path`
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Iterate `(path, digest)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }

    /// Write `<digest>  <path>` lines, the layout `sha256sum -c` reads
    pub fn write_sums<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for (path, digest) in self.iter() {
            writeln!(writer, "{}  {}", digest, path)?;
        }
        Ok(())
    }
}

/// Generate checksums for all regular files below `directory`
///
/// Aborts on the first file that cannot be hashed; no partial map is returned.
pub fn generate_checksum_file(
    directory: impl AsRef<Path>,
    algorithm: HashAlgorithm,
) -> Result<ChecksumMap> {
    generate_with(&FileHasher::with_algorithm(algorithm), directory.as_ref())
}

pub(crate) fn generate_with(hasher: &FileHasher, directory: &Path) -> Result<ChecksumMap> {
    let start = Instant::now();
    let mut map = ChecksumMap::new(hasher.algorithm(), &directory.to_string_lossy());

    for path in regular_files(directory)? {
        let path = path?;
        let digest = hasher.hash_file(&path)?;
        map.entries.insert(path.to_string_lossy().into_owned(), digest);
    }

    tracing::debug!(
        "Hashed {} files under {} in {:?}",
        map.len(),
        directory.display(),
        start.elapsed()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    const FOO_SHA256: &str = "2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae";
    const BAR_SHA256: &str = "fcde2b2edba56bf408601fb721fe9b5c338d10ee429ea04fae5511b68fbf8fb9";

    fn create_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"foo").unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b").join("c.txt"), b"bar").unwrap();
        dir
    }

    #[test]
    fn test_generate_checksum_file() {
        let dir = create_tree();
        let map = generate_checksum_file(dir.path(), HashAlgorithm::Sha256).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.algorithm, HashAlgorithm::Sha256);

        let a = dir.path().join("a.txt");
        let c = dir.path().join("b").join("c.txt");
        assert_eq!(map.get(&a.to_string_lossy()), Some(FOO_SHA256));
        assert_eq!(map.get(&c.to_string_lossy()), Some(BAR_SHA256));
    }

    #[test]
    fn test_generate_uses_hasher_algorithm() {
        let dir = create_tree();
        let hasher = FileHasher::with_algorithm(HashAlgorithm::Md5);
        let map = hasher.generate_checksums(dir.path()).unwrap();

        let a = dir.path().join("a.txt");
        assert_eq!(map.get(&a.to_string_lossy()), Some("acbd18db4cc2f85cedef654fccc4a4d8"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let map = generate_checksum_file(dir.path(), HashAlgorithm::Sha1).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = generate_checksum_file(dir.path().join("gone"), HashAlgorithm::Sha256)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_write_sums() {
        let dir = create_tree();
        let map = generate_checksum_file(dir.path(), HashAlgorithm::Sha256).unwrap();

        let mut out = Vec::new();
        map.write_sums(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 2);
        let a = dir.path().join("a.txt");
        assert!(text.contains(&format!("{}  {}", FOO_SHA256, a.display())));
    }

    #[test]
    fn test_json_listing() {
        let dir = create_tree();
        let map = generate_checksum_file(dir.path(), HashAlgorithm::Sha256).unwrap();

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"algorithm\":\"sha256\""));

        let parsed: ChecksumMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_aborts_batch() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_tree();
        let locked = dir.path().join("locked.txt");
        std::fs::write(&locked, b"secret").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root can read anything; the check only means something for other users.
        if std::fs::File::open(&locked).is_ok() {
            return;
        }

        let err = generate_checksum_file(dir.path(), HashAlgorithm::Sha256).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.is_permission_error());
    }
}
