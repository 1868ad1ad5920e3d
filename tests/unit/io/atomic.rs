//! Tests for atomic file replacement

#[cfg(test)]
mod tests {
    use squaregrid::io::atomic::{atomic_write, staging_path};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // Tests the staging file sits next to the target
    // Verified by replacing the extension instead of appending
    #[test]
    fn test_staging_path() {
        let staged = staging_path(Path::new("maps/world.map")).unwrap();
        assert_eq!(staged, Path::new("maps/world.map.tmp"));

        assert!(staging_path(Path::new("/")).is_err());
    }

    // Tests writes create and then replace the target
    // Verified by appending to an existing file
    #[test]
    fn test_atomic_write_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.map");

        atomic_write(&path, b"first version").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first version");

        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!staging_path(&path).unwrap().exists());
    }

    // Tests a failed write leaves nothing behind
    // Verified by creating missing parent directories
    #[test]
    fn test_atomic_write_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("data.map");

        assert!(atomic_write(&path, b"payload").is_err());
        assert!(!path.exists());
        assert!(!staging_path(&path).unwrap().exists());
    }

    // Tests a failed rename keeps the staging file cleaned up
    // Verified by skipping removal of the staging file on error
    #[test]
    fn test_atomic_write_onto_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        assert!(atomic_write(&path, b"payload").is_err());
        assert!(path.is_dir());
        assert!(!staging_path(&path).unwrap().exists());
    }
}
