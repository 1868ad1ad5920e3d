//! Keeps `tests/unit` in step with `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module files that need no mirrored test file
    fn is_organizational(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();

        if dir.is_dir() {
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                    .to_string_lossy()
                    .replace('\\', "/");

                if path.is_dir() {
                    paths.insert(relative);
                    paths.extend(collect_relative_paths(&path, base)?);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    paths.insert(relative);
                }
            }
        }

        Ok(paths)
    }

    fn source_and_unit_paths() -> (BTreeSet<String>, BTreeSet<String>) {
        let src_dir = Path::new("src");
        let tests_dir = Path::new("tests/unit");

        let src_paths = collect_relative_paths(src_dir, src_dir)
            .unwrap_or_else(|error| panic!("Failed to read src directory: {error}"));
        let test_paths = collect_relative_paths(tests_dir, tests_dir).unwrap_or_default();
        (src_paths, test_paths)
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src_paths, test_paths) = source_and_unit_paths();

        let missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_organizational(path) && !test_paths.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src_paths, test_paths) = source_and_unit_paths();

        let orphaned: Vec<_> = test_paths
            .iter()
            .filter(|path| !is_organizational(path) && !src_paths.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    // A test file missing from its mod.rs is never compiled
    #[test]
    fn test_all_unit_test_files_are_declared() {
        let (_, test_paths) = source_and_unit_paths();
        let tests_dir = Path::new("tests/unit");
        let mut undeclared = Vec::new();

        for path in &test_paths {
            let Some(stem) = path.strip_suffix(".rs") else {
                continue;
            };
            if is_organizational(path) {
                continue;
            }

            let (parent, name) = stem.rsplit_once('/').unwrap_or(("", stem));
            let declaring = if parent.is_empty() {
                tests_dir.join("main.rs")
            } else {
                tests_dir.join(parent).join("mod.rs")
            };
            let declarations = fs::read_to_string(&declaring).unwrap_or_default();
            if !declarations.contains(&format!("mod {name};")) {
                undeclared.push(format!("  - tests/unit/{path} (not in {})", declaring.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test files are not declared as modules:\n{}",
            undeclared.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut files_without_tests = Vec::new();

        check_test_files(tests_dir, &mut files_without_tests)
            .unwrap_or_else(|error| panic!("Failed to scan tests directory: {error}"));

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn check_test_files(dir: &Path, files_without_tests: &mut Vec<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                check_test_files(&path, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if file_name == "main.rs" || file_name == "mod.rs" {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }
}
