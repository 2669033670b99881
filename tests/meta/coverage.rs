//! Checks that `tests/unit` mirrors `src` one file per module

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Target roots and module declarations carry no tests of their own
    fn is_structural(relative: &str) -> bool {
        relative.ends_with("main.rs") || relative.ends_with("mod.rs") || relative == "lib.rs"
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside base"))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn files_under(dir: &str) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let base = Path::new(dir);
        rust_files(base, base, &mut found)?;
        Ok(found)
    }

    // Verifies every source module has a unit test file at the same path
    #[test]
    fn test_src_modules_have_unit_tests() -> io::Result<()> {
        let tests = files_under("tests/unit")?;
        let missing: Vec<_> = files_under("src")?
            .into_iter()
            .filter(|path| !is_structural(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source modules without unit tests:\n{}",
            missing.join("\n")
        );
        Ok(())
    }

    // Verifies no unit test file outlives its source module
    #[test]
    fn test_unit_tests_have_src_modules() -> io::Result<()> {
        let sources = files_under("src")?;
        let orphaned: Vec<_> = files_under("tests/unit")?
            .into_iter()
            .filter(|path| !is_structural(path) && !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit tests without source modules:\n{}",
            orphaned.join("\n")
        );
        Ok(())
    }

    // Verifies every non-structural test file declares at least one test
    #[test]
    fn test_test_files_contain_tests() -> io::Result<()> {
        let mut empty = Vec::new();
        for path in files_under("tests")? {
            if is_structural(&path) {
                continue;
            }
            let content = fs::read_to_string(Path::new("tests").join(&path))?;
            if !content.contains("#[test]") && !content.contains("proptest!") {
                empty.push(format!("  - tests/{path}"));
            }
        }

        assert!(
            empty.is_empty(),
            "Test files without any tests:\n{}",
            empty.join("\n")
        );
        Ok(())
    }
}
