//! Locating installed npm packages.
//!
//! Mirrors Node's lookup for `require.resolve("<pkg>/package.json")`: try
//! `node_modules/<pkg>` in the start directory and each of its ancestors,
//! then each `NODE_PATH` entry.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

const NODE_MODULES: &str = "node_modules";
const MANIFEST: &str = "package.json";

/// Finds package directories on the Node module path.
///
/// # Examples
///
/// ```no_run
/// use videre::plan::PackageResolver;
///
/// let resolver = PackageResolver::new("/work/project");
/// let dir = resolver.resolve("@videre/mongo-server").unwrap();
/// assert!(dir.join("package.json").is_file());
/// ```
#[derive(Debug, Clone)]
pub struct PackageResolver {
    start: PathBuf,
    node_path: Vec<PathBuf>,
}

impl PackageResolver {
    /// A resolver rooted at `start`, with `NODE_PATH` taken from the environment.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let node_path = env::var_os("NODE_PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self {
            start: start.into(),
            node_path,
        }
    }

    /// Replace the `NODE_PATH` entries.
    #[must_use]
    pub fn with_node_path(mut self, node_path: Vec<PathBuf>) -> Self {
        self.node_path = node_path;
        self
    }

    /// Every directory searched, in lookup order.
    #[must_use]
    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.start
            .ancestors()
            .filter(|dir| dir.file_name().map_or(true, |name| name != NODE_MODULES))
            .map(|dir| dir.join(NODE_MODULES))
            .chain(self.node_path.iter().cloned())
            .collect()
    }

    /// Directory of the first installed copy of `package`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageResolution`] if no search path has a
    /// `<package>/package.json`.
    pub fn resolve(&self, package: &str) -> Result<PathBuf> {
        let searched = self.search_paths();

        for base in &searched {
            let dir = package
                .split('/')
                .fold(base.clone(), |path, segment| path.join(segment));
            if dir.join(MANIFEST).is_file() {
                log::debug!("resolved {package} to {}", dir.display());
                return Ok(dir);
            }
        }

        Err(Error::PackageResolution {
            package: package.to_string(),
            searched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn install(root: &Path, package: &str) -> PathBuf {
        let dir = root.join(NODE_MODULES).join(package);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST), "{}").unwrap();
        dir
    }

    #[test]
    fn test_resolve_in_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        let installed = install(temp_dir.path(), "@videre/mongo-server");

        let resolver = PackageResolver::new(temp_dir.path()).with_node_path(vec![]);
        assert_eq!(resolver.resolve("@videre/mongo-server").unwrap(), installed);
    }

    #[test]
    fn test_resolve_walks_up_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let installed = install(temp_dir.path(), "@videre/mongo-app");
        let nested = temp_dir.path().join("apps").join("web");
        fs::create_dir_all(&nested).unwrap();

        let resolver = PackageResolver::new(&nested).with_node_path(vec![]);
        assert_eq!(resolver.resolve("@videre/mongo-app").unwrap(), installed);
    }

    #[test]
    fn test_closest_install_wins() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "@videre/mongo-app");
        let nested = temp_dir.path().join("project");
        let closest = install(&nested, "@videre/mongo-app");

        let resolver = PackageResolver::new(&nested).with_node_path(vec![]);
        assert_eq!(resolver.resolve("@videre/mongo-app").unwrap(), closest);
    }

    #[test]
    fn test_resolve_from_node_path() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_modules = global.path().join(NODE_MODULES);
        let installed = install(global.path(), "@videre/mongo-server");

        let resolver = PackageResolver::new(project.path()).with_node_path(vec![global_modules]);
        assert_eq!(resolver.resolve("@videre/mongo-server").unwrap(), installed);
    }

    #[test]
    fn test_directory_without_manifest_is_not_a_package() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(NODE_MODULES).join("@videre/mongo-app")).unwrap();

        let resolver = PackageResolver::new(temp_dir.path()).with_node_path(vec![]);
        assert!(resolver.resolve("@videre/mongo-app").is_err());
    }

    #[test]
    fn test_missing_package_lists_searched_paths() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = PackageResolver::new(temp_dir.path()).with_node_path(vec![]);

        match resolver.resolve("@videre/mongo-server") {
            Err(Error::PackageResolution { package, searched }) => {
                assert_eq!(package, "@videre/mongo-server");
                assert_eq!(searched[0], temp_dir.path().join(NODE_MODULES));
            }
            other => panic!("expected package resolution error, got {other:?}"),
        }
    }

    #[test]
    fn test_search_skips_node_modules_dirs() {
        let resolver =
            PackageResolver::new("/work/node_modules/tool").with_node_path(vec![]);
        let paths = resolver.search_paths();
        assert!(!paths.contains(&PathBuf::from("/work/node_modules/node_modules")));
        assert!(paths.contains(&PathBuf::from("/work/node_modules/tool/node_modules")));
        assert!(paths.contains(&PathBuf::from("/work/node_modules")));
    }
}
