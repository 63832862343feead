//! Logo Store
//!
//! 负责删除餐厅 logo 文件。删除失败只记录日志，不影响调用方。

use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Logo 文件存储
#[derive(Debug, Clone)]
pub struct LogoStore {
    /// Logo 根目录 (静态资源目录)
    public_dir: PathBuf,
    /// 默认 logo，永不删除
    default_logo: String,
    /// 默认 logo 规范化后的相对路径
    default_relative: Option<PathBuf>,
}

impl LogoStore {
    pub fn new(public_dir: impl Into<PathBuf>, default_logo: impl Into<String>) -> Self {
        let default_logo = default_logo.into();
        Self {
            public_dir: public_dir.into(),
            default_relative: normalize(&default_logo),
            default_logo,
        }
    }

    pub fn default_logo(&self) -> &str {
        &self.default_logo
    }

    /// Resolve a logo reference (e.g. `/uploads/a.webp`) to a file under the
    /// public dir. `None` for any spelling of the default logo and for
    /// references that would escape the public dir.
    pub fn resolve(&self, logo: &str) -> Option<PathBuf> {
        let relative = normalize(logo)?;
        if self.default_relative.as_ref() == Some(&relative) {
            return None;
        }
        Some(self.public_dir.join(relative))
    }

    /// Best-effort removal of a logo file
    ///
    /// Returns whether a file was deleted.
    pub async fn remove(&self, logo: &str) -> bool {
        let Some(path) = self.resolve(logo) else {
            tracing::debug!(logo = %logo, "Logo not removable, skipped");
            return false;
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(logo = %logo, "Logo file removed");
                true
            }
            Err(e) => {
                tracing::warn!(logo = %logo, error = %e, "Failed to delete logo file");
                false
            }
        }
    }
}

/// Relative path of a logo reference with root and `.` segments dropped.
/// `None` when empty or when it contains `..`.
fn normalize(logo: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(logo).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DEFAULT_LOGO_PATH;

    fn store(dir: &Path) -> LogoStore {
        LogoStore::new(dir, DEFAULT_LOGO_PATH)
    }

    #[test]
    fn test_resolve_rejects_default_and_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.resolve(DEFAULT_LOGO_PATH).is_none());
        assert!(store.resolve("").is_none());
        assert!(store.resolve("/../etc/passwd").is_none());
        assert!(store.resolve("/uploads/../../secret").is_none());
        assert_eq!(
            store.resolve("/uploads/logo.webp"),
            Some(dir.path().join("uploads/logo.webp"))
        );
    }

    #[test]
    fn test_resolve_rejects_default_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        for alias in [
            "restaurant-default-logo/restaurantdefaultlogo.webp",
            "/restaurant-default-logo/./restaurantdefaultlogo.webp",
            "//restaurant-default-logo//restaurantdefaultlogo.webp",
            "./restaurant-default-logo/restaurantdefaultlogo.webp",
        ] {
            assert!(store.resolve(alias).is_none(), "{alias}");
        }
        assert_eq!(
            store.resolve("/uploads/./logo.webp"),
            Some(dir.path().join("uploads/logo.webp"))
        );
    }

    #[tokio::test]
    async fn test_default_logo_survives_alias_removal() {
        let dir = tempfile::tempdir().unwrap();
        let default_file = dir.path().join("restaurant-default-logo/restaurantdefaultlogo.webp");
        std::fs::create_dir_all(default_file.parent().unwrap()).unwrap();
        std::fs::write(&default_file, b"img").unwrap();

        let store = store(dir.path());
        assert!(!store.remove("restaurant-default-logo/restaurantdefaultlogo.webp").await);
        assert!(!store.remove("/restaurant-default-logo/./restaurantdefaultlogo.webp").await);
        assert!(default_file.exists());
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
        let file = dir.path().join("uploads/logo.webp");
        std::fs::write(&file, b"img").unwrap();

        let store = store(dir.path());
        assert!(store.remove("/uploads/logo.webp").await);
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(!store.remove("/uploads/missing.webp").await);
        assert!(!store.remove(DEFAULT_LOGO_PATH).await);
    }
}
