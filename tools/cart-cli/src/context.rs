//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_cache::{Cache, FileStore};
use turbo_cart::CartStore;

use crate::config::{CartConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CartConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Shopper whose cart is used; `None` means the shared cart.
    pub shopper: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        shopper: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CartConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CartConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            shopper,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CartConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CartConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => {
                            tracing::warn!(
                                path = %config_path.display(),
                                error = %e,
                                "skipping unreadable config"
                            );
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the cart file.
    ///
    /// Relative paths resolve against the config file's directory, or the
    /// working directory when no config file was found.
    pub fn storage_dir(&self) -> PathBuf {
        let dir = PathBuf::from(&self.config.storage.dir);
        if dir.is_absolute() {
            return dir;
        }

        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone());
        base.join(dir)
    }

    /// Storage key of the cart, namespaced by shopper when one is given.
    pub fn storage_key(&self) -> String {
        match self.shopper {
            Some(ref shopper) => {
                turbo_cache::cache_key!(self.config.storage.key.as_str(), shopper)
            }
            None => self.config.storage.key.clone(),
        }
    }

    /// Open the cart store described by the configuration.
    pub fn open_store(&self) -> Result<CartStore<FileStore>> {
        let policy = self.config.to_policy()?;
        let dir = self.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        Ok(CartStore::open_at(
            Cache::new(store),
            self.storage_key(),
            policy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: CartConfig, config_path: Option<PathBuf>, cwd: PathBuf) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd,
            shopper: None,
        }
    }

    #[test]
    fn test_storage_dir_defaults_to_cwd() {
        let ctx = context(CartConfig::default(), None, PathBuf::from("/work"));
        assert_eq!(ctx.storage_dir(), PathBuf::from("/work/.cart"));
    }

    #[test]
    fn test_storage_dir_relative_to_config_file() {
        let ctx = context(
            CartConfig::default(),
            Some(PathBuf::from("/shop/cart.toml")),
            PathBuf::from("/shop/sub/dir"),
        );
        assert_eq!(ctx.storage_dir(), PathBuf::from("/shop/.cart"));
    }

    #[test]
    fn test_find_config_walks_upward() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("cart.toml"),
            "[storage]\nkey = \"cart:test\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.key, "cart:test");
        assert_eq!(path, root.path().join("cart.toml"));
    }

    #[test]
    fn test_open_store_uses_configured_key() {
        let root = tempfile::tempdir().unwrap();
        let mut config = CartConfig::default();
        config.storage.key = "cart:guest".to_string();
        let ctx = context(config, None, root.path().to_path_buf());

        let store = ctx.open_store().unwrap();
        assert_eq!(store.key(), "cart:guest");
        assert!(store.is_empty());
        assert!(root.path().join(".cart").is_dir());
    }

    #[test]
    fn test_shopper_namespaces_key() {
        let mut ctx = context(CartConfig::default(), None, PathBuf::from("/work"));
        assert_eq!(ctx.storage_key(), "cart");

        ctx.shopper = Some("alice".to_string());
        assert_eq!(ctx.storage_key(), "cart:alice");
    }
}
