// Asset loading functionality

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::AssetError;

/// Environment variable overriding the asset root directory
const ASSET_ROOT_VAR: &str = "ASSET_ROOT";

/// Default asset root, relative to the working directory
const DEFAULT_ASSET_ROOT: &str = "assets";

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Font,
}

impl AssetType {
    /// Get the subdirectory for this asset type
    pub fn directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Font => "fonts",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Create an asset loader rooted at `$ASSET_ROOT`, falling back to the
    /// default `assets/` directory
    pub fn from_env() -> Self {
        let root = env::var(ASSET_ROOT_VAR).unwrap_or_else(|_| DEFAULT_ASSET_ROOT.to_string());
        Self::new(root)
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path.join(asset_type.directory()).join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        let bytes = std::fs::read(&path).map_err(AssetError::Io)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_uses_type_directory() {
        let loader = AssetLoader::new("assets");

        assert_eq!(
            loader.resolve_path(AssetType::Texture, "player.png"),
            PathBuf::from("assets/textures/player.png")
        );
        assert_eq!(
            loader.resolve_path(AssetType::Font, "font_atlas.png"),
            PathBuf::from("assets/fonts/font_atlas.png")
        );
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("definitely/not/a/real/root");
        let result = loader.load_bytes(AssetType::Texture, "nope.png");

        let err = result.unwrap_err();
        let asset_err = err.downcast_ref::<AssetError>().unwrap();
        assert!(matches!(asset_err, AssetError::NotFound(_)));
    }
}
