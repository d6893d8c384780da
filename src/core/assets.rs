//=========================================================================
// Asset Cache
//
// Decodes image files and keeps them by name for the lifetime of the
// session.
//
// Responsibilities:
// - Decode a batch of paths, all or nothing
// - Key each image by its file name up to the first '.'
//   ("sprites/frog.png" → "frog")
// - Hand out shared, read-only `Arc<Image>` handles
//
// Notes:
// A batch that fails on any path leaves the cache untouched. There is no
// partial-success report and no retry.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::render::Image;

//=== AssetError ==========================================================

#[derive(Debug)]
pub enum AssetError {
    /// The file could not be read or decoded.
    Decode {
        path: PathBuf,
        source: ::image::ImageError,
    },

    /// The path has no usable file name to key the image by.
    InvalidName { path: PathBuf },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "Failed to load image '{}': {}", path.display(), source)
            }
            Self::InvalidName { path } => {
                write!(f, "Cannot derive an asset name from '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::InvalidName { .. } => None,
        }
    }
}

//=== Assets ==============================================================

#[derive(Debug, Clone, Default)]
pub struct Assets {
    images: HashMap<String, Arc<Image>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Loading ----------------------------------------------------------

    /// Decodes every path and stores the results under their names.
    ///
    /// Returns the images in input order. If any path fails, nothing is
    /// stored and the first failure is returned.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Vec<Arc<Image>>, AssetError> {
        let mut decoded = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let name = asset_name(path)?;
            let image = ::image::open(path)
                .map_err(|source| AssetError::Decode {
                    path: path.to_path_buf(),
                    source,
                })?
                .to_rgba8();

            debug!(
                target: "assets",
                "Decoded '{}' as '{}' ({}x{})",
                path.display(),
                name,
                image.width(),
                image.height()
            );
            decoded.push((name, Arc::new(Image::from_rgba(image))));
        }

        let handles = decoded
            .into_iter()
            .map(|(name, image)| {
                self.images.insert(name, Arc::clone(&image));
                image
            })
            .collect::<Vec<_>>();

        info!(target: "assets", "Loaded {} images", handles.len());
        Ok(handles)
    }

    /// Decodes an in-memory encoded image (PNG, BMP) and stores it as `name`.
    pub fn load_from_memory(&mut self, name: &str, bytes: &[u8]) -> Result<Arc<Image>, AssetError> {
        let image = ::image::load_from_memory(bytes)
            .map_err(|source| AssetError::Decode {
                path: PathBuf::from(name),
                source,
            })?
            .to_rgba8();

        Ok(self.insert(name, Image::from_rgba(image)))
    }

    /// Stores an already decoded image, replacing any previous one.
    pub fn insert(&mut self, name: &str, image: Image) -> Arc<Image> {
        let handle = Arc::new(image);
        self.images.insert(name.to_string(), Arc::clone(&handle));
        handle
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<Arc<Image>> {
        self.images.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }
}

//--- Internal Helpers ----------------------------------------------------

fn asset_name(path: &Path) -> Result<String, AssetError> {
    let invalid = || AssetError::InvalidName { path: path.to_path_buf() };

    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let stem = file_name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        return Err(invalid());
    }
    Ok(stem.to_string())
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgba, RgbaImage};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    //--- Test Helpers -----------------------------------------------------

    /// Fresh directory under the system temp dir, unique per test call.
    fn scratch_dir() -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "lilypad-assets-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_png(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(file);
        RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]))
            .save(&path)
            .expect("write png");
        path
    }

    //=====================================================================
    // Naming Tests
    //=====================================================================

    #[test]
    fn name_strips_directories_and_extension() {
        assert_eq!(asset_name(Path::new("sprites/frog.png")).ok(), Some("frog".to_string()));
        assert_eq!(asset_name(Path::new("tile.sheet.png")).ok(), Some("tile".to_string()));
        assert_eq!(asset_name(Path::new("plain")).ok(), Some("plain".to_string()));
    }

    #[test]
    fn hidden_file_has_no_name() {
        assert!(matches!(
            asset_name(Path::new("dir/.png")),
            Err(AssetError::InvalidName { .. })
        ));
    }

    //=====================================================================
    // Loading Tests
    //=====================================================================

    #[test]
    fn batch_load_keys_images_by_stem() {
        let dir = scratch_dir();
        let frog = write_png(&dir, "frog.png", 16, 8);
        let lily = write_png(&dir, "lily.png", 4, 4);

        let mut assets = Assets::new();
        let loaded = assets.load(&[&frog, &lily]).expect("batch should load");

        assert_eq!(loaded.len(), 2);
        assert_eq!((loaded[0].width(), loaded[0].height()), (16, 8));
        assert_eq!(assets.len(), 2);
        assert!(assets.contains("frog"));
        assert_eq!(assets.get("lily").map(|i| i.width()), Some(4));
        assert_eq!(
            assets.get("frog").and_then(|i| i.pixel(0, 0)),
            Some(crate::core::color::Color::new_rgb(10, 200, 30))
        );
    }

    #[test]
    fn one_bad_file_rejects_whole_batch() {
        let dir = scratch_dir();
        let good = write_png(&dir, "good.png", 2, 2);
        let bad = dir.join("bad.png");
        fs::write(&bad, b"definitely not a png").expect("write garbage");

        let mut assets = Assets::new();
        let result = assets.load(&[&good, &bad]);

        assert!(matches!(result, Err(AssetError::Decode { .. })));
        assert!(assets.is_empty(), "no partial success");
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = scratch_dir();
        let mut assets = Assets::new();
        let err = assets.load(&[dir.join("nope.png")]).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn load_from_memory_stores_under_name() {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ::image::ImageFormat::Png)
            .expect("encode png");

        let mut assets = Assets::new();
        let image = assets.load_from_memory("pad", &bytes).expect("decode");
        assert_eq!((image.width(), image.height()), (3, 2));
        assert!(assets.contains("pad"));
    }

    #[test]
    fn empty_batch_is_ok() {
        let mut assets = Assets::new();
        let paths: [&str; 0] = [];
        assert!(assets.load(&paths).expect("empty batch").is_empty());
    }
}
