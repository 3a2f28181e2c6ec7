use std::borrow::Cow;

use assets_manager::{
    loader::Loader, source::FileSystem, Asset, AssetCache, BoxedError, Compound,
};
use image::RgbaImage;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::{font::Font, settings::Settings};

/// Directory all assets are loaded from.
const ASSET_DIR: &str = "assets";

/// All external data.
pub struct Assets(AssetCache<FileSystem>);

impl Assets {
    /// Construct the asset loader reading from the asset directory.
    pub fn load() -> Result<Self> {
        Self::load_from(ASSET_DIR)
    }

    /// Construct the asset loader reading from a custom directory.
    pub fn load_from(dir: &str) -> Result<Self> {
        let source = FileSystem::new(dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not open asset directory '{dir}'"))?;

        log::info!("Loading assets from '{dir}'");

        Ok(Self(AssetCache::with_source(source)))
    }

    /// Load and validate the settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings = self.owned::<Settings>("settings")?;
        settings.validate().wrap_err("Invalid settings")?;

        Ok(settings)
    }

    /// Load an image.
    pub fn image(&self, path: &str) -> Result<RgbaImage> {
        self.owned::<Image>(path).map(|image| image.0)
    }

    /// Load a font.
    pub fn font(&self, path: &str) -> Result<Font> {
        self.owned(path)
    }

    /// Load a generic asset, naming it when it fails.
    fn owned<T>(&self, path: &str) -> Result<T>
    where
        T: Compound,
    {
        self.0
            .load_owned(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not load asset '{path}'"))
    }
}

/// Decoded PNG image.
pub struct Image(pub RgbaImage);

impl Asset for Image {
    const EXTENSION: &'static str = "png";

    type Loader = PngLoader;
}

/// Decodes PNG files with the `image` crate.
pub struct PngLoader;

impl Loader<Image> for PngLoader {
    fn load(content: Cow<[u8]>, _ext: &str) -> Result<Image, BoxedError> {
        let image = image::load_from_memory_with_format(&content, image::ImageFormat::Png)?;

        Ok(Image(image.into_rgba8()))
    }
}
