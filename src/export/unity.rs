//! Unity asset bundle `ArtSource`
//!
//! The only module that talks to unity-rs. A bundle is read in full and
//! every Texture2D object inside is decoded to a named RGBA image.

use crate::export::{ArtAsset, ArtSource};
use crate::{ExtractError, Result};
use image::DynamicImage;
use std::fs;
use std::path::Path;
use unity_rs::classes::Texture2D;
use unity_rs::{ClassID, Env};

pub struct UnityArtSource;

impl ArtSource for UnityArtSource {
    fn load(&self, path: &Path) -> Result<Vec<ArtAsset>> {
        let data = fs::read(path)?;
        let mut env = Env::new();
        env.load_from_slice(&data)
            .map_err(|e| ExtractError::Bundle(e.to_string()))?;

        let mut assets = Vec::new();
        for obj in env.objects() {
            if obj.class() != ClassID::Texture2D {
                continue;
            }
            let tex: Texture2D = obj
                .read()
                .map_err(|e| ExtractError::Bundle(e.to_string()))?;
            let decoded = tex
                .decode_image()
                .map_err(|e| ExtractError::Bundle(e.to_string()))?;
            // Rebuild the buffer with our own image version rather than
            // relying on unity-rs and this crate resolving to the same one.
            let (width, height) = (decoded.width(), decoded.height());
            let buffer = image::RgbaImage::from_raw(width, height, decoded.to_rgba8().into_raw())
                .ok_or_else(|| {
                    ExtractError::Bundle(format!("bad texture buffer for {}", tex.name))
                })?;
            assets.push(ArtAsset {
                name: tex.name.clone(),
                image: DynamicImage::ImageRgba8(buffer),
            });
        }
        Ok(assets)
    }
}
