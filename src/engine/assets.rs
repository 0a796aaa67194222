//! Asset store
//!
//! Loaded textures by name. A texture that failed to load, or has not
//! finished loading, is simply absent from the map; drawing code looks
//! names up every frame and skips what it cannot find, so a late asset
//! shows up on its own once it arrives.

use std::collections::HashMap;

use macroquad::prelude::*;

#[derive(Default)]
pub struct AssetStore {
    textures: HashMap<String, Texture2D>,
}

impl AssetStore {
    /// Load a texture from disk (or over HTTP on web builds) and file
    /// it under `name`. Failure leaves the entry absent.
    pub async fn load(&mut self, name: &str, path: &str) {
        match load_texture(path).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                println!("[ember-2d:assets] loaded {} from {}", name, path);
                self.textures.insert(name.to_string(), texture);
            }
            Err(e) => {
                eprintln!("[ember-2d:assets] failed to load {} from {}: {}", name, path, e);
            }
        }
    }

    pub fn texture(&self, name: &str) -> Option<&Texture2D> {
        self.textures.get(name)
    }
}
