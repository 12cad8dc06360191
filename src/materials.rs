//! Material descriptors shared between pickups and walls
//!
//! One cache is built during level setup and handed to whoever renders the
//! scene. Lookups never create entries; every key a level uses must be
//! registered up front.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which shared material an entity uses
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKey {
    Coin,
    Cross,
    Ghost,
    /// One per resource sample, by name
    Resource(String),
    /// Wall finishes, by name
    Wall(String),
}

/// Generated textures the renderer knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Procedural {
    Wood,
    Fire,
    Cloud,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureSource {
    Image(String),
    Procedural {
        kind: Procedural,
        size: u32,
        /// Base colour override (linear RGB)
        tint: Option<[f32; 3]>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub texture: Option<TextureSource>,
    /// Separate texture for the front face only (ghost face)
    pub face_texture: Option<TextureSource>,
    pub diffuse: [f32; 3],
    pub emissive: [f32; 3],
    pub alpha: f32,
    pub back_face_culling: bool,
    pub disable_lighting: bool,
    pub uv_scale: [f32; 2],
    pub uv_offset: [f32; 2],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            face_texture: None,
            diffuse: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            alpha: 1.0,
            back_face_culling: true,
            disable_lighting: false,
            uv_scale: [1.0, 1.0],
            uv_offset: [0.0, 0.0],
        }
    }
}

impl Material {
    pub fn textured(texture: TextureSource) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    pub fn image(path: &str) -> Self {
        Self::textured(TextureSource::Image(path.to_string()))
    }

    pub fn colored(diffuse: [f32; 3]) -> Self {
        Self {
            diffuse,
            ..Self::default()
        }
    }

    /// Lit only by its own emissive white; ignores scene lights
    pub fn unlit(mut self) -> Self {
        self.emissive = [1.0, 1.0, 1.0];
        self.disable_lighting = true;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }

    pub fn with_uv_offset(mut self, u: f32, v: f32) -> Self {
        self.uv_offset = [u, v];
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterialCache {
    materials: HashMap<MaterialKey, Material>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding the pickup materials every level needs
    pub fn standard() -> Self {
        let mut cache = Self::new();
        cache.register(
            MaterialKey::Coin,
            Material::image("images/gold.jpg").with_uv_scale(0.25, 0.25).unlit(),
        );
        cache.register(
            MaterialKey::Cross,
            Material::textured(TextureSource::Procedural {
                kind: Procedural::Wood,
                size: 128,
                tint: Some([50.0 / 255.0, 0.0, 0.0]),
            })
            .with_uv_scale(4.0, 1.0)
            .unlit(),
        );
        cache.register(
            MaterialKey::Ghost,
            Material {
                face_texture: Some(TextureSource::Image("images/ghost_face.jpg".to_string())),
                ..Material::default()
            }
            .unlit()
            .with_alpha(0.5),
        );
        cache
    }

    /// Add or replace a material; returns the one it replaced
    pub fn register(&mut self, key: MaterialKey, material: Material) -> Option<Material> {
        log::debug!("Registering material {:?}", key);
        self.materials.insert(key, material)
    }

    pub fn get(&self, key: &MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn contains(&self, key: &MaterialKey) -> bool {
        self.materials.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MaterialKey> {
        self.materials.keys()
    }
}
