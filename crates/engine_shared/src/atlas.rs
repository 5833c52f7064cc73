// crates/engine_shared/src/atlas.rs

use thiserror::Error;

use crate::graphics::{TextureId, TextureRegion};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtlasError {
    #[error("atlas has no region named `{0}`")]
    MissingRegion(String),
}

/// One named entry of an atlas. Regions sharing a name form a sequence
/// ordered by `index` (animation frames); `index` is `None` for singletons.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasRegion {
    pub name: String,
    pub index: Option<u32>,
    pub region: TextureRegion,
}

/// Named regions packed into a single texture.
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    regions: Vec<AtlasRegion>,
}

impl TextureAtlas {
    pub fn new(mut regions: Vec<AtlasRegion>) -> Self {
        // Stable sort keeps file order for regions without an index.
        regions.sort_by(|a, b| a.name.cmp(&b.name).then(a.index.cmp(&b.index)));
        Self { regions }
    }

    pub fn regions(&self) -> &[AtlasRegion] {
        &self.regions
    }

    pub fn textures(&self) -> impl Iterator<Item = TextureId> + '_ {
        let mut ids: Vec<TextureId> = self.regions.iter().map(|r| r.region.texture).collect();
        ids.sort();
        ids.dedup();
        ids.into_iter()
    }

    /// First region with this name (lowest index).
    pub fn find_region(&self, name: &str) -> Option<TextureRegion> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.region)
    }

    /// Every region with this name, ordered by index.
    pub fn find_regions(&self, name: &str) -> Vec<TextureRegion> {
        self.regions
            .iter()
            .filter(|r| r.name == name)
            .map(|r| r.region)
            .collect()
    }

    pub fn require_region(&self, name: &str) -> Result<TextureRegion, AtlasError> {
        self.find_region(name)
            .ok_or_else(|| AtlasError::MissingRegion(name.to_string()))
    }

    /// Like `find_regions`, but an empty sequence is an error.
    pub fn require_regions(&self, name: &str) -> Result<Vec<TextureRegion>, AtlasError> {
        let frames = self.find_regions(name);
        if frames.is_empty() {
            return Err(AtlasError::MissingRegion(name.to_string()));
        }
        Ok(frames)
    }
}
