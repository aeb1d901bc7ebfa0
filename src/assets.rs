//! Loading of externally produced description documents.
//!
//! Documents are JSON on disk; this module reads and deserializes them.
//! All of it happens before the frame loop starts (and again on restart,
//! never mid-play).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::AssetError;
use crate::level::LevelDocument;
use crate::render::sprite::SpriteSheetDocument;

/// Every document world setup needs, loaded in one go.
#[derive(Debug, Clone)]
pub struct GameDocuments {
    pub level: LevelDocument,
    /// Sprite sheets by well-known name ("player", "enemy", "pickup", "bomb").
    pub sprites: HashMap<String, SpriteSheetDocument>,
}

impl GameDocuments {
    pub fn load(root: &Path) -> Result<GameDocuments, AssetError> {
        Ok(GameDocuments {
            level: load_document(&root.join("level.json"))?,
            sprites: load_document(&root.join("sprites.json"))?,
        })
    }
}

pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
        _ => AssetError::Io(e),
    })?;
    serde_json::from_slice(&bytes).map_err(|source| AssetError::Malformed {
        path: path.display().to_string(),
        source,
    })
}
