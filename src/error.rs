//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach. Setup failures (bad
//! documents, unloadable assets) are fatal; everything past world setup
//! degrades to a logged no-op instead of surfacing here.

use std::io;

use crate::entity::EntityId;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Sprite error: {0}")]
    Sprite(#[from] SpriteError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors produced while reading externally parsed description documents.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Malformed document {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for level document validation.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Level has no tile layers")]
    NoLayers,

    #[error("Layer {layer} has {got} cells, expected {expected}")]
    LayerSizeMismatch { layer: usize, got: usize, expected: usize },

    #[error("Invalid level configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Unknown texture handle: {0}")]
    UnknownHandle(usize),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors related to sprite sheet documents.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    #[error("Sprite sheet missing required field: {0}")]
    MissingField(&'static str),

    #[error("Sprite sheet has no animations")]
    NoAnimations,

    #[error("Animation '{name}': {problem}")]
    InvalidAnimation { name: String, problem: String },

    #[error("Unknown sprite sheet: {0}")]
    UnknownSheet(String),
}

/// Errors related to entity registry operations.
#[derive(thiserror::Error, Debug)]
pub enum EntityError {
    #[error("Duplicate entity id: {0}")]
    DuplicateId(EntityId),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
