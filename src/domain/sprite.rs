//! Sprite registry
//!
//! The stage's `children` array mixes sprites with stage monitors and other
//! decorations. Each entry is classified once into a [`StageChild`]; only
//! sprites enter the registry.

use indexmap::IndexMap;
use serde_json::Value;

use super::json::JsonExt;
use super::script::{extract_scripts, Script};

/// Key holding the stage's child objects
pub const CHILDREN_KEY: &str = "children";

/// Key holding an object's name
pub const NAME_KEY: &str = "objName";

/// Key whose presence marks a child as a sprite
pub const SPRITE_MARKER_KEY: &str = "spriteInfo";

/// A sprite sub-document with its extracted scripts
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
    name: String,
    raw: Value,
    scripts: Vec<Script>,
}

impl SpriteNode {
    fn new(name: String, raw: Value) -> Self {
        let scripts = extract_scripts(&raw);
        Self { name, raw, scripts }
    }

    /// Returns the sprite's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw sprite object
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns the scripts in document order
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Returns the number of scripts
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    /// Returns the top-level block count of each script
    pub fn script_lengths(&self) -> Vec<usize> {
        self.scripts.iter().map(Script::length).collect()
    }
}

/// Classification of one entry of the stage's `children` array
#[derive(Debug, Clone, PartialEq)]
pub enum StageChild {
    /// A named sprite
    Sprite(SpriteNode),

    /// Carries the sprite marker but no usable name
    UnnamedSprite,

    /// An object without the sprite marker (stage monitor, watcher, ...)
    Monitor,

    /// Not a JSON object at all
    Malformed,
}

impl StageChild {
    /// Classifies a raw child entry
    pub fn classify(raw: &Value) -> Self {
        if !raw.is_object() {
            return StageChild::Malformed;
        }

        if !raw.has_field(SPRITE_MARKER_KEY) {
            return StageChild::Monitor;
        }

        match raw.str_field(NAME_KEY) {
            Some(name) => StageChild::Sprite(SpriteNode::new(name.to_string(), raw.clone())),
            None => StageChild::UnnamedSprite,
        }
    }
}

/// Name-indexed sprites of one project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteRegistry {
    sprites: IndexMap<String, SpriteNode>,
    monitors: usize,
    skipped: usize,
    collisions: usize,
}

impl SpriteRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from the stage document's `children` array
    pub fn from_stage(stage: &Value) -> Self {
        let mut registry = Self::new();

        for (index, child) in stage.array_field(CHILDREN_KEY).iter().enumerate() {
            match StageChild::classify(child) {
                StageChild::Sprite(node) => registry.insert(node),
                StageChild::Monitor => registry.monitors += 1,
                StageChild::UnnamedSprite => {
                    tracing::warn!(index, "skipping sprite without a usable {}", NAME_KEY);
                    registry.skipped += 1;
                }
                StageChild::Malformed => {
                    tracing::debug!(index, "skipping non-object child");
                    registry.skipped += 1;
                }
            }
        }

        registry
    }

    /// Inserts a sprite; a duplicate name replaces the earlier sprite in place
    pub fn insert(&mut self, node: SpriteNode) {
        if self.sprites.contains_key(node.name()) {
            tracing::debug!(name = node.name(), "duplicate sprite name, last one wins");
            self.collisions += 1;
        }
        self.sprites.insert(node.name.clone(), node);
    }

    /// Returns a sprite by name
    pub fn get(&self, name: &str) -> Option<&SpriteNode> {
        self.sprites.get(name)
    }

    /// Returns sprite names in order of first appearance
    pub fn names(&self) -> Vec<&str> {
        self.sprites.keys().map(String::as_str).collect()
    }

    /// Iterates over sprites in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = &SpriteNode> {
        self.sprites.values()
    }

    /// Number of registered sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Returns true if no sprite was registered
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Number of non-sprite objects seen among the children
    pub fn monitor_count(&self) -> usize {
        self.monitors
    }

    /// Number of children dropped as malformed or unnamed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of sprites that replaced an earlier sprite of the same name
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
