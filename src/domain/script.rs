//! Scripts and block tuples
//!
//! A script is stored as a positional `[x, y, blocks]` tuple. Extraction
//! never fails: a malformed tuple yields an empty script at the origin.

use serde::Serialize;
use serde_json::Value;

use super::json::JsonExt;

/// Key under which a sprite or the stage stores its scripts
pub const SCRIPTS_KEY: &str = "scripts";

/// Canvas placement of a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single top-level block, kept as the raw positional record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlockTuple(Value);

impl BlockTuple {
    /// Returns the raw record
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Returns the operator name, when the first element is a string
    pub fn opcode(&self) -> Option<&str> {
        self.0.element(0).and_then(Value::as_str)
    }
}

/// One chain of blocks attached to a sprite or the stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Script {
    pub position: Position,
    pub blocks: Vec<BlockTuple>,
}

impl Script {
    /// Builds a script from a raw `[x, y, blocks]` tuple
    pub fn from_tuple(tuple: &Value) -> Self {
        if !tuple.is_array() {
            return Self::default();
        }

        let position = Position {
            x: tuple.element(0).map(JsonExt::number_or_zero).unwrap_or(0.0),
            y: tuple.element(1).map(JsonExt::number_or_zero).unwrap_or(0.0),
        };

        // Only the top level counts; nested bodies stay inside each tuple
        let blocks = tuple
            .element(2)
            .map(JsonExt::as_slice)
            .unwrap_or(&[])
            .iter()
            .cloned()
            .map(BlockTuple)
            .collect();

        Self { position, blocks }
    }

    /// Number of top-level blocks
    pub fn length(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the script has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Extracts the scripts of a sprite or stage node, in document order
pub fn extract_scripts(node: &Value) -> Vec<Script> {
    node.array_field(SCRIPTS_KEY)
        .iter()
        .map(Script::from_tuple)
        .collect()
}
