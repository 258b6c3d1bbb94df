//! Project model
//!
//! A [`ProjectModel`] is built eagerly from one manifest document and is
//! read-only afterwards. Construction from a file goes through a
//! [`ManifestLoader`]; failures come back as a [`ParseError`] instead of a
//! half-built model.
//!
//! [`ProjectAnalysis`] pairs the project name with the construction
//! outcome so that a failed project can still be reported: every accessor
//! is defined on it, returning empty collections and zero counts when the
//! model is absent.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::json::JsonExt;
use super::loader::{LoadError, ManifestLoader};
use super::script::{extract_scripts, Script};
use super::sprite::{SpriteNode, SpriteRegistry};

/// Key holding the stage's global variables
pub const VARIABLES_KEY: &str = "variables";

/// Key holding the stage's global lists
pub const LISTS_KEY: &str = "lists";

/// Why a project could not be modelled
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0}")]
    IoFailure(String),

    #[error("{0}")]
    NoManifest(String),

    #[error("Corrupt project manifest: {0}")]
    CorruptManifest(String),
}

impl ParseError {
    /// Returns the error kind
    pub fn state(&self) -> ErrorState {
        match self {
            ParseError::IoFailure(_) => ErrorState::IoFailure,
            ParseError::NoManifest(_) => ErrorState::NoManifest,
            ParseError::CorruptManifest(_) => ErrorState::CorruptManifest,
        }
    }
}

impl From<LoadError> for ParseError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Io { .. } => ParseError::IoFailure(err.to_string()),
            LoadError::NoManifest { .. } => ParseError::NoManifest(err.to_string()),
        }
    }
}

/// Outcome of building a project, as reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorState {
    #[default]
    None,
    NoManifest,
    CorruptManifest,
    IoFailure,
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorState::None => write!(f, "none"),
            ErrorState::NoManifest => write!(f, "no_manifest"),
            ErrorState::CorruptManifest => write!(f, "corrupt_manifest"),
            ErrorState::IoFailure => write!(f, "io_failure"),
        }
    }
}

/// Lookup failures on a built model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown sprite: {0}")]
    UnknownSprite(String),
}

/// Derives the project name from its file name (`alice.sb2` -> `alice`)
pub fn project_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Short content hash of a manifest, for spotting identical submissions
pub fn fingerprint(text: &str) -> String {
    let hash = blake3::hash(text.as_bytes());
    hash.to_hex()[..12].to_string()
}

/// The typed model of one project manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectModel {
    name: String,
    document: Value,
    fingerprint: Option<String>,
    sprites: SpriteRegistry,
    stage_scripts: Vec<Script>,
}

impl ProjectModel {
    /// Builds a model from an already-parsed document
    pub fn from_document(name: impl Into<String>, document: Value) -> Self {
        let sprites = SpriteRegistry::from_stage(&document);
        let stage_scripts = extract_scripts(&document);

        Self {
            name: name.into(),
            document,
            fingerprint: None,
            sprites,
            stage_scripts,
        }
    }

    /// Parses manifest text and builds a model from it
    pub fn from_manifest_text(name: impl Into<String>, text: &str) -> Result<Self, ParseError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| ParseError::CorruptManifest(e.to_string()))?;

        let mut model = Self::from_document(name, document);
        model.fingerprint = Some(fingerprint(text));
        Ok(model)
    }

    /// Loads the manifest of the project file at `path` and builds a model
    pub fn load(path: &Path, loader: &impl ManifestLoader) -> Result<Self, ParseError> {
        let name = project_name(path);
        let text = loader.load_manifest_text(path)?;
        Self::from_manifest_text(name, &text)
    }

    /// Returns the project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the manifest fingerprint, when built from text
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Returns the sprite registry
    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    /// Returns sprite names in document order
    pub fn sprite_names(&self) -> Vec<&str> {
        self.sprites.names()
    }

    fn sprite(&self, name: &str) -> Result<&SpriteNode, ModelError> {
        self.sprites
            .get(name)
            .ok_or_else(|| ModelError::UnknownSprite(name.to_string()))
    }

    /// Returns the number of scripts of the named sprite
    pub fn script_count_for_sprite(&self, name: &str) -> Result<usize, ModelError> {
        self.sprite(name).map(SpriteNode::script_count)
    }

    /// Returns the top-level block count of each script of the named sprite
    pub fn script_lengths_for_sprite(&self, name: &str) -> Result<Vec<usize>, ModelError> {
        self.sprite(name).map(SpriteNode::script_lengths)
    }

    /// Returns the scripts of the named sprite
    pub fn scripts_for_sprite(&self, name: &str) -> Result<&[Script], ModelError> {
        self.sprite(name).map(SpriteNode::scripts)
    }

    /// Returns the scripts attached directly to the stage
    pub fn stage_scripts(&self) -> &[Script] {
        &self.stage_scripts
    }

    /// Returns the number of global variables (0 when absent)
    pub fn global_variable_count(&self) -> usize {
        self.document.array_field(VARIABLES_KEY).len()
    }

    /// Returns the number of global lists (0 when absent)
    pub fn global_list_count(&self) -> usize {
        self.document.array_field(LISTS_KEY).len()
    }

    /// Returns the number of non-sprite stage children
    pub fn monitor_count(&self) -> usize {
        self.sprites.monitor_count()
    }
}

/// A project name together with the result of modelling it
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAnalysis {
    name: String,
    outcome: Result<ProjectModel, ParseError>,
}

impl ProjectAnalysis {
    /// Loads and models the project file at `path`; never fails
    pub fn load(path: &Path, loader: &impl ManifestLoader) -> Self {
        let outcome = ProjectModel::load(path, loader);
        if let Err(err) = &outcome {
            tracing::info!(path = %path.display(), kind = %err.state(), "{}", err);
        }

        Self {
            name: project_name(path),
            outcome,
        }
    }

    /// Wraps an existing outcome
    pub fn new(name: impl Into<String>, outcome: Result<ProjectModel, ParseError>) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// Returns the project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model, if construction succeeded
    pub fn model(&self) -> Option<&ProjectModel> {
        self.outcome.as_ref().ok()
    }

    /// Returns the construction error, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }

    /// Returns the error kind (`None` on success)
    pub fn error_state(&self) -> ErrorState {
        self.error().map(ParseError::state).unwrap_or_default()
    }

    /// Returns a human-readable error message, if construction failed
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Returns the manifest fingerprint, if a manifest was parsed
    pub fn fingerprint(&self) -> Option<&str> {
        self.model().and_then(ProjectModel::fingerprint)
    }

    /// Sprite names in first-appearance order (empty on failure)
    pub fn sprite_names(&self) -> Vec<&str> {
        self.model().map(ProjectModel::sprite_names).unwrap_or_default()
    }

    /// Number of scripts on the named sprite
    pub fn script_count_for_sprite(&self, name: &str) -> Result<usize, ModelError> {
        self.require(name)?.script_count_for_sprite(name)
    }

    /// Top-level block count of each script on the named sprite
    pub fn script_lengths_for_sprite(&self, name: &str) -> Result<Vec<usize>, ModelError> {
        self.require(name)?.script_lengths_for_sprite(name)
    }

    /// Scripts of the named sprite
    pub fn scripts_for_sprite(&self, name: &str) -> Result<&[Script], ModelError> {
        self.require(name)?.scripts_for_sprite(name)
    }

    /// Scripts attached to the stage (empty on failure)
    pub fn stage_scripts(&self) -> &[Script] {
        self.model().map(ProjectModel::stage_scripts).unwrap_or(&[])
    }

    /// Number of stage variables (zero on failure)
    pub fn global_variable_count(&self) -> usize {
        self.model().map_or(0, ProjectModel::global_variable_count)
    }

    /// Number of stage lists (zero on failure)
    pub fn global_list_count(&self) -> usize {
        self.model().map_or(0, ProjectModel::global_list_count)
    }

    // A failed project has no sprites, so every lookup is unknown
    fn require(&self, name: &str) -> Result<&ProjectModel, ModelError> {
        self.model()
            .ok_or_else(|| ModelError::UnknownSprite(name.to_string()))
    }
}

impl From<ProjectModel> for ProjectAnalysis {
    fn from(model: ProjectModel) -> Self {
        Self {
            name: model.name.clone(),
            outcome: Ok(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn wizard() -> Value {
        json!({
            "objName": "Stage",
            "variables": [
                {"name": "score", "value": 0, "isPersistent": false},
                {"name": "lives", "value": 3, "isPersistent": false}
            ],
            "lists": [{"listName": "inventory", "contents": []}],
            "scripts": [[10, 10, [["whenGreenFlag"], ["broadcast:", "start"]]]],
            "children": [
                {
                    "objName": "Cat",
                    "spriteInfo": {},
                    "scripts": [
                        [20, 30, [["whenGreenFlag"], ["forward:", 10], ["doForever", [["turnRight:", 15]]]]],
                        [100, 40, []]
                    ]
                },
                {"target": "Stage", "cmd": "getVar:", "param": "score", "visible": true},
                {"objName": "Wizard", "spriteInfo": {}, "scripts": [[0, 0, [["say:", "hi"]]]]}
            ]
        })
    }

    fn failing(err: LoadError) -> impl Fn(&Path) -> Result<String, LoadError> {
        move |_: &Path| Err(err.clone())
    }

    #[test]
    fn hand_built_document() {
        let model = ProjectModel::from_document("wizard", wizard());

        assert_eq!(model.name(), "wizard");
        assert_eq!(model.sprite_names(), vec!["Cat", "Wizard"]);
        assert_eq!(model.script_count_for_sprite("Cat"), Ok(2));
        assert_eq!(model.script_lengths_for_sprite("Cat"), Ok(vec![3, 0]));
        assert_eq!(model.script_lengths_for_sprite("Wizard"), Ok(vec![1]));
        assert_eq!(model.stage_scripts().len(), 1);
        assert_eq!(model.stage_scripts()[0].length(), 2);
        assert_eq!(model.global_variable_count(), 2);
        assert_eq!(model.global_list_count(), 1);
        assert_eq!(model.monitor_count(), 1);
        assert_eq!(model.fingerprint(), None);
    }

    #[test]
    fn unknown_sprite_is_distinguishable() {
        let model = ProjectModel::from_document("wizard", wizard());

        assert_eq!(
            model.script_count_for_sprite("Dog"),
            Err(ModelError::UnknownSprite("Dog".to_string()))
        );
        assert!(model.script_lengths_for_sprite("Dog").is_err());
        assert!(model.scripts_for_sprite("Dog").is_err());
        assert_eq!(model.script_count_for_sprite("Cat"), Ok(2));
    }

    #[test]
    fn missing_optional_fields() {
        let model = ProjectModel::from_document("bare", json!({"objName": "Stage"}));

        assert!(model.sprite_names().is_empty());
        assert!(model.stage_scripts().is_empty());
        assert_eq!(model.global_variable_count(), 0);
        assert_eq!(model.global_list_count(), 0);
    }

    #[test]
    fn non_object_document_is_empty() {
        let model = ProjectModel::from_document("odd", json!([1, 2, 3]));

        assert!(model.sprite_names().is_empty());
        assert_eq!(model.global_variable_count(), 0);
    }

    #[test]
    fn corrupt_manifest_text() {
        let err = ProjectModel::from_manifest_text("broken", "{not json").unwrap_err();

        assert_eq!(err.state(), ErrorState::CorruptManifest);
        assert!(err.to_string().starts_with("Corrupt project manifest"));
    }

    #[test]
    fn manifest_text_is_fingerprinted() {
        let text = wizard().to_string();
        let model = ProjectModel::from_manifest_text("wizard", &text).unwrap();

        assert_eq!(model.fingerprint(), Some(fingerprint(&text).as_str()));
        assert_eq!(model.fingerprint().map(str::len), Some(12));
    }

    #[test]
    fn load_through_loader() {
        let text = wizard().to_string();
        let loader = move |_: &Path| Ok::<_, LoadError>(text.clone());

        let model = ProjectModel::load(Path::new("class/wizard.sb2"), &loader).unwrap();
        assert_eq!(model.name(), "wizard");
        assert_eq!(model.sprite_names().len(), 2);
    }

    #[test]
    fn loader_failures_map_to_states() {
        let path = Path::new("alice.sb2");

        let io = failing(LoadError::io(path, "no such file"));
        assert_eq!(
            ProjectModel::load(path, &io).unwrap_err().state(),
            ErrorState::IoFailure
        );

        let missing = failing(LoadError::NoManifest {
            path: path.to_path_buf(),
            entry: "project.json".to_string(),
        });
        assert_eq!(
            ProjectModel::load(path, &missing).unwrap_err().state(),
            ErrorState::NoManifest
        );
    }

    #[test]
    fn failed_analysis_is_empty_but_reportable() {
        let loader = |_: &Path| Ok::<_, LoadError>("{not json".to_string());
        let analysis = ProjectAnalysis::load(Path::new("bob.sb2"), &loader);

        assert_eq!(analysis.name(), "bob");
        assert_eq!(analysis.error_state(), ErrorState::CorruptManifest);
        assert!(analysis.error_message().is_some());
        assert!(analysis.model().is_none());
        assert!(analysis.sprite_names().is_empty());
        assert!(analysis.stage_scripts().is_empty());
        assert_eq!(analysis.global_variable_count(), 0);
        assert_eq!(analysis.fingerprint(), None);
        assert_eq!(
            analysis.script_count_for_sprite("Cat"),
            Err(ModelError::UnknownSprite("Cat".to_string()))
        );
    }

    #[test]
    fn successful_analysis_forwards() {
        let analysis = ProjectAnalysis::from(ProjectModel::from_document("w", wizard()));

        assert_eq!(analysis.error_state(), ErrorState::None);
        assert_eq!(analysis.error_message(), None);
        assert_eq!(analysis.script_lengths_for_sprite("Cat"), Ok(vec![3, 0]));
        assert_eq!(analysis.scripts_for_sprite("Wizard").map(<[Script]>::len), Ok(1));
        assert_eq!(analysis.global_list_count(), 1);
    }

    #[test]
    fn accessors_are_idempotent() {
        let analysis = ProjectAnalysis::from(ProjectModel::from_document("w", wizard()));
        let before = analysis.clone();

        assert_eq!(analysis.sprite_names(), analysis.sprite_names());
        assert_eq!(
            analysis.script_lengths_for_sprite("Cat"),
            analysis.script_lengths_for_sprite("Cat")
        );
        assert_eq!(analysis.stage_scripts(), analysis.stage_scripts());
        assert_eq!(analysis, before);
    }

    #[test]
    fn project_names() {
        assert_eq!(project_name(Path::new("/tmp/class/Alice.sb2")), "Alice");
        assert_eq!(project_name(Path::new("noext")), "noext");
        assert_eq!(project_name(&PathBuf::from("a.b.sb2")), "a.b");
    }
}
