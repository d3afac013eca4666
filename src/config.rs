use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use shakmaty::Color;

use crate::{error::EngineError, neural::Backend};

pub const DEFAULT_SEARCH_DEPTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Which evaluator the agent scores leaves with. The heuristic drives a
/// deterministic alpha-beta search, the neural model the sampled policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
    Neural,
}

/// Agent settings, typically read from JSON:
///
/// ```json
/// { "color": "black", "search_depth": 2, "evaluator": "neural",
///   "model_path": "models/value.onnx", "seed": 42 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub color: Side,
    #[serde(default = "default_search_depth")]
    pub search_depth: u32,
    #[serde(default)]
    pub evaluator: EvaluatorKind,
    /// ONNX value model, required for [`EvaluatorKind::Neural`].
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub backend: Backend,
    /// Seed for move sampling; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_search_depth() -> u32 {
    DEFAULT_SEARCH_DEPTH
}

impl AgentConfig {
    pub fn new(color: Color, search_depth: u32, evaluator: EvaluatorKind) -> Self {
        Self {
            color: color.fold_wb(Side::White, Side::Black),
            search_depth,
            evaluator,
            model_path: None,
            backend: Backend::default(),
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn color(&self) -> Color {
        self.color.into()
    }
}
