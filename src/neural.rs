use std::{path::Path, sync::OnceLock};

use ndarray::{ArrayView3, Axis};
use ort::{session::Session, value::Tensor};
use serde::Deserialize;
use shakmaty::{Chess, Position};
use tracing::{info, warn};

use crate::{
    error::EngineError,
    evaluate::Evaluator,
    tensor::{ENCODED_SHAPE, encode},
    types::Score,
};

/// A pretrained scalar position model.
///
/// `infer` receives one encoded position (shape `[8, 8, 12]`) and returns
/// a White-relative value in `[-1, 1]`.
pub trait ScalarModel {
    fn infer(&mut self, input: ArrayView3<f32>) -> Result<f32, EngineError>;
}

impl<F> ScalarModel for F
where
    F: FnMut(ArrayView3<f32>) -> f32,
{
    fn infer(&mut self, input: ArrayView3<f32>) -> Result<f32, EngineError> {
        check_input_shape(input.shape())?;
        Ok(self(input))
    }
}

pub fn check_input_shape(shape: &[usize]) -> Result<(), EngineError> {
    if shape != &ENCODED_SHAPE[..] {
        return Err(EngineError::ShapeMismatch {
            expected: ENCODED_SHAPE.to_vec(),
            found: shape.to_vec(),
        });
    }
    Ok(())
}

/// Pure-Rust execution provider backing ONNX Runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Tract,
    Candle,
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// Select the runtime backend. Only the first call in a process installs
/// one; later requests for a different backend are logged and ignored.
fn install_backend(backend: Backend) {
    select_backend(&BACKEND, backend, |backend| match backend {
        Backend::Tract => ort::set_api(ort_tract::api()),
        Backend::Candle => ort::set_api(ort_candle::api()),
    });
}

/// Records the first requested backend in `slot`, running `install` for it
/// exactly once, and returns the backend in effect.
fn select_backend(
    slot: &OnceLock<Backend>,
    requested: Backend,
    install: impl FnOnce(Backend) -> bool,
) -> Backend {
    let installed = *slot.get_or_init(|| {
        info!(backend = ?requested, "installing ONNX Runtime backend");
        if !install(requested) {
            warn!(backend = ?requested, "ONNX Runtime API was already set elsewhere");
        }
        requested
    });
    if installed != requested {
        warn!(
            ?requested,
            ?installed,
            "ONNX Runtime backend already installed, keeping it"
        );
    }
    installed
}

/// ONNX value network with a single `[1, 8, 8, 12]` input and a single
/// scalar output.
pub struct OnnxModel {
    session: Session,
}

impl OnnxModel {
    /// Initialize from a local `.onnx` file path
    pub fn from_file(path: impl AsRef<Path>, backend: Backend) -> Result<Self, EngineError> {
        install_backend(backend);
        let path = path.as_ref();
        let session = Session::builder()?.commit_from_file(path)?;
        info!(path = %path.display(), "loaded value model");

        Ok(Self { session })
    }

    /// Initialize from raw bytes
    pub fn from_memory(model_bytes: &[u8], backend: Backend) -> Result<Self, EngineError> {
        install_backend(backend);
        let session = Session::builder()?.commit_from_memory(model_bytes)?;
        info!(bytes = model_bytes.len(), "loaded value model");

        Ok(Self { session })
    }
}

impl ScalarModel for OnnxModel {
    fn infer(&mut self, input: ArrayView3<f32>) -> Result<f32, EngineError> {
        check_input_shape(input.shape())?;
        let batch = input.to_owned().insert_axis(Axis(0));

        let outputs = self.session.run(ort::inputs![Tensor::from_array(batch)?])?;

        let value = outputs[0].try_extract_array::<f32>()?;
        match value.first() {
            Some(&v) if value.len() == 1 => Ok(v),
            _ => Err(EngineError::ShapeMismatch {
                expected: vec![1, 1],
                found: value.shape().to_vec(),
            }),
        }
    }
}

/// Scores positions with a [`ScalarModel`] fed by [`encode`].
pub struct NeuralEvaluator<M> {
    model: M,
}

impl<M: ScalarModel> NeuralEvaluator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: ScalarModel> Evaluator for NeuralEvaluator<M> {
    fn evaluate(&mut self, position: &Chess) -> Result<Score, EngineError> {
        let encoded = encode(position.board());
        self.model.infer(encoded.view())
    }
}
