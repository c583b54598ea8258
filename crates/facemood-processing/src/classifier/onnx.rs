//! tract-backed classifier for serialized ONNX models.

use std::path::Path;

use tract_onnx::prelude::*;

use super::Classifier;
use crate::image::{FaceTensor, FACE_SIZE};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Input rank the loaded model accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLayout {
    /// `[1, 48, 48, 1]`
    ChannelsLast,
    /// `[1, 48, 48]`
    NoChannel,
}

impl InputLayout {
    pub fn shape(self) -> Vec<usize> {
        let side = FACE_SIZE as usize;
        match self {
            InputLayout::ChannelsLast => vec![1, side, side, 1],
            InputLayout::NoChannel => vec![1, side, side],
        }
    }
}

pub struct OnnxClassifier {
    model: Plan,
    layout: InputLayout,
}

impl OnnxClassifier {
    /// Load and optimize the model, trying the channels-last layout first.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let model_path = model_path.as_ref();

        match Self::plan_for(model_path, InputLayout::ChannelsLast) {
            Ok(model) => Ok(Self {
                model,
                layout: InputLayout::ChannelsLast,
            }),
            Err(channels_err) => {
                tracing::debug!(
                    error = %channels_err,
                    "Model rejected channels-last input, retrying without channel axis"
                );
                let model = Self::plan_for(model_path, InputLayout::NoChannel).map_err(|e| {
                    e.context(format!(
                        "Failed to load model {} (channels-last attempt: {})",
                        model_path.display(),
                        channels_err
                    ))
                })?;
                Ok(Self {
                    model,
                    layout: InputLayout::NoChannel,
                })
            }
        }
    }

    fn plan_for(model_path: &Path, layout: InputLayout) -> TractResult<Plan> {
        tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(0, f32::fact(layout.shape()).into())?
            .into_optimized()?
            .into_runnable()
    }

    pub fn layout(&self) -> InputLayout {
        self.layout
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn scores(&self, face: &FaceTensor) -> Result<Vec<f32>, anyhow::Error> {
        let input = Tensor::from_shape::<f32>(&self.layout.shape(), face.pixels())?;
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("model produced no outputs"))?
            .to_array_view::<f32>()?;

        Ok(output.iter().copied().collect())
    }
}
