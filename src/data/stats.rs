//! Dataset inspection and normalization
//!
//! Used before trainer construction: the trainer assumes loaders already
//! yield values in the model's expected range.

use serde::{Deserialize, Serialize};

use super::Batch;
use crate::error::{Result, TrainError};
use crate::Tensor;

/// Summary statistics for one feature stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f32,
    pub std: f32,
    pub min: f32,
    pub max: f32,
}

impl FeatureStats {
    /// Compute statistics over a flat value stream.
    ///
    /// Returns `InvalidConfiguration` when `values` is empty.
    pub fn from_values(values: &[f32]) -> Result<Self> {
        if values.is_empty() {
            return Err(TrainError::InvalidConfiguration(
                "cannot compute statistics over an empty value stream".to_string(),
            ));
        }
        let n = values.len() as f64;
        let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let var = values
            .iter()
            .map(|&v| {
                let d = f64::from(v) - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }
        Ok(Self {
            mean: mean as f32,
            std: var.sqrt() as f32,
            min,
            max,
        })
    }
}

/// Statistics for a whole dataset, split by stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub inputs: FeatureStats,
    pub targets: FeatureStats,
    pub num_batches: usize,
    pub num_samples: usize,
}

/// Compute mean/std/min/max of the input and target streams of a batch set.
pub fn inspect_dataset<'a, I>(batches: I) -> Result<DatasetStats>
where
    I: IntoIterator<Item = &'a Batch>,
{
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut num_batches = 0;
    for batch in batches {
        xs.extend(batch.inputs.to_vec());
        ys.extend(batch.targets.to_vec());
        num_batches += 1;
    }
    let num_samples = xs.len();
    Ok(DatasetStats {
        inputs: FeatureStats::from_values(&xs)?,
        targets: FeatureStats::from_values(&ys)?,
        num_batches,
        num_samples,
    })
}

/// Normalization scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Map values onto `[0, 1]` using the observed min/max.
    MinMax,
    /// Standard score: `(x - mean) / std`.
    ZScore,
}

/// Normalize a tensor using precomputed statistics.
///
/// A degenerate stream (zero range or zero deviation) normalizes to all
/// zeros rather than dividing by zero.
pub fn normalize(tensor: &Tensor, mode: NormalizeMode, stats: &FeatureStats) -> Tensor {
    let values = match mode {
        NormalizeMode::MinMax => {
            let range = stats.max - stats.min;
            if range == 0.0 {
                vec![0.0; tensor.len()]
            } else {
                tensor.data().mapv(|x| (x - stats.min) / range).to_vec()
            }
        }
        NormalizeMode::ZScore => {
            if stats.std == 0.0 {
                vec![0.0; tensor.len()]
            } else {
                tensor.data().mapv(|x| (x - stats.mean) / stats.std).to_vec()
            }
        }
    };
    Tensor::from_vec(values, tensor.requires_grad())
}

/// Fixed-ratio target scaling: divides every value by `scale_value`.
///
/// Useful for regression targets recorded in large units (e.g. percentages).
pub fn scale_y(tensor: &Tensor, scale_value: f32) -> Result<Tensor> {
    if scale_value == 0.0 || !scale_value.is_finite() {
        return Err(TrainError::InvalidConfiguration(format!(
            "scale_value must be finite and non-zero, got {scale_value}"
        )));
    }
    Ok(Tensor::from_vec(
        tensor.data().mapv(|x| x / scale_value).to_vec(),
        tensor.requires_grad(),
    ))
}

/// Inverse of [`scale_y`].
pub fn unscale_y(tensor: &Tensor, scale_value: f32) -> Result<Tensor> {
    if scale_value == 0.0 || !scale_value.is_finite() {
        return Err(TrainError::InvalidConfiguration(format!(
            "scale_value must be finite and non-zero, got {scale_value}"
        )));
    }
    Ok(Tensor::from_vec(
        tensor.data().mapv(|x| x * scale_value).to_vec(),
        tensor.requires_grad(),
    ))
}
