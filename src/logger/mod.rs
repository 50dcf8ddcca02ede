//! Run artifacts: loss curves as CSV and plain-text summaries
//!
//! The trainer itself only prints progress; anything durable goes through
//! here. The CSV is the interface for downstream plotting tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::train::{EpochRecord, TrainConfig, TrainResult};

/// Write the loss history as CSV with an `epoch,train,val` header.
pub fn save_csv(path: &Path, history: &[EpochRecord]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "epoch,train,val")?;
    for record in history {
        writeln!(
            writer,
            "{},{},{}",
            record.epoch, record.train_loss, record.val_loss
        )?;
    }
    writer.flush()
}

/// Write a human-readable run summary.
///
/// Includes the model name, the active configuration, the run outcome,
/// an optional held-out test metric, and a timestamp.
pub fn write_summary(
    path: &Path,
    model_name: &str,
    config: &TrainConfig,
    result: &TrainResult,
    test_loss: Option<f32>,
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "=== Training Summary ===")?;
    writeln!(writer, "date: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "model: {model_name}")?;
    writeln!(writer)?;

    writeln!(writer, "[config]")?;
    for (key, value) in config.summary_pairs() {
        writeln!(writer, "{key}: {value}")?;
    }
    writeln!(writer)?;

    writeln!(writer, "[result]")?;
    writeln!(writer, "epochs_completed: {}", result.final_epoch())?;
    writeln!(writer, "stopped_early: {}", result.stopped_early)?;
    writeln!(writer, "best_epoch: {}", result.best_epoch)?;
    writeln!(writer, "best_val_loss: {:.6}", result.best_val_loss)?;
    if let Some(train_loss) = result.final_train_loss() {
        writeln!(writer, "final_train_loss: {train_loss:.6}")?;
    }
    if let Some(test_loss) = test_loss {
        writeln!(writer, "test_loss: {test_loss:.6}")?;
    }
    writeln!(writer, "elapsed_secs: {:.2}", result.elapsed_secs)?;

    writer.flush()
}
