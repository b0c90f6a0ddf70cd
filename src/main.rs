// Headless walk through the slider range of the SMOTE demo.
use smote_lab::{class_counts, logging, DemoConfig};
use std::error::Error;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logging()?;

    let config = DemoConfig::default();
    let data = config.generate_dataset()?;
    let counts = class_counts(&data);
    let (minority, minority_count) = counts.minority().ok_or("dataset is empty")?;
    let (majority, majority_count) = counts.majority().ok_or("dataset is empty")?;
    info!(minority, minority_count, majority, majority_count, "generated dataset");

    let range = config.neighbor_range(minority_count)?;
    for k in range {
        let synthetic = config
            .metric
            .resample(&data, k, config.strategy, config.resample_seed)?;
        info!(k, metric = %config.metric, n_synthetic = synthetic.len(), "resampled");
    }

    // One step past what the minority class supports.
    let too_many = minority_count - 1;
    match config.metric.resample(&data, too_many, config.strategy, config.resample_seed) {
        Ok(synthetic) => warn!(k = too_many, n_synthetic = synthetic.len(), "expected a failure"),
        Err(err) => info!(k = too_many, %err, "rejected as expected"),
    }
    Ok(())
}
