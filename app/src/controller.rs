//! State behind the plot: the fixed dataset layers, the slider value and the
//! synthesized layer that is rebuilt on every slider change.

use std::ops::RangeInclusive;

use smote_lab::{
    class_counts, ConfigError, DataPoint, DatasetError, DemoConfig, DistanceMetric, SmoteError,
};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that prevent the visualizer from starting.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to generate the dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("the dataset needs a majority and a minority class")]
    SingleClass,
}

/// Whether a slider change is still waiting to be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Updating,
}

/// The three scatter layers, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Majority,
    Minority,
    Synthesized,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Majority, Layer::Minority, Layer::Synthesized];

    pub fn label(&self) -> &'static str {
        match self {
            Layer::Majority => "Majority Class",
            Layer::Minority => "Minority Class",
            Layer::Synthesized => "SMOTE",
        }
    }
}

/// Axis-aligned extent of the data, padded on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotBounds {
    fn around(points: &[DataPoint<usize, f64>], padding: f64) -> Self {
        let mut bounds = Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for (x, y) in points.iter().filter_map(DataPoint::xy) {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        if !bounds.min_x.is_finite() {
            return Self { min_x: 0.0, max_x: 1.0, min_y: 0.0, max_y: 1.0 };
        }
        let pad_x = ((bounds.max_x - bounds.min_x) * padding).max(0.5);
        let pad_y = ((bounds.max_y - bounds.min_y) * padding).max(0.5);
        Self {
            min_x: bounds.min_x - pad_x,
            max_x: bounds.max_x + pad_x,
            min_y: bounds.min_y - pad_y,
            max_y: bounds.max_y + pad_y,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

pub struct Controller {
    config: DemoConfig,
    dataset: Vec<DataPoint<usize, f64>>,
    majority: Vec<DataPoint<usize, f64>>,
    minority: Vec<DataPoint<usize, f64>>,
    synthesized: Vec<DataPoint<usize, f64>>,
    bounds: PlotBounds,
    neighbor_range: RangeInclusive<usize>,
    k: usize,
    metric: DistanceMetric,
    resampled: bool,
    state: UpdateState,
    last_error: Option<SmoteError>,
}

impl Controller {
    /// Generates the dataset and splits it into the static layers.
    ///
    /// The synthesized layer starts empty; it is filled by the first slider
    /// change.
    pub fn initialize(config: DemoConfig) -> Result<Self, InitError> {
        let dataset = config.generate_dataset()?;
        let counts = class_counts(&dataset);
        if counts.len() < 2 {
            return Err(InitError::SingleClass);
        }
        let (majority_label, _) = counts.majority().ok_or(InitError::SingleClass)?;
        let (minority_label, minority_count) = counts
            .iter()
            .filter(|(label, _)| **label != majority_label)
            .min_by_key(|(_, count)| *count)
            .map(|(label, count)| (*label, count))
            .ok_or(InitError::SingleClass)?;

        let neighbor_range = config.neighbor_range(minority_count)?;
        let k = config.initial_neighbors_in(&neighbor_range);

        let majority: Vec<_> = dataset.iter().filter(|dp| dp.label == majority_label).cloned().collect();
        let minority: Vec<_> = dataset.iter().filter(|dp| dp.label == minority_label).cloned().collect();
        let bounds = PlotBounds::around(&dataset, 0.05);

        info!(
            majority = majority.len(),
            minority = minority.len(),
            k,
            "visualizer initialised"
        );

        Ok(Self {
            metric: config.metric,
            config,
            dataset,
            majority,
            minority,
            synthesized: Vec::new(),
            bounds,
            neighbor_range,
            k,
            resampled: false,
            state: UpdateState::Idle,
            last_error: None,
        })
    }

    /// Handles a settled slider value; repeated values are ignored.
    ///
    /// Returns `true` if the synthesized layer was rebuilt.
    pub fn slider_moved(&mut self, value: usize) -> bool {
        if value == self.k && self.resampled {
            return false;
        }
        self.on_slider_change(value);
        true
    }

    /// Reruns SMOTE with `new_k` and replaces the synthesized layer.
    ///
    /// A failed resampling clears the layer and is kept as `last_error`.
    pub fn on_slider_change(&mut self, new_k: usize) {
        self.state = UpdateState::Updating;
        self.k = new_k;
        self.resampled = true;

        let result = self.metric.resample(
            &self.dataset,
            new_k,
            self.config.strategy,
            self.config.resample_seed,
        );
        match result {
            Ok(points) => {
                info!(k = new_k, metric = %self.metric, n_synthetic = points.len(), "synthesized layer updated");
                self.synthesized = points;
                self.last_error = None;
            }
            Err(err) => {
                warn!(k = new_k, %err, "SMOTE failed; clearing synthesized layer");
                self.synthesized.clear();
                self.last_error = Some(err);
            }
        }
    }

    /// Switches the metric, rerunning SMOTE if a layer is already shown.
    pub fn set_metric(&mut self, metric: DistanceMetric) {
        if metric == self.metric {
            return;
        }
        self.metric = metric;
        if self.resampled {
            self.on_slider_change(self.k);
        }
    }

    /// Marks the pending update as painted.
    pub fn finish_redraw(&mut self) {
        self.state = UpdateState::Idle;
    }

    pub fn layer(&self, layer: Layer) -> &[DataPoint<usize, f64>] {
        match layer {
            Layer::Majority => &self.majority,
            Layer::Minority => &self.minority,
            Layer::Synthesized => &self.synthesized,
        }
    }

    /// Legend text for a layer, including its point count.
    pub fn legend_entry(&self, layer: Layer) -> String {
        format!("{} ({})", layer.label(), self.layer(layer).len())
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    pub fn neighbor_range(&self) -> RangeInclusive<usize> {
        self.neighbor_range.clone()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    pub fn last_error(&self) -> Option<&SmoteError> {
        self.last_error.as_ref()
    }
}
