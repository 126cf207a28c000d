//! Chart instance lifecycle.
//!
//! The rendering target is a single exclusively-owned resource: at most
//! one chart instance is alive at a time and the previous instance is
//! explicitly disposed before its replacement is created.

use crate::transform::ChartDataset;
use tracing::info;

/// A live chart bound to the rendering target.
#[cfg_attr(test, mockall::automock)]
pub trait ChartInstance: Send {
    /// Release the rendering target.
    fn dispose(&mut self);
}

/// Factory seam for the concrete rendering layer.
#[cfg_attr(test, mockall::automock)]
pub trait ChartBackend: Send {
    fn create(&self, dataset: &ChartDataset) -> Box<dyn ChartInstance>;
}

/// Owns the single live chart instance.
pub struct ChartRenderer {
    backend: Box<dyn ChartBackend>,
    active: Option<Box<dyn ChartInstance>>,
}

impl ChartRenderer {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    /// Replace the displayed chart with a fresh instance for `dataset`.
    ///
    /// The previous instance is disposed before the new one is created.
    pub fn render(&mut self, dataset: &ChartDataset) {
        if let Some(mut old) = self.active.take() {
            old.dispose();
        }
        self.active = Some(self.backend.create(dataset));
    }

    /// Dispose the current instance without replacing it.
    pub fn clear(&mut self) {
        if let Some(mut old) = self.active.take() {
            old.dispose();
        }
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Backend that renders by logging a dataset summary.
///
/// Stands in for the visual layer, which is outside this core.
#[derive(Debug, Default)]
pub struct LogChartBackend;

struct LogChartInstance {
    points: usize,
}

impl ChartInstance for LogChartInstance {
    fn dispose(&mut self) {
        info!(points = self.points, "Disposing chart instance");
    }
}

impl ChartBackend for LogChartBackend {
    fn create(&self, dataset: &ChartDataset) -> Box<dyn ChartInstance> {
        info!(
            hours = dataset.labels.len(),
            series = dataset.series.len(),
            "Rendering activity chart"
        );
        Box::new(LogChartInstance {
            points: dataset.labels.len() * dataset.series.len(),
        })
    }
}
