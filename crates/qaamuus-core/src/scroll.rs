use qaamuus_types::ScrollMetrics;

/// Decides when a scroll position is close enough to the bottom to fetch more
#[derive(Debug, Clone, Copy)]
pub struct ScrollDriver {
    threshold_px: f64,
}

impl ScrollDriver {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px: threshold_px.max(0.0),
        }
    }

    pub fn near_bottom(&self, metrics: &ScrollMetrics) -> bool {
        metrics.content_height > 0.0 && metrics.distance_to_bottom() <= self.threshold_px
    }
}
