//! Value trend chart geometry in a 100×100 view box.

use estate_types::ValuePoint;

/// Horizontal gridline positions.
pub const GRIDLINES: [f64; 3] = [25.0, 50.0, 75.0];

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    /// `(x, y)` per data point; `y` grows downwards.
    pub points: Vec<(f64, f64)>,
    pub min: f64,
    pub max: f64,
}

impl TrendChart {
    /// Lay out `history`. Returns `None` when there is nothing to plot.
    pub fn from_history(history: &[ValuePoint]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        let max = history.iter().map(|p| p.value).fold(f64::MIN, f64::max);
        let min = history.iter().map(|p| p.value).fold(f64::MAX, f64::min);
        let span = if max - min == 0.0 { 1.0 } else { max - min };
        let last = (history.len() - 1).max(1) as f64;

        let points = history
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = i as f64 / last * 100.0;
                let y = 100.0 - (p.value - min) / span * 100.0;
                (x, y)
            })
            .collect();
        Some(Self { points, min, max })
    }

    /// SVG `points` attribute for the line.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value at each of the [`GRIDLINES`], from the top line down.
    pub fn gridline_values(&self) -> Vec<f64> {
        let span = self.max - self.min;
        GRIDLINES
            .iter()
            .map(|y| self.max - y / 100.0 * span)
            .collect()
    }

    /// SVG `points` attribute for the filled area under the line.
    pub fn area(&self) -> String {
        format!("0,100 {} 100,100", self.polyline())
    }
}
