use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Value;

// ---------------------------------------------------------------------------
// Categorical series colours
// ---------------------------------------------------------------------------

/// Stable value → colour assignment for categorical chart series (cluster
/// labels, year groups).  Hues are spaced evenly around the wheel so
/// neighbouring labels stay visually apart; values not in the mapping
/// fall back to gray.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<Value, Color32>,
    fallback: Color32,
}

impl SeriesColors {
    /// Assign colours to the distinct values of an iterator.  Duplicates
    /// collapse; assignment order is the values' sort order, so the same
    /// set always gets the same colours.
    pub fn for_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let distinct: BTreeSet<Value> = values.into_iter().collect();
        let n = distinct.len();
        let mapping = distinct
            .into_iter()
            .enumerate()
            .map(|(i, value)| (value, spaced_hue(i, n)))
            .collect();
        SeriesColors {
            mapping,
            fallback: Color32::GRAY,
        }
    }

    pub fn get(&self, value: &Value) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(self.fallback)
    }
}

/// The i-th of n evenly spaced hues at fixed saturation/lightness.
fn spaced_hue(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n.max(1) as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.72, 0.52);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_values_same_colors_regardless_of_order() {
        let a = SeriesColors::for_values([Value::Integer(2), Value::Integer(0), Value::Integer(1)]);
        let b = SeriesColors::for_values([Value::Integer(0), Value::Integer(1), Value::Integer(2)]);
        for cluster in 0..3 {
            assert_eq!(a.get(&Value::Integer(cluster)), b.get(&Value::Integer(cluster)));
        }
    }

    #[test]
    fn unknown_value_falls_back_to_gray() {
        let colors = SeriesColors::for_values([Value::Integer(0)]);
        assert_eq!(colors.get(&Value::Integer(99)), Color32::GRAY);
    }
}
