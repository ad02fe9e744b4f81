//! Raster display support: band statistics over masked samples and the
//! rainbow colormap used by the viewer panel.
use ndarray::Array2;

/// Summary statistics of a band with nodata/non-finite samples excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub rows: usize,
    pub cols: usize,
    pub valid: usize,
}

impl BandStats {
    /// Compute stats over every finite sample that is not `no_data`.
    /// Returns `None` when nothing in the band is usable.
    pub fn compute(data: &Array2<f64>, no_data: Option<f64>) -> Option<BandStats> {
        let (rows, cols) = data.dim();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut valid = 0usize;
        for &v in data.iter() {
            if !is_valid(v, no_data) {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
            valid += 1;
        }
        if valid == 0 {
            return None;
        }
        let mean = sum / valid as f64;
        let variance = (sum_sq / valid as f64 - mean * mean).max(0.0);
        Some(BandStats {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            rows,
            cols,
            valid,
        })
    }

    pub fn summary_text(&self) -> String {
        format!(
            "Min: {:.4}\nMax: {:.4}\nMean: {:.4}\nStd: {:.4}\nShape: ({}, {})",
            self.min, self.max, self.mean, self.std_dev, self.rows, self.cols
        )
    }
}

fn is_valid(v: f64, no_data: Option<f64>) -> bool {
    if !v.is_finite() {
        return false;
    }
    match no_data {
        Some(nd) => v != nd,
        None => true,
    }
}

/// Map a normalized value in [0, 1] onto a blue→cyan→green→yellow→red
/// sweep, approximating the matplotlib rainbow palette.
pub fn rainbow(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    // Hue from 240° (blue) down to 0° (red), full saturation and value.
    let h = (1.0 - t) * 240.0 / 60.0;
    let i = h.floor() as i32;
    let f = h - h.floor();
    let q = 1.0 - f;
    let (r, g, b) = match i {
        0 => (1.0, f, 0.0),
        1 => (q, 1.0, 0.0),
        2 => (0.0, 1.0, f),
        3 => (0.0, q, 1.0),
        _ => (f.min(1.0), 0.0, 1.0),
    };
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}

/// Render a band to interleaved RGB using min→max scaling; masked samples
/// come out black. Row-major, matching the egui texture layout.
pub fn colorize_band(data: &Array2<f64>, stats: &BandStats, no_data: Option<f64>) -> Vec<u8> {
    let range = stats.max - stats.min;
    let mut rgb = Vec::with_capacity(data.len() * 3);
    for &v in data.iter() {
        if !is_valid(v, no_data) {
            rgb.extend_from_slice(&[0, 0, 0]);
            continue;
        }
        let t = if range > 0.0 {
            (v - stats.min) / range
        } else {
            0.5
        };
        rgb.extend_from_slice(&rainbow(t));
    }
    rgb
}

/// A vertical top-max → bottom-min legend strip for the viewer panel.
pub fn legend_strip(height: usize) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(height * 3);
    for row in 0..height {
        let t = if height > 1 {
            1.0 - row as f64 / (height - 1) as f64
        } else {
            1.0
        };
        rgb.extend_from_slice(&rainbow(t));
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn stats_ignore_nodata_and_nan() {
        let data = array![[1.0, 2.0, -9999.0], [3.0, f64::NAN, 4.0]];
        let stats = BandStats::compute(&data, Some(-9999.0)).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.valid, 4);
        assert_eq!((stats.rows, stats.cols), (2, 3));
    }

    #[test]
    fn all_masked_band_has_no_stats() {
        let data = array![[f64::NAN, f64::INFINITY]];
        assert!(BandStats::compute(&data, None).is_none());
    }

    #[test]
    fn rainbow_endpoints() {
        assert_eq!(rainbow(0.0), [0, 0, 255]);
        assert_eq!(rainbow(1.0), [255, 0, 0]);
        // midpoint lands in the green region
        let [r, g, b] = rainbow(0.5);
        assert!(g > r && g > b);
    }

    #[test]
    fn colorize_masks_to_black_and_scales_rest() {
        let data = array![[0.0, 10.0], [f64::NAN, 5.0]];
        let stats = BandStats::compute(&data, None).unwrap();
        let rgb = colorize_band(&data, &stats, None);
        assert_eq!(rgb.len(), 4 * 3);
        assert_eq!(&rgb[0..3], &rainbow(0.0));
        assert_eq!(&rgb[3..6], &rainbow(1.0));
        assert_eq!(&rgb[6..9], &[0, 0, 0]);
    }

    #[test]
    fn constant_band_colors_midscale() {
        let data = array![[7.0, 7.0]];
        let stats = BandStats::compute(&data, None).unwrap();
        let rgb = colorize_band(&data, &stats, None);
        assert_eq!(&rgb[0..3], &rainbow(0.5));
    }
}
