use std::f32::consts::TAU;

use super::biome::Biome;
use crate::noise::NoiseField;
use crate::worldgen::Height;

/// Inclusive column range forced to a single height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlatWindow {
    pub start: usize,
    pub end: usize,
    pub height: i32,
}

impl FlatWindow {
    #[inline]
    pub fn contains(&self, x: usize) -> bool {
        x >= self.start && x <= self.end
    }
}

/// Surface row per column. Smaller rows are higher up.
#[derive(Clone, Debug)]
pub struct HeightField {
    heights: Vec<i32>,
    windows: Vec<FlatWindow>,
}

impl HeightField {
    #[cfg(test)]
    pub(crate) fn from_rows(heights: Vec<i32>) -> Self {
        Self {
            heights,
            windows: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, x: i32) -> Option<i32> {
        if x < 0 {
            return None;
        }
        self.heights.get(x as usize).copied()
    }

    /// Height at `x` with the column index clamped into range.
    #[inline]
    pub fn at(&self, x: i32) -> i32 {
        let last = self.heights.len().saturating_sub(1) as i32;
        self.heights
            .get(x.clamp(0, last) as usize)
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn windows(&self) -> &[FlatWindow] {
        &self.windows
    }

    pub fn is_flattened(&self, x: usize) -> bool {
        self.windows.iter().any(|w| w.contains(x))
    }

    /// Highest surface (smallest row) over an inclusive range.
    pub fn top_in(&self, start: i32, end: i32) -> Option<i32> {
        (start..=end).filter_map(|x| self.get(x)).min()
    }

    /// Max minus min height over an inclusive range.
    pub fn spread(&self, start: i32, end: i32) -> Option<i32> {
        let hs: Vec<i32> = (start..=end).filter_map(|x| self.get(x)).collect();
        let lo = hs.iter().min()?;
        let hi = hs.iter().max()?;
        Some(hi - lo)
    }
}

pub struct HeightFieldBuilder<'a> {
    noise: &'a NoiseField,
    cfg: &'a Height,
    rows: usize,
}

impl<'a> HeightFieldBuilder<'a> {
    pub fn new(noise: &'a NoiseField, cfg: &'a Height, rows: usize) -> Self {
        Self { noise, cfg, rows }
    }

    /// Allowed surface rows, inclusive.
    pub fn band(&self) -> (i32, i32) {
        let lo = self.cfg.top_margin.max(0);
        let hi = (self.rows as i32 - self.cfg.bottom_margin).max(lo);
        (lo, hi)
    }

    #[inline]
    fn octave(&self, x: f32, freq: f32, offset: f32, amp: f32) -> f32 {
        self.noise.sample_1d(x * freq + offset) * amp
    }

    /// Raw height of column `x` as if it belonged to `biome`.
    pub fn biome_height(&self, x: usize, biome: Biome) -> f32 {
        let xf = x as f32;
        let shape = match biome {
            Biome::Plains => self.octave(xf, 0.015, 0.0, 5.0) + self.octave(xf, 0.08, 100.0, 1.5),
            Biome::Forest => {
                self.octave(xf, 0.012, 0.0, 12.0) + self.octave(xf, 0.04, 200.0, 4.0) - 5.0
            }
            Biome::Mountains => {
                self.octave(xf, 0.008, 0.0, 35.0)
                    + self.octave(xf, 0.03, 300.0, 15.0)
                    + self.octave(xf, 0.1, 350.0, 5.0)
                    - 25.0
            }
            Biome::Desert => {
                let dunes = if self.cfg.dune_period > 0.0 {
                    self.cfg.dune_amplitude * (xf * TAU / self.cfg.dune_period).sin()
                } else {
                    0.0
                };
                self.octave(xf, 0.025, 0.0, 3.0) + self.octave(xf, 0.12, 400.0, 1.0) + 8.0 + dunes
            }
            Biome::Swamp => {
                self.octave(xf, 0.02, 0.0, 4.0) + self.octave(xf, 0.06, 500.0, 1.5) - 12.0
            }
        };
        self.cfg.base + shape
    }

    /// Height with the previous biome blended in near a biome seam.
    fn blended_height(&self, biomes: &[Biome], x: usize) -> f32 {
        let current = biomes[x];
        let own = self.biome_height(x, current);
        let tw = self.cfg.transition_width;
        if tw == 0 {
            return own;
        }
        let mut run_start = x;
        while run_start > 0 && biomes[run_start - 1] == current && x - run_start < tw {
            run_start -= 1;
        }
        let into = x - run_start;
        if run_start == 0 || into >= tw {
            return own;
        }
        let prev = self.biome_height(x, biomes[run_start - 1]);
        let t = into as f32 / tw as f32;
        prev * (1.0 - t) + own * t
    }

    /// Blended, smoothed, slope-capped and band-clamped heights, before
    /// any window is flattened.
    pub fn synthesize(&self, biomes: &[Biome]) -> Vec<i32> {
        let (lo, hi) = self.band();
        let cap = self.cfg.slope_cap.max(0);
        let weights = &self.cfg.smoothing_weights;
        let own_weight = weights.first().copied().unwrap_or(1.0);
        let mut out: Vec<i32> = Vec::with_capacity(biomes.len());
        for x in 0..biomes.len() {
            let raw = self.blended_height(biomes, x);
            let mut sum = raw * own_weight;
            let mut total = own_weight;
            for (back, w) in weights.iter().enumerate().skip(1).take(3) {
                if back > x {
                    break;
                }
                sum += out[x - back] as f32 * w;
                total += w;
            }
            let smoothed = if total > 0.0 { sum / total } else { raw };
            let mut h = smoothed.round() as i32;
            if let Some(&prev) = out.last() {
                h = h.clamp(prev - cap, prev + cap);
            }
            out.push(h.clamp(lo, hi));
        }
        out
    }

    /// Sets `start..=end` to the window's mean and ramps neighbours back
    /// under the slope cap. Columns inside `protected` are never modified.
    pub fn flatten(
        &self,
        heights: &mut [i32],
        start: usize,
        end: usize,
        protected: &[FlatWindow],
    ) -> Option<FlatWindow> {
        if heights.is_empty() || start > end || start >= heights.len() {
            return None;
        }
        let end = end.min(heights.len() - 1);
        let span = &mut heights[start..=end];
        let mean = (span.iter().map(|&h| h as f64).sum::<f64>() / span.len() as f64).round() as i32;
        span.fill(mean);

        let cap = self.cfg.slope_cap.max(0);
        let is_protected = |x: usize| protected.iter().any(|w| w.contains(x));
        for x in (0..start).rev() {
            if is_protected(x) || !ramp_toward(heights, x, x + 1, cap) {
                break;
            }
        }
        for x in (end + 1)..heights.len() {
            if is_protected(x) || !ramp_toward(heights, x, x - 1, cap) {
                break;
            }
        }
        Some(FlatWindow {
            start,
            end,
            height: mean,
        })
    }

    /// Full height field. Windows are flattened in order; earlier windows
    /// are protected from later ramps.
    pub fn build(&self, biomes: &[Biome], windows: &[(usize, usize)]) -> HeightField {
        let mut heights = self.synthesize(biomes);
        let mut flat: Vec<FlatWindow> = Vec::with_capacity(windows.len());
        for &(start, end) in windows {
            if let Some(w) = self.flatten(&mut heights, start, end, &flat) {
                log::debug!(
                    "flattened columns {}..={} to row {}",
                    w.start,
                    w.end,
                    w.height
                );
                flat.push(w);
            }
        }
        HeightField {
            heights,
            windows: flat,
        }
    }
}

// Pulls `heights[x]` to within `cap` of `heights[anchor]`. Returns false when
// it was already within the cap.
fn ramp_toward(heights: &mut [i32], x: usize, anchor: usize, cap: i32) -> bool {
    let target = heights[anchor];
    let d = heights[x] - target;
    if d.abs() <= cap {
        return false;
    }
    heights[x] = target + d.signum() * cap;
    true
}
