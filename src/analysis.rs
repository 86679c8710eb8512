//! Robust I/O statistics and outlier emphasis.
//!
//! The host table highlights unusually high network/disk throughput without
//! flooding the screen when most values are similar. Per render pass the
//! viewer gathers every visible host's combined rate into one sample set per
//! column, summarizes it once ([`build_io_distribution`]), then classifies
//! each cell against the shared summary ([`classify_io`]).
//!
//! Classification uses a modified z-score (`0.6745 * (x - median) / MAD`),
//! which stays usable on skewed, non-normal samples where mean/stddev would
//! be dragged around by the very outliers being looked for. Degenerate
//! inputs get dedicated fallbacks: tiny sample sets use a near-max ratio,
//! uniform samples (MAD = 0) use raw percentile thresholds.

use std::cmp::Ordering;

/// Scale factor turning MAD distance into a modified z-score.
const MODIFIED_Z_SCALE: f64 = 0.6745;
/// Modified z-score at or above which a value is a hard outlier.
const Z_HOT: f64 = 6.5;
/// Modified z-score at or above which a value is elevated.
const Z_ELEVATED: f64 = 5.5;
/// Below this many samples the z-score is too unstable to trust.
const MIN_ROBUST_SAMPLES: usize = 4;
/// Near-max ratio used instead of z-scores on tiny sample sets.
const NEAR_MAX_RATIO: f64 = 0.995;

/// Robust summary of one I/O column across the visible host set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IoDistribution {
    /// Median of the filtered samples.
    pub median: f64,
    /// Median absolute deviation, unscaled.
    pub mad: f64,
    /// Largest sample; never negative.
    pub max: f64,
    /// 97th percentile, nearest-rank.
    pub p97: f64,
    /// 99th percentile, nearest-rank.
    pub p99: f64,
    /// Number of samples that survived filtering.
    pub count: usize,
}

/// Shared distributions for the two I/O columns of the host table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IoScale {
    pub network: IoDistribution,
    pub disk_io: IoDistribution,
}

/// Visual emphasis tier, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmphasisTier {
    /// Idle cell, rendered dimmed.
    Faint,
    /// Unremarkable value, default rendering.
    Normal,
    /// Elevated value, worth a glance.
    Elevated,
    /// Hard outlier.
    Hot,
}

/// Emphasis decision for one cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoEmphasis {
    pub tier: EmphasisTier,
    /// Show the outlier marker next to the value.
    pub outlier_hint: bool,
}

impl IoEmphasis {
    fn plain(tier: EmphasisTier) -> IoEmphasis {
        IoEmphasis {
            tier,
            outlier_hint: false,
        }
    }

    fn hinted(tier: EmphasisTier) -> IoEmphasis {
        IoEmphasis {
            tier,
            outlier_hint: true,
        }
    }
}

/// Summarizes one column's samples. Non-finite and negative samples are
/// discarded (not zeroed); an empty result yields all-zero stats.
pub fn build_io_distribution(values: &[f64]) -> IoDistribution {
    let mut sorted: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();
    if sorted.is_empty() {
        return IoDistribution::default();
    }
    sorted.sort_by(cmp_f64);

    let count = sorted.len();
    let median = median_of_sorted(&sorted);

    let mut deviations: Vec<f64> = sorted.iter().map(|v| (v - median).abs()).collect();
    deviations.sort_by(cmp_f64);

    IoDistribution {
        median,
        mad: median_of_sorted(&deviations),
        max: sorted[count - 1],
        p97: nearest_rank(&sorted, 0.97),
        p99: nearest_rank(&sorted, 0.99),
        count,
    }
}

/// Classifies one value against its column's shared distribution.
///
/// Branches, in order:
/// 1. non-finite or non-positive value, or an all-idle column -> [`EmphasisTier::Faint`];
/// 2. fewer than [`MIN_ROBUST_SAMPLES`] samples -> near-max ratio check;
/// 3. MAD > 0 -> modified z-score gated by the raw percentiles, so a value
///    needs both statistical distance and absolute rank to light up;
/// 4. MAD = 0 (uniform bulk) -> raw percentile thresholds alone.
pub fn classify_io(value: f64, stats: &IoDistribution) -> IoEmphasis {
    if !value.is_finite() || value <= 0.0 || stats.max <= 0.0 {
        return IoEmphasis::plain(EmphasisTier::Faint);
    }

    if stats.count < MIN_ROBUST_SAMPLES {
        if value / stats.max >= NEAR_MAX_RATIO {
            return IoEmphasis::hinted(EmphasisTier::Elevated);
        }
        return IoEmphasis::plain(EmphasisTier::Normal);
    }

    if stats.mad > 0.0 {
        let z = MODIFIED_Z_SCALE * (value - stats.median) / stats.mad;
        if z >= Z_HOT && value >= stats.p99 {
            return IoEmphasis::hinted(EmphasisTier::Hot);
        }
        if z >= Z_ELEVATED && value >= stats.p97 {
            return IoEmphasis::hinted(EmphasisTier::Elevated);
        }
        return IoEmphasis::plain(EmphasisTier::Normal);
    }

    // Uniform bulk: only the raw percentile rank can distinguish values.
    if value >= stats.p99 {
        IoEmphasis::hinted(EmphasisTier::Hot)
    } else if value >= stats.p97 {
        IoEmphasis::hinted(EmphasisTier::Elevated)
    } else {
        IoEmphasis::plain(EmphasisTier::Normal)
    }
}

/// Median of an ascending slice; 0 for empty input.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Nearest-rank percentile of an ascending slice:
/// `index = ceil(clamp(p, 0, 1) * len) - 1`, clamped into bounds.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// Total order for already-filtered (finite) samples.
fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
