//! Site distribution: produces the ordered 2D point sets that tessellation
//! and placement algorithms consume.
//!
//! Order matters: the site index space is what later associates a Voronoi
//! cell with its originating site, and the minimum-distance filter is
//! defined over generation order.

use crate::geom::Rect;
use crate::prng::Xorshift64;
use glam::DVec2;

/// Fraction of a grid cell by which `Uniform` jitters each cell center.
const GRID_JITTER: f64 = 0.3;

/// Cluster count range the cluster factor maps into.
const MIN_CLUSTERS: f64 = 2.0;
const MAX_CLUSTERS: f64 = 10.0;

/// How a site set is distributed over the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Uniform random over the bounds.
    #[default]
    Random,
    /// Jittered grid: cell centers displaced by up to 30% of cell size.
    Uniform,
    /// Points gathered around a handful of cluster centers.
    Clustered,
}

impl Distribution {
    /// Parses a distribution name; unrecognized names fall back to `Random`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "uniform" => Distribution::Uniform,
            "clustered" => Distribution::Clustered,
            _ => Distribution::Random,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Uniform => "uniform",
            Distribution::Clustered => "clustered",
        }
    }
}

/// Inputs to a site generation pass.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Target number of sites.
    pub count: usize,
    /// Placement bounds (canvas inset by the boundary margin).
    pub bounds: Rect,
    pub distribution: Distribution,
    /// Greedy minimum-distance threshold; 0 disables the filter.
    pub min_distance: f64,
    /// [0, 1], linearly mapped to 2..=10 clusters (`Clustered` only).
    pub cluster_factor: f64,
    /// [0, 1], higher is tighter (smaller cluster radius; `Clustered` only).
    pub cluster_tightness: f64,
}

/// Generates an ordered site list under the configured policy.
///
/// All randomness comes from `rng`, which the caller seeds once per
/// generation pass; the output is a pure function of (config, rng state).
pub fn generate_sites(cfg: &SiteConfig, rng: &mut Xorshift64) -> Vec<DVec2> {
    if cfg.count == 0 || cfg.bounds.width <= 0.0 || cfg.bounds.height <= 0.0 {
        return Vec::new();
    }
    let sites = match cfg.distribution {
        Distribution::Random => random_sites(cfg, rng),
        Distribution::Uniform => jittered_grid_sites(cfg, rng),
        Distribution::Clustered => clustered_sites(cfg, rng),
    };
    if cfg.min_distance > 0.0 {
        min_distance_filter(sites, cfg.min_distance)
    } else {
        sites
    }
}

fn random_sites(cfg: &SiteConfig, rng: &mut Xorshift64) -> Vec<DVec2> {
    let b = cfg.bounds;
    (0..cfg.count)
        .map(|_| {
            DVec2::new(
                rng.next_range(b.x, b.x + b.width),
                rng.next_range(b.y, b.y + b.height),
            )
        })
        .collect()
}

/// Chooses column/row counts matching the bounds aspect ratio, then jitters
/// each cell center by up to [`GRID_JITTER`] of the cell size. The grid may
/// hold slightly more cells than requested; the list is truncated to
/// `count` in row-major order.
fn jittered_grid_sites(cfg: &SiteConfig, rng: &mut Xorshift64) -> Vec<DVec2> {
    let b = cfg.bounds;
    let aspect = b.width / b.height;
    let cols = ((cfg.count as f64 * aspect).sqrt().round() as usize).max(1);
    let rows = cfg.count.div_ceil(cols).max(1);
    let cell_w = b.width / cols as f64;
    let cell_h = b.height / rows as f64;

    let mut sites = Vec::with_capacity(cfg.count);
    'grid: for row in 0..rows {
        for col in 0..cols {
            if sites.len() == cfg.count {
                break 'grid;
            }
            let cx = b.x + (col as f64 + 0.5) * cell_w;
            let cy = b.y + (row as f64 + 0.5) * cell_h;
            let jx = rng.next_range(-GRID_JITTER, GRID_JITTER) * cell_w;
            let jy = rng.next_range(-GRID_JITTER, GRID_JITTER) * cell_h;
            sites.push(DVec2::new(cx + jx, cy + jy));
        }
    }
    sites
}

/// Places cluster centers uniformly, then each site by a polar offset
/// (uniform angle, uniform radius) from a uniformly chosen center, clamped
/// into the bounds.
fn clustered_sites(cfg: &SiteConfig, rng: &mut Xorshift64) -> Vec<DVec2> {
    let b = cfg.bounds;
    let factor = cfg.cluster_factor.clamp(0.0, 1.0);
    let clusters = (MIN_CLUSTERS + factor * (MAX_CLUSTERS - MIN_CLUSTERS)).round() as usize;
    let max_radius = cluster_radius(&b, cfg.cluster_tightness);

    let centers: Vec<DVec2> = (0..clusters)
        .map(|_| {
            DVec2::new(
                rng.next_range(b.x, b.x + b.width),
                rng.next_range(b.y, b.y + b.height),
            )
        })
        .collect();

    (0..cfg.count)
        .map(|_| {
            let center = centers[rng.next_usize(centers.len())];
            let angle = rng.next_range(0.0, std::f64::consts::TAU);
            let radius = rng.next_range(0.0, max_radius);
            b.clamp_point(center + DVec2::new(angle.cos(), angle.sin()) * radius)
        })
        .collect()
}

/// Linear map from tightness in [0, 1] to a maximum polar radius: fully
/// loose spreads over ~35% of the short bounds dimension, fully tight
/// collapses to ~5%.
fn cluster_radius(bounds: &Rect, tightness: f64) -> f64 {
    let t = tightness.clamp(0.0, 1.0);
    let short = bounds.width.min(bounds.height);
    short * (0.05 + (1.0 - t) * 0.30)
}

/// Greedy minimum-distance filter: scans points in generation order and
/// keeps a point only if it clears every already-kept point by more than
/// `min_distance`.
///
/// This is deliberately order-dependent and not a true Poisson-disc
/// sampler — later points can be rejected even where space remains.
/// Changing it would change output for existing seeds.
pub fn min_distance_filter(sites: Vec<DVec2>, min_distance: f64) -> Vec<DVec2> {
    let mut kept: Vec<DVec2> = Vec::with_capacity(sites.len());
    for p in sites {
        if kept.iter().all(|q| p.distance(*q) > min_distance) {
            kept.push(p);
        }
    }
    kept
}
