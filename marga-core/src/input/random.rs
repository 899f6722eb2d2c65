//! Seeded random map source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::GridCoord;
use crate::error::{Result, SearchError};

use super::MapSource;

/// Samples every connectivity bit independently with a fixed probability.
///
/// Masks are directed: the step `u -> v` being open says nothing about
/// `v -> u`. Start and target are distinct random cells. The same seed
/// reproduces the same map and endpoints.
#[derive(Clone, Debug)]
pub struct RandomMapSource {
    width: usize,
    height: usize,
    edge_probability: f64,
    rng: StdRng,
    start: GridCoord,
    target: GridCoord,
}

impl RandomMapSource {
    /// Default probability of keeping each directed edge.
    pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.8;

    /// Create a source over `width x height` cells.
    ///
    /// `seed` makes the map reproducible; `None` draws entropy from the OS.
    /// Fails with [`SearchError::Capacity`] for the dimensions
    /// [`GridMap::new`](crate::grid::GridMap::new) would reject.
    pub fn new(
        width: usize,
        height: usize,
        edge_probability: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        width
            .checked_mul(height)
            .filter(|&n| n > 0 && n <= u32::MAX as usize)
            .ok_or(SearchError::Capacity { width, height })?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let start = GridCoord::new(
            rng.random_range(0..width as i32),
            rng.random_range(0..height as i32),
        );
        let target = loop {
            let candidate = GridCoord::new(
                rng.random_range(0..width as i32),
                rng.random_range(0..height as i32),
            );
            if candidate != start || width * height == 1 {
                break candidate;
            }
        };

        Ok(Self {
            width,
            height,
            edge_probability: edge_probability.clamp(0.0, 1.0),
            rng,
            start,
            target,
        })
    }

    /// Create a seeded source with the default edge probability.
    pub fn seeded(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::new(width, height, Self::DEFAULT_EDGE_PROBABILITY, Some(seed))
    }
}

impl MapSource for RandomMapSource {
    fn generate(&mut self, masks: &mut [u8]) {
        for mask in masks.iter_mut().take(self.width * self.height) {
            let mut bits = 0u8;
            for bit in 0..8 {
                if self.rng.random_bool(self.edge_probability) {
                    bits |= 1 << bit;
                }
            }
            *mask = bits;
        }
    }

    fn start(&self) -> GridCoord {
        self.start
    }

    fn target(&self) -> GridCoord {
        self.target
    }
}
