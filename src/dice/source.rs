//! Die sources
//!
//! Every face drawn by the pool engine comes through a [`DieSource`], so a
//! session can run on the thread RNG, a seeded RNG, or a fixed script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Face, SIDES};

/// Something that yields d10 faces
pub trait DieSource {
    /// Draw one face in `1..=10`
    fn draw(&mut self) -> Face;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn draw(&mut self) -> Face {
        (**self).draw()
    }
}

impl<S: DieSource + ?Sized> DieSource for Box<S> {
    fn draw(&mut self) -> Face {
        (**self).draw()
    }
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    /// Draw from the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Fresh `StdRng` seeded from the OS
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DieSource for RngSource<R> {
    fn draw(&mut self) -> Face {
        self.rng.random_range(1..=SIDES)
    }
}

/// Replays a fixed sequence of faces, cycling when it runs out
#[derive(Debug, Clone)]
pub struct FixedSource {
    faces: Vec<Face>,
    index: usize,
}

impl FixedSource {
    /// Create a source from a face sequence
    ///
    /// # Panics
    /// If `faces` is empty or holds a value outside `1..=10`.
    pub fn new(faces: impl Into<Vec<Face>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "FixedSource needs at least one face");
        if let Some(bad) = faces.iter().find(|&&f| !(1..=SIDES).contains(&f)) {
            panic!("FixedSource face {} is not a d10 face", bad);
        }
        Self { faces, index: 0 }
    }

    /// Always return the same face
    pub fn constant(face: Face) -> Self {
        Self::new(vec![face])
    }

    /// Number of faces drawn so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl DieSource for FixedSource {
    fn draw(&mut self) -> Face {
        let face = self.faces[self.index % self.faces.len()];
        self.index += 1;
        face
    }
}
