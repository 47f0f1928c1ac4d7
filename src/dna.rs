use rand::Rng;
use tiny_skia as sk;
use std::sync::{Arc, OnceLock};

/// one opaque gray disk. immutable once created; mutation swaps the whole disk.
/// also caches its T-S path
#[derive(Debug)]
pub struct Disk {
    pub x: i32,
    pub y: i32,
    pub r: i32,
    pub gray: u8, // alpha is always full

    // None when the radius can't form a circle (r <= 0)
    cached_path: OnceLock<Option<Arc<sk::Path>>>,
}

// this way stale paths won't be copied if the disk is cloned.
impl Clone for Disk {
    fn clone(&self) -> Self {
        Self::new(self.x, self.y, self.r, self.gray)
    }
}

impl PartialEq for Disk {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.r == other.r && self.gray == other.gray
    }
}

impl Eq for Disk {}

impl Disk {
    pub fn new(x: i32, y: i32, r: i32, gray: u8) -> Self {
        Self { x, y, r, gray, cached_path: OnceLock::new() }
    }

    /// fresh random disk: center in [1, width] x [1, height], radius in [min, max), gray in [1, 255]
    pub fn random<R: Rng>(rng: &mut R, bounds: &DiskBounds) -> Self {
        profiling::scope!("Disk::random");
        let x = rng.random_range(1..=bounds.width as i32);
        let y = rng.random_range(1..=bounds.height as i32);
        let r = rng.random_range(bounds.min_radius..bounds.max_radius);
        let gray = rng.random_range(1..=255u8);
        Self::new(x, y, r, gray)
    }

    /// path is built once and reused for every render of this disk
    pub fn path(&self) -> Option<&sk::Path> {
        self.cached_path
            .get_or_init(|| {
                if self.r <= 0 {
                    return None;
                }
                sk::PathBuilder::from_circle(self.x as f32, self.y as f32, self.r as f32)
                    .map(Arc::new)
            })
            .as_deref()
    }

    /// integer bbox (x0, y0, x1, y1), inclusive
    #[inline]
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.x - self.r, self.y - self.r, self.x + self.r, self.y + self.r)
    }
}

/// everything needed to draw a random disk for a given target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiskBounds {
    pub width: u32,
    pub height: u32,
    pub min_radius: i32,
    pub max_radius: i32,
}

// arc wrapper: children share genes with their parents, nothing is ever copied or edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    pub disks: Vec<Arc<Disk>>,
}

impl Genome {
    pub fn from_disks(disks: Vec<Disk>) -> Self {
        Self { disks: disks.into_iter().map(Arc::new).collect() }
    }

    /// independent random disks, one per gene slot
    pub fn random<R: Rng>(rng: &mut R, gene_count: usize, bounds: &DiskBounds) -> Self {
        profiling::scope!("Genome::random");
        let disks = (0..gene_count)
            .map(|_| Arc::new(Disk::random(rng, bounds)))
            .collect();
        Self { disks }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}
