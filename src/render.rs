use tiny_skia as sk;
use crate::dna::{Disk, Genome};

// Scratch pixmap reused across calls to avoid allocations.
// One per rayon worker, so population evaluation allocates once per thread.
thread_local! {
    static SCRATCH_PIX: std::cell::RefCell<Option<sk::Pixmap>> =
        std::cell::RefCell::new(None);
}

/// fixed-size RGBA8 raster, premultiplied (tiny-skia's native format).
/// fully transparent pixels read as black on the RGB channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn from_premul_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "raster buffer does not match {width}x{height}",
        );
        Self { width, height, data }
    }

    /// solid opaque fill, mostly for tests and blank targets
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self { width, height, data }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

pub struct CpuRenderer;

impl CpuRenderer {
    /// Full-frame render of a genome onto a transparent raster. Pure: same input, same bytes.
    pub fn render(genome: &Genome, width: u32, height: u32, anti_alias: bool) -> Raster {
        profiling::scope!("CpuRenderer::render");
        let mut pix = sk::Pixmap::new(width, height).expect("pixmap");
        paint_genome(&mut pix, genome, anti_alias);
        Raster { width, height, data: pix.take() }
    }

    /// Render into the thread's scratch pixmap and hand the premultiplied bytes to `f`.
    /// Used by the evaluator hot path; no allocation once the scratch exists.
    pub fn with_rendered<T>(
        genome: &Genome,
        width: u32,
        height: u32,
        anti_alias: bool,
        f: impl FnOnce(&[u8]) -> T,
    ) -> T {
        profiling::scope!("CpuRenderer::with_rendered");

        SCRATCH_PIX.with(|pix_cell| {
            let mut pix_borrow = pix_cell.borrow_mut();
            let need_new = match pix_borrow.as_ref() {
                Some(pm) => pm.width() != width || pm.height() != height,
                None => true,
            };
            if need_new {
                *pix_borrow = Some(sk::Pixmap::new(width, height).expect("scratch pixmap"));
            }
            let pix = pix_borrow.as_mut().expect("scratch pixmap present");

            pix.fill(sk::Color::TRANSPARENT);
            paint_genome(pix, genome, anti_alias);
            f(pix.data())
        })
    }
}

// painter's algorithm: later disks cover earlier ones
fn paint_genome(pix: &mut sk::Pixmap, genome: &Genome, anti_alias: bool) {
    for disk in &genome.disks {
        draw_disk(pix, disk, anti_alias);
    }
}

fn draw_disk(pix: &mut sk::Pixmap, disk: &Disk, anti_alias: bool) {
    profiling::scope!("draw_disk");

    // Quick reject: bbox fully outside the pixmap
    let (x0, y0, x1, y1) = disk.bounds();
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    if x1 < 0 || y1 < 0 || x0 >= w || y0 >= h {
        return;
    }

    let Some(path) = disk.path() else {
        return;
    };

    let mut paint = sk::Paint::default();
    paint.anti_alias = anti_alias;
    paint.set_color_rgba8(disk.gray, disk.gray, disk.gray, 255);

    pix.fill_path(path, &paint, sk::FillRule::Winding, sk::Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::{DiskBounds, Genome};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pixel(r: &Raster, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * r.width() + x) * 4) as usize;
        let d = r.data();
        [d[i], d[i + 1], d[i + 2], d[i + 3]]
    }

    #[test]
    fn test_empty_genome_is_transparent() {
        let r = CpuRenderer::render(&Genome::from_disks(vec![]), 8, 6, false);
        assert_eq!(r.width(), 8);
        assert_eq!(r.height(), 6);
        assert!(r.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_render_is_deterministic() {
        let bounds = DiskBounds { width: 32, height: 24, min_radius: 5, max_radius: 10 };
        let mut rng = Pcg32::seed_from_u64(3);
        for aa in [false, true] {
            let g = Genome::random(&mut rng, 120, &bounds);
            let a = CpuRenderer::render(&g, 32, 24, aa);
            let b = CpuRenderer::render(&g, 32, 24, aa);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_later_disk_paints_over_earlier() {
        let under = Disk::new(10, 10, 6, 40);
        let over = Disk::new(10, 10, 6, 220);
        let r = CpuRenderer::render(&Genome::from_disks(vec![under.clone(), over.clone()]), 20, 20, false);
        assert_eq!(pixel(&r, 10, 10), [220, 220, 220, 255]);

        let r = CpuRenderer::render(&Genome::from_disks(vec![over, under]), 20, 20, false);
        assert_eq!(pixel(&r, 10, 10), [40, 40, 40, 255]);
    }

    #[test]
    fn test_disk_is_clipped_at_edges() {
        // center in the corner: three quarters fall outside
        let g = Genome::from_disks(vec![Disk::new(0, 0, 5, 128)]);
        let r = CpuRenderer::render(&g, 10, 10, false);
        assert_eq!(pixel(&r, 1, 1), [128, 128, 128, 255]);
        assert_eq!(pixel(&r, 9, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn test_zero_radius_disk_draws_nothing() {
        let g = Genome::from_disks(vec![Disk::new(5, 5, 0, 255)]);
        let r = CpuRenderer::render(&g, 10, 10, true);
        assert!(r.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_offscreen_disk_draws_nothing() {
        let g = Genome::from_disks(vec![Disk::new(-50, 200, 9, 255)]);
        let r = CpuRenderer::render(&g, 10, 10, false);
        assert!(r.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scratch_path_matches_full_render() {
        let bounds = DiskBounds { width: 16, height: 16, min_radius: 2, max_radius: 6 };
        let mut rng = Pcg32::seed_from_u64(11);
        let g1 = Genome::random(&mut rng, 30, &bounds);
        let g2 = Genome::random(&mut rng, 30, &bounds);

        let full1 = CpuRenderer::render(&g1, 16, 16, false);
        let full2 = CpuRenderer::render(&g2, 16, 16, false);
        // second call reuses the scratch and must not leak the first genome
        let s1 = CpuRenderer::with_rendered(&g1, 16, 16, false, |d| d.to_vec());
        let s2 = CpuRenderer::with_rendered(&g2, 16, 16, false, |d| d.to_vec());
        assert_eq!(s1, full1.data());
        assert_eq!(s2, full2.data());
    }

    #[test]
    fn test_filled_raster() {
        let r = Raster::filled(3, 2, [1, 2, 3]);
        assert_eq!(r.data().len(), 24);
        assert_eq!(pixel(&r, 2, 1), [1, 2, 3, 255]);
    }
}
