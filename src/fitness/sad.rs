//! Sum of Absolute Differences (SAD) / Manhattan distance on the RGB channels of RGBA8 buffers.
//! alpha is skipped: a transparent premultiplied pixel already reads as black.

/// largest per-pixel contribution: 3 channels at 255 each
pub const MAX_SAD_PER_PIXEL: u64 = 3 * 255;

#[inline]
pub fn sad_rgb(target_rgba: &[u8], current_rgba: &[u8]) -> u64 {
    profiling::scope!("sad_rgb");
    debug_assert_eq!(target_rgba.len(), current_rgba.len());
    debug_assert_eq!(target_rgba.len() % 4, 0);

    // chunks_exact keeps the 4-byte stride visible to the optimizer (no per-pixel bounds checks)
    target_rgba
        .chunks_exact(4)
        .zip(current_rgba.chunks_exact(4))
        .map(|(t, c)| {
            let dr = (t[0] as i32 - c[0] as i32).unsigned_abs();
            let dg = (t[1] as i32 - c[1] as i32).unsigned_abs();
            let db = (t[2] as i32 - c[2] as i32).unsigned_abs();
            (dr + dg + db) as u64
        })
        .sum()
}

/// SAD scaled into [0, 1]: total / (pixels * 3 * 255). zero pixels score 0.
#[inline]
pub fn normalized_sad_rgb(target_rgba: &[u8], current_rgba: &[u8]) -> f64 {
    let pixels = (target_rgba.len() / 4) as u64;
    if pixels == 0 {
        return 0.0;
    }
    sad_rgb(target_rgba, current_rgba) as f64 / (pixels * MAX_SAD_PER_PIXEL) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sad_ignores_alpha() {
        let a = [10, 20, 30, 255];
        let b = [10, 20, 30, 0];
        assert_eq!(sad_rgb(&a, &b), 0);
    }

    #[test]
    fn test_sad_sums_channels() {
        let a = [0, 0, 0, 255, 100, 100, 100, 255];
        let b = [1, 2, 3, 255, 90, 110, 100, 255];
        assert_eq!(sad_rgb(&a, &b), 6 + 20);
    }

    #[test]
    fn test_normalized_extremes() {
        let black = [0u8, 0, 0, 255].repeat(16);
        let white = [255u8, 255, 255, 255].repeat(16);
        assert_eq!(normalized_sad_rgb(&black, &black), 0.0);
        assert_eq!(normalized_sad_rgb(&black, &white), 1.0);
        assert_eq!(normalized_sad_rgb(&[], &[]), 0.0);
    }
}
