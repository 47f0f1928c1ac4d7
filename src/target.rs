use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::render::Raster;

/// Decode the target image once. RGB is kept as-is and alpha is forced opaque,
/// so the target never carries transparency into the comparison.
pub fn load_target(path: &Path) -> Result<Raster, AppError> {
    profiling::scope!("load_target");
    let img = image::open(path).map_err(|source| AppError::TargetLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba8 = img.to_rgba8();
    let (w, h) = rgba8.dimensions();
    if w == 0 || h == 0 {
        return Err(AppError::EmptyTarget(path.to_path_buf()));
    }

    let mut data = rgba8.into_raw();
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    log::info!("loaded target {} ({}x{})", path.display(), w, h);
    Ok(Raster::from_premul_rgba(w, h, data))
}

/// native open dialog, None when cancelled
pub fn pick_target_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("image", &["png", "jpg", "jpeg", "bmp", "tiff", "gif", "webp"])
        .pick_file()
}
