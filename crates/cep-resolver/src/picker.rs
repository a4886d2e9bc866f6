//! Random image selection

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::package::EvidencePackage;

/// Pick a random image from a folder
///
/// Never cached: every call draws again.
pub fn pick_image(folder: &Path, recursive: bool) -> Option<PathBuf> {
    pick_image_with(&mut rand::thread_rng(), folder, recursive)
}

/// Pick an image with an injected RNG
///
/// Candidates are sorted first, so a seeded RNG always picks the same file.
pub fn pick_image_with<R: Rng + ?Sized>(rng: &mut R, folder: &Path, recursive: bool) -> Option<PathBuf> {
    let package = if recursive {
        EvidencePackage::discover_recursive(folder)
    } else {
        EvidencePackage::discover(folder)
    };
    package.images.choose(rng).cloned()
}
