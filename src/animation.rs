use crate::error::GddError;
use crate::render::MapLayer;
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const CONVERT_PROGRAM: &str = "convert";

/// PNG frames of a directory, sorted by file name.
pub async fn collect_frames(dir: &Path) -> Result<Vec<PathBuf>, GddError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(GddError::NoFramesToAnimate(dir.to_path_buf()))
        }
        Err(e) => return Err(GddError::FrameListing(dir.to_path_buf(), e)),
    };
    let mut frames = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| GddError::FrameListing(dir.to_path_buf(), e))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Stitches a layer's daily PNGs into `<animation stem>_<STATE>.gif` with ImageMagick.
pub async fn convert_to_gif(
    layer: MapLayer,
    maps_dir: &Path,
    state: &str,
) -> Result<PathBuf, GddError> {
    let dir = layer.output_dir(maps_dir);
    let frames = collect_frames(&dir).await?;
    if frames.is_empty() {
        return Err(GddError::NoFramesToAnimate(dir));
    }

    let output = layer.animation_path(maps_dir, state);
    info!(
        "Saving {} gif from {} frames to {}",
        layer,
        frames.len(),
        output.display()
    );
    let status = Command::new(CONVERT_PROGRAM)
        .args(&frames)
        .arg(&output)
        .status()
        .await
        .map_err(GddError::AnimationSpawn)?;

    if !status.success() {
        return Err(GddError::AnimationFailed { output, status });
    }
    Ok(output)
}
