use std::fs::File;
use std::path::{Path, PathBuf};

use super::{Extracted, Sink};
use crate::error::{Error, Result};

pub(super) fn extract(file: File, destination: &Path) -> Result<Extracted> {
    let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::Corrupted(e.to_string()))?;
    let mut sink = Sink::new(destination);

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::Corrupted(e.to_string()))?;

        let raw_name = PathBuf::from(file.name());
        let Some(path) = file.enclosed_name().map(|p| p.to_path_buf()) else {
            return Err(Error::ZipSlip {
                entry:    raw_name.clone(),
                resolved: destination.join(raw_name),
            });
        };

        if file.is_dir() {
            sink.directory(&path)?;
        } else if file.is_symlink() {
            sink.skip(&path, "symlink");
        } else {
            let mode = file.unix_mode();
            sink.file(&path, &mut file, mode)?;
        }
    }

    Ok(sink.finish())
}
