use std::fs::File;
use std::path::Path;

use super::{Extracted, Sink};
use crate::error::{Error, Result};
use crate::format::TarCompress;

pub(super) fn extract(mut file: File, destination: &Path) -> Result<Extracted> {
    let codec = TarCompress::detect_from_reader(&mut file)?;
    tracing::debug!(codec = codec.name(), "tar codec detected");

    let mut archive = tar::Archive::new(codec.decoder(file)?);
    let mut sink = Sink::new(destination);

    let entries = archive.entries().map_err(|e| Error::Corrupted(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::Corrupted(e.to_string()))?;
        let path = entry
            .path()
            .map_err(|e| Error::Corrupted(e.to_string()))?
            .into_owned();
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            sink.directory(&path)?;
        } else if entry_type.is_file() {
            let mode = entry.header().mode().ok();
            sink.file(&path, &mut entry, mode)?;
        } else {
            sink.skip(&path, "not a regular file");
        }
    }

    Ok(sink.finish())
}
