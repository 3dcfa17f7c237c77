//! Local file handling for save, import and export.
//!
//! Hotspot files are validated on this side with the engine's own decoders
//! before anything is sent, so a bad file never reaches the service.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

use std::path::{Path, PathBuf};

use mapview::csv::export_filename;
use mapview::hotspot::HotspotModel;
use mapview::map::{MapId, MapRecord, SaveMapRequest};

use crate::CliError;

/// Build a save request, reading the hotspot JSON list from `hotspots` when
/// given. Without a file, an update keeps the hotspots of `existing` and a
/// create starts empty.
pub fn save_request(
    id: Option<MapId>,
    title: String,
    image_url: String,
    hotspots: Option<&Path>,
    existing: Option<&MapRecord>,
) -> Result<SaveMapRequest, CliError> {
    let hotspots = match (hotspots, existing) {
        (Some(path), _) => HotspotModel::from_json(&std::fs::read_to_string(path)?)?.to_json()?,
        (None, Some(record)) => record.hotspots.clone(),
        (None, None) => "[]".to_owned(),
    };
    Ok(SaveMapRequest { id, title, image_url, hotspots })
}

/// Save request replacing `record`'s hotspots with the rows of a CSV file.
pub fn import_request(record: &MapRecord, csv: &str) -> Result<SaveMapRequest, CliError> {
    let model = HotspotModel::from_csv(csv)?;
    Ok(SaveMapRequest {
        id: Some(record.id),
        title: record.title.clone(),
        image_url: record.image_url.clone(),
        hotspots: model.to_json()?,
    })
}

/// Destination of an export taken at `timestamp_ms` into `dir`.
#[must_use]
pub fn export_path(dir: &Path, timestamp_ms: u128) -> PathBuf {
    dir.join(export_filename(timestamp_ms))
}
