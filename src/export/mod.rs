//! Client-side file export
//!
//! Two file formats leave the client without a server round trip: a JSON
//! document with human-readable names and a delimited CSV/TSV table.

pub mod string_format;
pub mod tabular;

pub use string_format::{PlateStringFormat, WellStringFormat, as_string_format};
pub use tabular::{Delimiter, to_delimited_string, write_delimited};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::common::models::NameMappings;
use crate::plates::PlateMap;

/// Write the named-JSON export document
pub fn write_json_file(plate: &PlateMap, names: &NameMappings, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &as_string_format(plate, names))
        .context("Failed to write plate map JSON")?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    tracing::debug!("Wrote plate map JSON export to {}", path.display());
    Ok(())
}

/// Write the CSV export table
pub fn write_csv_file(plate: &PlateMap, names: &NameMappings, path: &Path) -> Result<()> {
    write_delimited_file(plate, names, Delimiter::Comma, path)
}

/// Write the TSV export table
pub fn write_tsv_file(plate: &PlateMap, names: &NameMappings, path: &Path) -> Result<()> {
    write_delimited_file(plate, names, Delimiter::Tab, path)
}

fn write_delimited_file(
    plate: &PlateMap,
    names: &NameMappings,
    delimiter: Delimiter,
    path: &Path,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    // the csv writer buffers internally, no BufWriter needed
    write_delimited(plate, names, delimiter, file)?;
    tracing::debug!("Wrote plate map table export to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::{CellLine, Drug};
    use crate::plates::{PlateId, PlateMap};

    fn setup() -> (PlateMap, NameMappings) {
        let mut plate = PlateMap::new(PlateId::from(6), 1, 2);
        plate.set_cell_line(0, Some(1));
        plate.set_drug(0, 0, Some(5));
        plate.set_dose(0, 0, Some(1e-6));
        let names = NameMappings::new(
            &[CellLine {
                id: 1,
                name: "BT20".to_string(),
            }],
            &[Drug {
                id: 5,
                name: "Abemaciclib".to_string(),
            }],
        );
        (plate, names)
    }

    #[test]
    fn test_json_file_lands_on_disk_with_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.json");
        let (plate, names) = setup();
        write_json_file(&plate, &names, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["wells"][0]["well"], "A1");
        assert_eq!(value["wells"][0]["cellLine"], "BT20");
        assert_eq!(value["wells"][0]["drugs"][0], "Abemaciclib");
    }

    #[test]
    fn test_csv_and_tsv_files_differ_only_in_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let (plate, names) = setup();
        let csv_path = dir.path().join("plate.csv");
        let tsv_path = dir.path().join("plate.txt");
        write_csv_file(&plate, &names, &csv_path).unwrap();
        write_tsv_file(&plate, &names, &tsv_path).unwrap();
        let csv_text = std::fs::read_to_string(&csv_path).unwrap();
        let tsv_text = std::fs::read_to_string(&tsv_path).unwrap();
        assert_eq!(csv_text.replace(',', "\t"), tsv_text);
    }
}
