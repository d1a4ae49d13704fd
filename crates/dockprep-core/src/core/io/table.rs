use crate::core::models::atom::{AtomRecord, AtomTable};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableExportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Serialize)]
struct AtomRow<'a> {
    atom_name: &'a str,
    serial: i64,
    atom_type: &'a str,
    residue_name: &'a str,
    chain_id: &'a str,
    residue_number: i64,
    x: f64,
    y: f64,
    z: f64,
}

impl<'a> From<&'a AtomRecord> for AtomRow<'a> {
    fn from(r: &'a AtomRecord) -> Self {
        Self {
            atom_name: &r.atom_name,
            serial: r.serial,
            atom_type: &r.atom_type,
            residue_name: &r.residue_name,
            chain_id: &r.chain_id,
            residue_number: r.residue_number,
            x: r.position.x,
            y: r.position.y,
            z: r.position.z,
        }
    }
}

fn write_rows<W: Write>(table: &AtomTable, mut writer: csv::Writer<W>) -> Result<(), csv::Error> {
    for record in table.records() {
        writer.serialize(AtomRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the accepted atoms as CSV with a header row
/// (`atom_name,serial,atom_type,residue_name,chain_id,residue_number,x,y,z`).
pub fn write_csv<W: Write>(table: &AtomTable, writer: W) -> Result<(), TableExportError> {
    write_rows(table, csv::Writer::from_writer(writer)).map_err(|e| TableExportError::Csv {
        path: "<stream>".to_string(),
        source: e,
    })
}

pub fn write_csv_to_path(table: &AtomTable, path: &Path) -> Result<(), TableExportError> {
    let to_error = |e| TableExportError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    let writer = csv::Writer::from_path(path).map_err(to_error)?;
    write_rows(table, writer).map_err(to_error)
}
