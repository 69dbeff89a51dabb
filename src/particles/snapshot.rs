//! CSV particle snapshot reader.
//!
//! A snapshot file has one header line followed by rows of comma-separated numbers. Only the
//! first three fields (x, y, z) are read; anything after them (radius, velocity, ...) is ignored.

use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::Position3,
    error::{DrumviewError, DrumviewResult},
};

/// Read every data row of a particle CSV file, in file order.
///
/// Fails with [`DrumviewError::DataFormat`] if the file cannot be opened, contains no data rows,
/// or any row has fewer than three fields or a non-numeric x/y/z.
pub fn read_snapshot(path: &Path) -> DrumviewResult<Vec<Position3>> {
    let file = File::open(path).map_err(|e| {
        DrumviewError::data_format(format!(
            "failed to open particle file '{}': {e}",
            path.display()
        ))
    })?;
    let positions = parse_snapshot(BufReader::new(file), path)?;
    if positions.is_empty() {
        return Err(DrumviewError::data_format(format!(
            "particle file '{}' has no data rows",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), rows = positions.len(), "read particle snapshot");
    Ok(positions)
}

fn parse_snapshot<R: std::io::Read>(reader: R, path: &Path) -> DrumviewResult<Vec<Position3>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            DrumviewError::data_format(format!("malformed row in '{}': {e}", path.display()))
        })?;
        // 1-based file line, header included.
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 3 {
            return Err(DrumviewError::data_format(format!(
                "'{}' line {line}: expected at least 3 fields, found {}",
                path.display(),
                record.len()
            )));
        }
        let x = parse_coord(&record, 0, path, line)?;
        let y = parse_coord(&record, 1, path, line)?;
        let z = parse_coord(&record, 2, path, line)?;
        out.push(Position3::new(x, y, z));
    }
    Ok(out)
}

fn parse_coord(record: &csv::StringRecord, idx: usize, path: &Path, line: u64) -> DrumviewResult<f64> {
    let raw = record.get(idx).unwrap_or("");
    let v: f64 = raw.parse().map_err(|_| {
        DrumviewError::data_format(format!(
            "'{}' line {line}: field {idx} is not a number: {raw:?}",
            path.display()
        ))
    })?;
    if !v.is_finite() {
        return Err(DrumviewError::data_format(format!(
            "'{}' line {line}: field {idx} is not finite: {raw:?}",
            path.display()
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/particles/snapshot.rs"]
mod tests;
