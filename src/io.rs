//! CSV input and output.
//!
//! Samples are read from a headered CSV with `x`, `y` and `z` columns (in any
//! order; other columns are ignored). Grids are written one CSV record per
//! grid row, bottom row (smallest y) first. Empty cells are written as `nan`.

use crate::binning::BinnedGrid;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::samples::SampleColumns;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

const NAN_FIELD: &str = "nan";

/// Read sample columns from CSV.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a required column is missing or a
/// field is not a number, and [`Error::Csv`] for malformed CSV.
pub fn read_samples<R: Read>(reader: R) -> Result<SampleColumns> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::invalid(format!("missing '{name}' column in sample CSV")))
    };
    let (xi, yi, zi) = (column("x")?, column("y")?, column("z")?);

    let mut samples = SampleColumns::default();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |idx: usize, name: &str| -> Result<f64> {
            let raw = record.get(idx).unwrap_or("");
            raw.parse::<f64>().map_err(|_| {
                Error::invalid(format!("line {line}: {name} value '{raw}' is not a number"))
            })
        };
        samples.push(field(xi, "x")?, field(yi, "y")?, field(zi, "z")?);
    }

    debug!(samples = samples.len(), "read sample CSV");
    Ok(samples)
}

/// Read sample columns from a CSV file.
///
/// # Errors
///
/// See [`read_samples`]; also fails if the file cannot be opened.
pub fn read_samples_from_path(path: impl AsRef<Path>) -> Result<SampleColumns> {
    read_samples(File::open(path)?)
}

/// Write the value grid, one record per row.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_values<W: Write>(writer: W, values: &Grid<f64>) -> Result<()> {
    write_rows(writer, values, |v| {
        if v.is_nan() {
            NAN_FIELD.to_string()
        } else {
            v.to_string()
        }
    })
}

/// Write the count grid, one record per row.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_counts<W: Write>(writer: W, counts: &Grid<usize>) -> Result<()> {
    write_rows(writer, counts, ToString::to_string)
}

/// Write one `row,col,count,indices` record per occupied cell, with the
/// sample indices joined by `;`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_membership<W: Write>(writer: W, grid: &BinnedGrid) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["row", "col", "count", "indices"])?;

    for cell in grid.occupied() {
        let indices = cell
            .members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        wtr.write_record([
            cell.row.to_string(),
            cell.col.to_string(),
            cell.count.to_string(),
            indices,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write, T>(writer: W, grid: &Grid<T>, fmt: impl Fn(&T) -> String) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in grid.iter_rows() {
        wtr.write_record(row.iter().map(&fmt))?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::griddata;

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_read_samples() {
        let csv = "x,y,z\n0.0,0.0,10\n0.05, 0.0, 20\n0.9,0.0,30\n";
        let samples = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(samples.x, vec![0.0, 0.05, 0.9]);
        assert_eq!(samples.z, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_read_samples_column_order_and_extras() {
        let csv = "id,Z,y,x\na,3,2,1\nb,6,5,4\n";
        let samples = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(samples.x, vec![1.0, 4.0]);
        assert_eq!(samples.y, vec![2.0, 5.0]);
        assert_eq!(samples.z, vec![3.0, 6.0]);
    }

    #[test]
    fn test_read_samples_missing_column() {
        let err = read_samples("x,y\n1,2\n".as_bytes()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_read_samples_bad_number() {
        let err = read_samples("x,y,z\n1,2,3\n1,oops,3\n".as_bytes()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_read_samples_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        std::fs::write(&path, "x,y,z\n1,2,3\n").unwrap();

        let samples = read_samples_from_path(&path).unwrap();
        assert_eq!(samples.len(), 1);
        assert!(read_samples_from_path(dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn test_write_values_marks_empty_cells() {
        let grid = griddata(&[0.0, 2.0], &[0.0, 0.0], &[1.5, 2.0], 1.0).unwrap();
        let mut buf = Vec::new();
        write_values(&mut buf, grid.values()).unwrap();
        assert_eq!(to_string(buf), "1.5,nan,2\n");
    }

    #[test]
    fn test_write_counts() {
        let grid = griddata(&[0.0, 0.0, 1.0], &[0.0, 1.0, 1.0], &[1.0; 3], 1.0).unwrap();
        let mut buf = Vec::new();
        write_counts(&mut buf, grid.counts()).unwrap();
        assert_eq!(to_string(buf), "1,0\n1,1\n");
    }

    #[test]
    fn test_write_membership() {
        let grid = griddata(&[0.0, 0.1, 1.0], &[0.0; 3], &[1.0; 3], 1.0).unwrap();
        let mut buf = Vec::new();
        write_membership(&mut buf, &grid).unwrap();
        assert_eq!(to_string(buf), "row,col,count,indices\n0,0,2,0;1\n0,1,1,2\n");
    }
}
