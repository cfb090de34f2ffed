#![allow(dead_code)]

use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const ACTUALS_HEADER: &str = "rep, total_sals, total_sqls, total_revenue_assisted, total_sales";

/// Writes `contents` to a fresh temporary file.
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Writes an actuals file with the standard header followed by `rows`.
pub fn actuals_file(rows: &[&str]) -> NamedTempFile {
    let mut contents = String::from(ACTUALS_HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    temp_file(&contents)
}

/// Generates `rows` sales reps with increasing closed sales.
pub fn generate_sales_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["rep", "total_sals", "total_sqls", "total_revenue_assisted", "total_sales"])?;

    for i in 1..=rows {
        let rep = format!("rep-{i}");
        let sales = (i * 25).to_string();
        wtr.write_record([rep.as_str(), "", "", "", sales.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
