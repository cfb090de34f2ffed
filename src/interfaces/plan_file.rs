//! JSON plan documents.

use crate::domain::plan::PlanConfig;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanConfig> {
    let file = File::open(path)?;
    read_plan(BufReader::new(file))
}

/// Parses a plan document. The plan is not validated here.
pub fn read_plan<R: Read>(source: R) -> Result<PlanConfig> {
    Ok(serde_json::from_reader(source)?)
}

pub fn write_plan<W: Write>(plan: &PlanConfig, mut sink: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, plan)?;
    writeln!(sink)?;
    Ok(())
}
