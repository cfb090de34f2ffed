use crate::domain::breakdown::Breakdown;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// A rep's computed payout, as rendered in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct RepPayout {
    pub rep: String,
    pub breakdown: Breakdown,
}

pub fn write_json<W: Write>(payouts: &[RepPayout], mut sink: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, payouts)?;
    writeln!(sink)?;
    Ok(())
}
