use crate::domain::actuals::{Actuals, LeadGenActuals, SalesActuals};
use crate::domain::plan::PlanKind;
use crate::error::{CompError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of an actuals file.
///
/// Every metric column is optional so that a single file layout serves all
/// plans; [`ActualsRecord::actuals_for`] checks the ones the plan needs.
/// Money columns are parsed from their text form, never through a float.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ActualsRecord {
    pub rep: String,
    #[serde(default)]
    pub total_sals: Option<i64>,
    #[serde(default)]
    pub total_sqls: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_revenue_assisted: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_sales: Option<Decimal>,
}

impl ActualsRecord {
    /// Builds the actuals consumed by plans of `kind`.
    pub fn actuals_for(&self, kind: PlanKind) -> Result<Actuals> {
        match kind {
            PlanKind::LeadGen => Ok(Actuals::LeadGen(LeadGenActuals {
                total_sals: self.required(self.total_sals, "total_sals")?,
                total_sqls: self.required(self.total_sqls, "total_sqls")?,
                total_revenue_assisted: self.total_revenue_assisted.unwrap_or(Decimal::ZERO),
            })),
            PlanKind::AcceleratedCommission | PlanKind::TieredCommission => {
                Ok(Actuals::Sales(SalesActuals {
                    total_sales: self.required(self.total_sales, "total_sales")?,
                }))
            }
        }
    }

    fn required<T>(&self, value: Option<T>, column: &str) -> Result<T> {
        value.ok_or_else(|| {
            CompError::InvalidRecord(format!("rep `{}` is missing `{}`", self.rep, column))
        })
    }
}

/// Reads per-rep actuals from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// and yields one `Result<ActualsRecord>` per row.
pub struct ActualsReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActualsReader<R> {
    /// Creates a new `ActualsReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records(self) -> impl Iterator<Item = Result<ActualsRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CompError::from))
    }
}
