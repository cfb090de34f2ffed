use clap::{Parser, Subcommand, ValueEnum};
use compcalc::application::engine::CompensationEngine;
use compcalc::domain::plan::{PlanConfig, PlanKind};
use compcalc::interfaces::csv::actuals_reader::ActualsReader;
use compcalc::interfaces::csv::payout_writer::PayoutWriter;
use compcalc::interfaces::plan_file;
use compcalc::interfaces::report::{self, RepPayout};
use compcalc::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Sales compensation payout calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log filter used when COMPCALC_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the payout of every rep in an actuals CSV file
    Run {
        /// Plan configuration (JSON)
        plan: PathBuf,

        /// Actuals CSV file with one row per rep
        actuals: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Print a default plan configuration as JSON
    Template {
        #[arg(value_enum)]
        kind: TemplateKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateKind {
    LeadGen,
    AcceleratedCommission,
    TieredCommission,
}

impl From<TemplateKind> for PlanKind {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::LeadGen => PlanKind::LeadGen,
            TemplateKind::AcceleratedCommission => PlanKind::AcceleratedCommission,
            TemplateKind::TieredCommission => PlanKind::TieredCommission,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level).into_diagnostic()?;

    match cli.command {
        Command::Run {
            plan,
            actuals,
            format,
        } => run(&plan, &actuals, format),
        Command::Template { kind } => {
            let plan = PlanConfig::template(kind.into());
            plan_file::write_plan(&plan, io::stdout().lock())?;
            Ok(())
        }
    }
}

fn run(plan_path: &Path, actuals_path: &Path, format: OutputFormat) -> Result<()> {
    let engine = CompensationEngine::new(plan_file::load_plan(plan_path)?)?;
    let kind = engine.plan().kind();
    info!(plan = %kind, path = %plan_path.display(), "loaded plan");

    let file = File::open(actuals_path).into_diagnostic()?;
    let reader = ActualsReader::new(file);

    let mut payouts = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Error reading actuals: {}", e);
                continue;
            }
        };
        match record
            .actuals_for(kind)
            .and_then(|actuals| engine.compute(&actuals))
        {
            Ok(breakdown) => payouts.push(RepPayout {
                rep: record.rep,
                breakdown,
            }),
            Err(e) => warn!("Error computing payout for rep {}: {}", record.rep, e),
        }
    }

    let stdout = io::stdout();
    match format {
        OutputFormat::Csv => {
            let mut writer = PayoutWriter::new(stdout.lock())?;
            for payout in &payouts {
                writer.write_payout(&payout.rep, &payout.breakdown)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => report::write_json(&payouts, stdout.lock())?,
    }

    Ok(())
}
