use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::aggregate::load_record;
use crate::classify::SignalClassifier;
use crate::cli::InspectArgs;
use crate::extract::extract_text;
use crate::model::{SignalLabel, SignalResult};

pub fn run(args: InspectArgs) -> Result<()> {
    let record = load_record(&args.file)?;
    let classifier = SignalClassifier::new()?;

    if args.show_text {
        info!(path = %args.file.display(), text = %extract_text(&record), "extracted text");
    }

    let result = classifier.classify_record(&record);
    if result.signals.is_empty() {
        warn!(path = %args.file.display(), "no signals matched");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &result)
            .context("failed to serialize signal result json output")?;
        writeln!(output)?;
    } else {
        write_text(&mut output, &result)?;
    }
    output.flush()?;

    Ok(())
}

fn write_text<W: Write>(output: &mut W, result: &SignalResult) -> Result<()> {
    let signals = &result.signals;
    let return_periods = signals
        .return_periods
        .iter()
        .map(u32::to_string)
        .collect::<Vec<String>>();

    writeln!(output, "Id: {}", result.id)?;
    writeln!(output, "Title: {}", result.title)?;
    writeln!(output, "Hazards: {}", join_labels(&signals.hazards))?;
    writeln!(output, "Exposure: {}", join_labels(&signals.exposure))?;
    writeln!(
        output,
        "Analysis types: {}",
        join_labels(&signals.analysis_types)
    )?;
    writeln!(output, "Return periods: {}", return_periods.join(", "))?;
    writeln!(output, "Detailed: {}", signals.is_detail_worthy())?;
    Ok(())
}

fn join_labels<L: SignalLabel>(labels: &[L]) -> String {
    labels
        .iter()
        .map(|label| label.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}
