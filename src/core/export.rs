//! CSV export of the displayed view

use std::io::Write;

use miette::{IntoDiagnostic, Result};

use crate::entities::part::{Part, PartField};

/// Write a header row of display labels, then one row per part in the given order
pub fn write_csv<W: Write>(writer: W, parts: &[Part]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(PartField::ALL.iter().map(|f| f.label()))
        .into_diagnostic()?;
    for part in parts {
        wtr.write_record(part.to_row()).into_diagnostic()?;
    }

    wtr.flush().into_diagnostic()?;
    Ok(())
}
