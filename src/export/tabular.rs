//! Delimited table export
//!
//! One row per well: `well`, `cell.line`, then a drug/conc/units column
//! triple per slot, sized by the busiest well on the plate. Doses stay raw
//! molar numbers with a constant "M" units column, the shape downstream
//! dose-response tooling ingests.

use std::io::Write;

use anyhow::{Context, Result};

use crate::common::models::NameMappings;
use crate::plates::PlateMap;

/// Column separator for the exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// Write the delimited table for a plate
pub fn write_delimited<W: Write>(
    plate: &PlateMap,
    names: &NameMappings,
    delimiter: Delimiter,
    writer: W,
) -> Result<()> {
    let slots = plate.max_drugs_doses_used();
    let mut table = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer);

    let mut header = vec!["well".to_string(), "cell.line".to_string()];
    for slot in 1..=slots {
        header.push(format!("drug{slot}"));
        header.push(format!("drug{slot}.conc"));
        header.push(format!("drug{slot}.units"));
    }
    table
        .write_record(&header)
        .context("Failed to write export header")?;

    for (well_num, well) in plate.wells().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(plate.well_name(well_num, true));
        record.push(match well.cell_line {
            Some(id) => names.cell_line_name(id),
            None => String::new(),
        });
        for slot in 0..slots {
            let drug = well.drugs.get(slot).copied().flatten();
            let dose = well.doses.get(slot).copied().flatten();
            record.push(match drug {
                Some(id) => names.drug_name(id),
                None => String::new(),
            });
            record.push(match dose {
                Some(conc) => conc.to_string(),
                None => String::new(),
            });
            record.push(if dose.is_some() { "M" } else { "" }.to_string());
        }
        table
            .write_record(&record)
            .context("Failed to write export row")?;
    }
    table.flush().context("Failed to flush export table")?;
    Ok(())
}

/// Render the delimited table as a string
pub fn to_delimited_string(
    plate: &PlateMap,
    names: &NameMappings,
    delimiter: Delimiter,
) -> Result<String> {
    let mut buffer = Vec::new();
    write_delimited(plate, names, delimiter, &mut buffer)?;
    String::from_utf8(buffer).context("Export table was not valid UTF-8")
}
