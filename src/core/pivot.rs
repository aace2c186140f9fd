use crate::domain::model::{Harvest, WideTable};
use crate::utils::error::{EtlError, Result};

pub const LEADING_COLUMNS: [&str; 5] = [
    "code",
    "name",
    "registered_voters",
    "envelopes",
    "valid_votes",
];

/// One row per municipality, one column per party in the universe (sorted).
/// Parties a municipality did not report get an empty cell.
pub fn to_wide_table(harvest: &Harvest) -> WideTable {
    let parties: Vec<&str> = harvest.parties.sorted().collect();

    let header = LEADING_COLUMNS
        .iter()
        .copied()
        .chain(parties.iter().copied())
        .map(str::to_string)
        .collect();

    let rows = harvest
        .results
        .iter()
        .map(|result| {
            let mut row = Vec::with_capacity(LEADING_COLUMNS.len() + parties.len());
            row.push(result.municipality.code.clone());
            row.push(result.municipality.name.clone());
            row.push(result.turnout.registered_voters.clone());
            row.push(result.turnout.envelopes.clone());
            row.push(result.turnout.valid_votes.clone());
            row.extend(
                parties
                    .iter()
                    .map(|party| result.tally.get(*party).cloned().unwrap_or_default()),
            );
            row
        })
        .collect();

    WideTable { header, rows }
}

/// Serializes the table as UTF-8 delimited text.
pub fn write_delimited(table: &WideTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::Csv(csv::Error::from(e.into_error())))
}
