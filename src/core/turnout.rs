//! Turnout figures (registered voters, issued envelopes, valid votes) from a
//! municipality detail page.
//!
//! Report pages differ in table layout between district types, so the
//! lookup cascades:
//!
//! 1. the summary table by its template `id`, else
//! 2. the first table mentioning voters,
//!    and read the first row of three numbers from whichever was located;
//! 3. only when neither table was located, the first table anywhere whose
//!    first three cells are numbers;
//! 4. while the figures are still missing, the first three `td.cislo` cells.

use crate::core::markup::{clean_number, is_numeric, Document, Node, Tag};
use crate::domain::model::TurnoutStats;

/// `id` of the summary table in the ps311 report template.
pub const SUMMARY_TABLE_ID: &str = "ps311_t1";
/// Text found in the voters summary table header ("Voliči v seznamu").
pub const VOTERS_MARKER: &str = "Voliči";
/// Class the report puts on numeric cells.
pub const NUMBER_CELL_CLASS: &str = "cislo";

pub type TableLocator = fn(&Document) -> Option<Node<'_>>;

/// Summary table locators in priority order. The first hit is final.
pub const SUMMARY_LOCATORS: [(&str, TableLocator); 2] = [
    ("summary table id", locate_by_id),
    ("voters marker table", locate_by_marker),
];

/// Never fails: when nothing matches, every field is empty.
pub fn extract_turnout(doc: &Document) -> TurnoutStats {
    let located = SUMMARY_LOCATORS
        .iter()
        .find_map(|(name, locate)| locate(doc).map(|table| (*name, table)));

    let found = match located {
        Some((name, table)) => {
            tracing::debug!("Turnout table located by {}", name);
            first_numeric_row(&table)
        }
        None => by_first_numeric_table(doc),
    };

    found
        .or_else(|| by_number_cells(doc))
        .unwrap_or_default()
}

pub fn locate_by_id(doc: &Document) -> Option<Node<'_>> {
    doc.find_first_by_attr(Tag::Table, "id", SUMMARY_TABLE_ID)
}

pub fn locate_by_marker(doc: &Document) -> Option<Node<'_>> {
    doc.find_all(Tag::Table)
        .into_iter()
        .find(|table| table.text().contains(VOTERS_MARKER))
}

/// First table whose first three cells are numbers.
pub fn by_first_numeric_table(doc: &Document) -> Option<TurnoutStats> {
    doc.find_all(Tag::Table)
        .into_iter()
        .find_map(|table| leading_triple(&table.find_all(Tag::Cell)))
}

/// First three `td.cislo` cells of the whole page.
pub fn by_number_cells(doc: &Document) -> Option<TurnoutStats> {
    leading_triple(&doc.find_all_by_class(Tag::Cell, NUMBER_CELL_CLASS))
}

pub fn first_numeric_row(table: &Node<'_>) -> Option<TurnoutStats> {
    table
        .find_all(Tag::Row)
        .into_iter()
        .find_map(|row| leading_triple(&row.find_all(Tag::Cell)))
}

/// The first three cells as turnout, if all three are numeric.
fn leading_triple(cells: &[Node<'_>]) -> Option<TurnoutStats> {
    let [a, b, c] = cells.get(..3)? else {
        return None;
    };
    let values = [a, b, c].map(|cell| clean_number(&cell.text()));
    if !values.iter().all(|v| is_numeric(v)) {
        return None;
    }

    let [registered_voters, envelopes, valid_votes] = values;
    Some(TurnoutStats {
        registered_voters,
        envelopes,
        valid_votes,
    })
}
