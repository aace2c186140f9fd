use crate::core::markup::{clean_number, is_numeric, Document, Tag};
use crate::domain::model::PartyTally;

/// Party name -> votes from every result table on a detail page.
///
/// Rows after each table's header with at least three cells are read as
/// `[number, party, votes, ...]`. A party seen again later on the page
/// overwrites the earlier value.
pub fn extract_party_tally(doc: &Document) -> PartyTally {
    let mut tally = PartyTally::new();

    for table in doc.find_all(Tag::Table) {
        for row in table.find_all(Tag::Row).into_iter().skip(1) {
            let cells = row.find_all(Tag::Cell);
            if cells.len() < 3 {
                continue;
            }

            let party = cells[1].text();
            let votes = clean_number(&cells[2].text());
            if !party.is_empty() && is_numeric(&votes) {
                tally.insert(party, votes);
            }
        }
    }

    tally
}
