use crate::core::markup::{Document, Node, Tag};
use crate::domain::model::MunicipalityRef;

/// Cells searched for the detail link, in order.
const LINK_CELLS: [usize; 2] = [0, 2];

/// Collects every municipality row of a district listing page, in document order.
///
/// A row qualifies when it has more than one cell, its first cell starts with a
/// digit, and cell 0 or cell 2 holds a link. Header rows, totals and
/// navigation rows fail one of those tests and are skipped silently.
pub fn parse_municipality_list(markup: &str, base_url: &str) -> Vec<MunicipalityRef> {
    let doc = Document::parse(markup);
    let mut municipalities = Vec::new();

    for table in doc.find_all(Tag::Table) {
        for row in table.find_all(Tag::Row).into_iter().skip(1) {
            if let Some(municipality) = parse_row(&row, base_url) {
                municipalities.push(municipality);
            }
        }
    }

    tracing::debug!("Listing page yielded {} municipalities", municipalities.len());
    municipalities
}

fn parse_row(row: &Node<'_>, base_url: &str) -> Option<MunicipalityRef> {
    let cells = row.find_all(Tag::Cell);
    if cells.len() <= 1 {
        return None;
    }

    let code = cells[0].text();
    if !code.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let name = cells.get(1).map(Node::text).unwrap_or_default();

    let href = LINK_CELLS
        .iter()
        .filter_map(|&i| cells.get(i))
        .find_map(|cell| cell.find_first(Tag::Link))?
        .attr("href")
        .filter(|href| !href.is_empty())?;

    Some(MunicipalityRef {
        code,
        name,
        detail_url: format!("{}{}", base_url, href),
    })
}
