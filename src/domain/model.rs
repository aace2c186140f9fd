use std::collections::{BTreeMap, BTreeSet};

/// One municipality row from the district listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRef {
    pub code: String,
    pub name: String,
    pub detail_url: String,
}

/// Aggregate turnout figures. An empty field means "not found", not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnoutStats {
    pub registered_voters: String,
    pub envelopes: String,
    pub valid_votes: String,
}

impl TurnoutStats {
    pub fn new(
        registered_voters: impl Into<String>,
        envelopes: impl Into<String>,
        valid_votes: impl Into<String>,
    ) -> Self {
        Self {
            registered_voters: registered_voters.into(),
            envelopes: envelopes.into(),
            valid_votes: valid_votes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.registered_voters.is_empty() && self.envelopes.is_empty() && self.valid_votes.is_empty()
    }
}

/// Party name -> vote count, as text.
pub type PartyTally = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityResult {
    pub municipality: MunicipalityRef,
    pub turnout: TurnoutStats,
    pub tally: PartyTally,
}

/// Every party name seen so far. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyUniverse {
    names: BTreeSet<String>,
}

impl PartyUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, tally: &PartyTally) {
        self.names.extend(tally.keys().cloned());
    }

    /// Names in ascending lexicographic order.
    pub fn sorted(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Output of the extract stage.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub results: Vec<MunicipalityResult>,
    pub parties: PartyUniverse,
}

impl Harvest {
    pub fn push(&mut self, result: MunicipalityResult) {
        self.parties.absorb(&result.tally);
        self.results.push(result);
    }
}

/// Fixed-width table after pivoting: every row has `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
