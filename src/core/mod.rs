pub mod etl;
pub mod listing;
pub mod markup;
pub mod pivot;
pub mod tally;
pub mod turnout;

pub use crate::domain::model::{
    Harvest, MunicipalityRef, MunicipalityResult, PartyTally, PartyUniverse, TurnoutStats,
    WideTable,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
