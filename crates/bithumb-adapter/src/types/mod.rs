/*
[INPUT]:  Vendor schema definitions and serde requirements
[OUTPUT]: Canonical records, vendor wire shapes, symbol codec
[POS]:    Data layer - type definitions for the pipeline
[UPDATE]: When vendor schema changes or new record types are added
*/

pub mod enums;
pub mod models;
pub mod symbol;
pub mod vendor;

pub use enums::*;
pub use models::*;
pub use symbol::{CanonicalSymbol, MarketCode};
