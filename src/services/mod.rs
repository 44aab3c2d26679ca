pub mod ledger;

pub use ledger::PopularityLedger;
