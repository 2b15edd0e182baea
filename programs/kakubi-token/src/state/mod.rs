pub mod claim_bitmap;
pub mod events;
pub mod fee;
pub mod ledger;
pub mod token;
