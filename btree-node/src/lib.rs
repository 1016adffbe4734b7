pub mod compare;
pub mod constants;
pub mod entry;
pub mod node;
pub mod trailer;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use compare::{CompareOutcome, compare};
pub use entry::{
    Bound, EntryError,
    key::{entry_payload, fetch_key},
    seek::resolve_trailer,
};
pub use node::{CorruptionCode, Node};
