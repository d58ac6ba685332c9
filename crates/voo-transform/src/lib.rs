//! Table stages of the VOO pipeline.
//!
//! Each stage takes a frame (or a list of frames) and returns a new one; nothing
//! here deletes rows except the two deduplication stages.
//!
//! 1. [`keep_most_complete`]: one row per key, the row with most filled cells wins
//! 2. [`namespace_tables`]: `F<i>__` prefixes plus the rename table
//! 3. [`stack_tables`]: union-of-columns vertical concatenation
//! 4. [`canonicalize`]: unprefixed target columns coalesced in file order
//! 5. [`merge_duplicates`]: one row per identifier across files, gaps filled,
//!    then [`rebuild_canonical`] re-coalesces the targets in file order
//! 6. [`coerce_numeric`]: numeric targets to `Float64`, bad values to null

mod canonical;
mod dedupe;
mod error;
mod namespace;
mod numeric;
mod stack;

pub use canonical::{canonicalize, rebuild_canonical};
pub use dedupe::{DedupeOutcome, keep_most_complete, merge_duplicates};
pub use error::{Result, TransformError};
pub use namespace::{FileColumns, NamespaceMap, file_tag, namespace_tables, prefixed_name};
pub use numeric::{CoercionSummary, coerce_numeric};
pub use stack::stack_tables;
