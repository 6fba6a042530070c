//! Pure shape operations.
//!
//! Every operation takes its operands by reference, never mutates them, and
//! works layer by layer with matching layer indices. Use the cached variants
//! on [`crate::operation_cache::OperationCache`] from gameplay code so equal
//! requests share one result.

mod combine;
mod compress;
mod cut;
mod stack;
#[cfg(test)]
mod tests;

pub use combine::{combine, links_compatible};
pub use compress::{compress, paint_layers};
pub use cut::{cut_by_quadrants, cut_pair, QuadrantSet};
pub use stack::stack;
