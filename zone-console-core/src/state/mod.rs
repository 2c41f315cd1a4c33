//! View state machines
//!
//! Plain synchronous state; the controller performs lookups and store calls
//! and drives these transitions with the results.

mod action;
mod row_edit;
mod sort;

pub use action::{ActionState, DomainAction};
pub use row_edit::{EditSession, RowEditor, RowState};
pub use sort::{SortKey, TableSort};
