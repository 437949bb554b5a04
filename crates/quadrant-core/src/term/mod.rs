//! The term table: one node per distinct term, each holding the posting sets
//! of the quads that mention it.

mod table;

pub use table::{TermNode, TermTable};
