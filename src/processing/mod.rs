//! Range table assembly.
//!
//! - [`builder`] - turns the token sequence into an ordered table
//! - [`normalize`] - optional sort/merge pass and overlap reporting

mod builder;
mod normalize;

pub use builder::{split_tokens, RangeTableBuilder, ShortTokenPolicy, SHORT_TOKEN_MAX_LEN};
pub use normalize::{find_overlaps, log_overlaps, normalize_ranges};
