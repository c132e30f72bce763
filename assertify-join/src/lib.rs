#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/assertify/main/assets/assertify.svg",
    issue_tracker_base_url = "https://github.com/storyscript/assertify/issues/"
)]

//! Grouping and SQL-like joins for preparing test data.
//!
//! - [`group_by`] - Groups a slice by a derived key
//! - [`inner_join`] / [`left_join`] - Join two slices on derived keys
//! - [`read_lines`] - Reads a file into lines, logging progress
//! - [`DelimitedJoin`] - Joins two delimited files on one [`Column`] each
//!
//! ## Example
//!
//! ```
//! use assertify_join::{inner_join, left_join};
//!
//! let people = [(1, "Ann"), (2, "Bo")];
//! let cities = [("Oslo", 1)];
//!
//! let joined = inner_join(&people, &cities, |p| p.0, |c| c.1);
//! assert_eq!(joined.len(), 1);
//! assert_eq!(joined[0].right.0, "Oslo");
//!
//! let joined = left_join(&people, &cities, |p| p.0, |c| c.1);
//! assert!(joined[1].right.is_none());
//! ```

mod delimited;
mod errors;
mod join;
mod lines;

pub use delimited::{Column, DelimitedJoin, JoinedLine};
pub use errors::JoinError;
pub use join::{group_by, inner_join, left_join, Joined, LeftJoined};
pub use lines::{read_lines, PROGRESS_INTERVAL};
