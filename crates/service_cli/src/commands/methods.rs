//! Methods command implementation
//!
//! Lists problem kinds and the methods each offers.

use numkit_core::problem::ProblemKind;

use crate::Result;

/// Print every kind, or only `kind`, with its methods (default first).
pub fn run(kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(tag) => vec![tag.parse::<ProblemKind>()?],
        None => ProblemKind::ALL.to_vec(),
    };
    print!("{}", listing(&kinds));
    Ok(())
}

fn listing(kinds: &[ProblemKind]) -> String {
    kinds
        .iter()
        .map(|kind| format!("{:<14} {}\n", kind.as_str(), kind.methods().join(", ")))
        .collect()
}
