//! Output formatting for packages command results.

use super::execute::PackagesResult;
use crate::output::{Outputable, join_or_dash};

impl Outputable for PackagesResult {
    fn to_table(&self) -> String {
        [
            format!("Packages for {} on {}:", self.backend, self.dialect),
            format!("  dependencies:     {}", join_or_dash(&self.dependencies)),
            format!("  dev dependencies: {}", join_or_dash(&self.dev_dependencies)),
        ]
        .join("\n")
    }
}
