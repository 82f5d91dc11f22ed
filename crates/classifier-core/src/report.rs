//! Human-readable rendering of a [`RunReport`].

use std::fmt;

use crate::config::StatsMode;
use crate::processor::RunReport;
use crate::token::TokenKind;

const BANNER: &str = "==========================================";
const RULE: &str = "__________________________________________";

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}:")?;
    writeln!(f, "{RULE}")
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{BANNER}")?;
        writeln!(f)?;

        if self.stats.mode() != StatsMode::None {
            section(f, "STATISTICS")?;
            for kind in TokenKind::ALL {
                writeln!(f, "    {}", self.stats.get(kind).report())?;
            }
            writeln!(f)?;
        }

        section(f, "CREATED FILES")?;
        if self.created.is_empty() {
            writeln!(f, "    no files were created (no data to write)")?;
        }
        for path in &self.created {
            let name = path.file_name().unwrap_or(path.as_os_str());
            writeln!(f, "    {}", name.to_string_lossy())?;
        }
        writeln!(f)?;

        section(f, "INPUT FILES")?;
        writeln!(f, "    Processed: {}", self.processed)?;
        writeln!(f, "    Failed: {}", self.failed)?;
        writeln!(f, "    Total: {}", self.total)?;
        writeln!(f)?;

        if !self.problems.is_empty() {
            section(f, "ERRORS")?;
            for (i, problem) in self.problems.iter().enumerate() {
                writeln!(f, " {}. {problem}", i + 1)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{BANNER}")?;
        writeln!(f, "{}", self.status())?;
        write!(f, "{BANNER}")
    }
}
