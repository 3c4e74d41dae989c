//! Conversion statistics.

use std::collections::BTreeMap;
use std::fmt;

use super::record::RecordKind;
use crate::tablegen::{FormatFamily, RenderedBlock};

/// Counters collected over one conversion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    /// Documents handed to the aggregator, rendered or not.
    pub documents_seen: usize,

    /// Instruction records rendered.
    pub instructions_rendered: usize,

    /// CSR records rendered.
    pub csrs_rendered: usize,

    /// Extension records rendered.
    pub extensions_rendered: usize,

    /// Rendered instructions per format family.
    pub family_counts: BTreeMap<FormatFamily, usize>,

    /// Documents skipped with a diagnostic.
    pub skipped: usize,

    /// Instructions classified from an ambiguous inheritance reference.
    pub ambiguous_formats: usize,
}

impl ConversionStats {
    /// Record a rendered block.
    pub fn record_rendered(&mut self, block: &RenderedBlock) {
        self.documents_seen += 1;
        match block.kind {
            RecordKind::Instruction => self.instructions_rendered += 1,
            RecordKind::Csr => self.csrs_rendered += 1,
            RecordKind::Extension => self.extensions_rendered += 1,
        }
        if let Some(family) = block.family {
            *self.family_counts.entry(family).or_insert(0) += 1;
        }
        if block.ambiguous {
            self.ambiguous_formats += 1;
        }
    }

    /// Record a skipped document.
    pub fn record_skipped(&mut self) {
        self.documents_seen += 1;
        self.skipped += 1;
    }

    pub fn rendered(&self) -> usize {
        self.instructions_rendered + self.csrs_rendered + self.extensions_rendered
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Statistics:")?;
        writeln!(f, "  Documents seen: {}", self.documents_seen)?;
        writeln!(f, "  Instructions rendered: {}", self.instructions_rendered)?;
        writeln!(f, "  CSRs rendered: {}", self.csrs_rendered)?;
        writeln!(f, "  Extensions rendered: {}", self.extensions_rendered)?;
        writeln!(f, "  Rendered: {}", self.rendered())?;
        writeln!(f, "  Skipped: {}", self.skipped)?;

        if self.ambiguous_formats > 0 {
            writeln!(f, "  Ambiguous formats: {}", self.ambiguous_formats)?;
        }

        if !self.family_counts.is_empty() {
            writeln!(f, "  Format breakdown:")?;
            for (family, count) in &self.family_counts {
                writeln!(f, "    {family}: {count}")?;
            }
        }

        Ok(())
    }
}
