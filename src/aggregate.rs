// This module collects rendered records into the final TableGen artifact. The Aggregator
// is built with an immutable preamble and the converter options, then fed one loaded
// document at a time in the caller's order. Documents that failed to load or render are
// turned into diagnostics and skipped; they never stop the batch. Once every document has
// been pushed the artifact is assembled: the preamble followed by each rendered block,
// with a "// From <file>" origin marker before each block in batch (directory) mode. An
// aggregator that rendered nothing produces no artifact at all.

//! Artifact aggregation.

use std::fmt;

use crate::config::ConverterOptions;
use crate::core::error::{ConvertError, ConvertResult};
use crate::core::record::Record;
use crate::core::stats::ConversionStats;
use crate::tablegen::{Preamble, RenderedBlock, Renderer};

/// A skipped document and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub origin: String,
    pub message: String,
}

impl Diagnostic {
    fn new(origin: &str, error: &ConvertError) -> Self {
        Self {
            origin: origin.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping {}: {}", self.origin, self.message)
    }
}

/// A rendered block and the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub origin: String,
    pub block: RenderedBlock,
}

/// Collects rendered blocks in input order.
#[derive(Debug)]
pub struct Aggregator {
    preamble: Preamble,
    renderer: Renderer,
    items: Vec<RenderedItem>,
    diagnostics: Vec<Diagnostic>,
    stats: ConversionStats,
}

impl Aggregator {
    pub fn new(preamble: Preamble, options: ConverterOptions) -> Self {
        Self {
            preamble,
            renderer: Renderer::new(options),
            items: Vec::new(),
            diagnostics: Vec::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Render a loaded document, or record why it has to be skipped.
    ///
    /// Returns whether a block was rendered.
    pub fn push(&mut self, origin: &str, document: ConvertResult<Record>) -> bool {
        match document.and_then(|record| self.renderer.render(&record)) {
            Ok(block) => {
                log::debug!("{origin}: rendered {} {}", block.kind, block.identifier);
                self.stats.record_rendered(&block);
                self.items.push(RenderedItem {
                    origin: origin.to_string(),
                    block,
                });
                true
            }
            Err(error) => {
                let diagnostic = Diagnostic::new(origin, &error);
                log::warn!("{diagnostic}");
                self.stats.record_skipped();
                self.diagnostics.push(diagnostic);
                false
            }
        }
    }

    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    pub fn rendered_count(&self) -> usize {
        self.items.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Preamble followed by every block, without origin markers.
    pub fn single_artifact(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let mut out = String::from(self.preamble.text());
        for item in &self.items {
            out.push_str(&item.block.text);
        }
        Some(out)
    }

    /// Preamble followed by every block, each preceded by its origin marker
    /// and followed by a newline.
    pub fn batch_artifact(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let mut out = String::from(self.preamble.text());
        for item in &self.items {
            out.push_str(&format!("// From {}\n", item.origin));
            out.push_str(&item.block.text);
            out.push('\n');
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;

    fn aggregator() -> Aggregator {
        Aggregator::new(Preamble::RISCV, ConverterOptions::default())
    }

    #[test]
    fn test_empty_aggregator_has_no_artifact() {
        let agg = aggregator();
        assert_eq!(agg.single_artifact(), None);
        assert_eq!(agg.batch_artifact(), None);
    }

    #[test]
    fn test_skips_and_continues() {
        let mut agg = aggregator();
        assert!(agg.push("add.yaml", parse_document("kind: instruction\nname: add\nassembly: xd, xs1, xs2\n")));
        assert!(!agg.push("odd.yaml", parse_document("kind: unknown_kind\nname: odd\n")));
        assert!(!agg.push("list.yaml", parse_document("- 1\n- 2\n")));
        assert!(agg.push("mstatus.yaml", parse_document("kind: csr\nname: mstatus\naddress: \"0x300\"\n")));

        assert_eq!(agg.rendered_count(), 2);
        assert_eq!(
            agg.diagnostics()[0].to_string(),
            "Skipping odd.yaml: unknown kind 'unknown_kind'"
        );
        assert_eq!(agg.diagnostics().len(), 2);
        assert_eq!(agg.stats().skipped, 2);
        assert_eq!(agg.stats().documents_seen, 4);
    }

    #[test]
    fn test_single_artifact_layout() {
        let mut agg = aggregator();
        agg.push("m.yaml", parse_document("kind: csr\nname: mstatus\naddress: \"0x300\"\n"));
        let artifact = agg.single_artifact().unwrap();
        let expected = format!("{}{}", Preamble::RISCV.text(), agg.items()[0].block.text);
        assert_eq!(artifact, expected);
        assert!(!artifact.contains("// From"));
    }

    #[test]
    fn test_batch_artifact_layout() {
        let mut agg = aggregator();
        agg.push("a.yaml", parse_document("kind: extension\nname: Zicsr\n"));
        agg.push("b.yaml", parse_document("kind: csr\nname: mstatus\n"));
        let artifact = agg.batch_artifact().unwrap();
        let body = artifact.strip_prefix(Preamble::RISCV.text()).unwrap();
        let expected = format!(
            "// From a.yaml\n{}\n// From b.yaml\n{}\n",
            agg.items()[0].block.text,
            agg.items()[1].block.text
        );
        assert_eq!(body, expected);
    }
}
