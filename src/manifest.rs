//! Module-definition manifest model and rendering.

use std::fmt;

/// One `; comment` header followed by its tab-indented symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub comment: String,
    pub symbols: Vec<String>,
}

impl Section {
    pub fn new(comment: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            comment: comment.into(),
            symbols,
        }
    }
}

/// A complete `.def` file, built section by section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    generator: String,
    library: String,
    sections: Vec<Section>,
}

impl Manifest {
    pub fn new(library: impl Into<String>, generator: impl Into<String>) -> Self {
        Self {
            generator: generator.into(),
            library: library.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section; sections render in insertion order
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Total exported symbols across all sections
    pub fn symbol_count(&self) -> usize {
        self.sections.iter().map(|s| s.symbols.len()).sum()
    }

    /// Render with `\n` line endings
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; This file is auto-generated by {}", self.generator)?;
        writeln!(f)?;
        writeln!(f, "LIBRARY {}", self.library)?;
        writeln!(f, "EXPORTS")?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "; {}", section.comment)?;
            writeln!(f)?;
            for symbol in &section.symbols {
                writeln!(f, "\t{}", symbol)?;
            }
        }

        Ok(())
    }
}
