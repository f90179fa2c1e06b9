//! Assembly text output for one unit.

/// Accumulates the assembly text of one unit with the assembler's expected
/// layout: directives flush-left, label lines indented one tab, instructions
/// two tabs.
#[derive(Debug, Default)]
pub struct UnitWriter {
    out: String,
}

impl UnitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block of commands; each non-empty line is classified and
    /// indented on its own.
    pub fn push(&mut self, commands: &str) {
        for line in commands.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('.') {
                // Directive
            } else if line.ends_with(':') {
                self.out.push('\t');
            } else {
                self.out.push('\t');
                self.out.push('\t');
            }
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    /// Append a blank separator line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Consume the writer, returning the unit text.
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_classification() {
        let mut writer = UnitWriter::new();
        writer.push(".method public f()V");
        writer.push("iconst_0\nL3:");
        writer.push("pop");
        writer.push(".end method");
        assert_eq!(
            writer.finish(),
            ".method public f()V\n\t\ticonst_0\n\tL3:\n\t\tpop\n.end method\n"
        );
    }

    #[test]
    fn test_push_skips_blank_lines() {
        let mut writer = UnitWriter::new();
        writer.push("iconst_0\n\n\npop\n");
        assert_eq!(writer.finish(), "\t\ticonst_0\n\t\tpop\n");
    }
}
