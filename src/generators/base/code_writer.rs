/// Accumulates generated source, indenting each block to a nesting depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    indent: String,
    buffer: String,
}

impl CodeWriter {
    pub fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
            buffer: String::new(),
        }
    }

    /// Write `text` at `depth`. Every non-empty line is indented; the
    /// relative indentation inside `text` is kept.
    pub fn write(&mut self, depth: usize, text: &str) {
        let prefix = self.indent.repeat(depth);
        for line in text.lines() {
            if !line.trim().is_empty() {
                self.buffer.push_str(&prefix);
                self.buffer.push_str(line);
            }
            self.buffer.push('\n');
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
