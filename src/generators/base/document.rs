use crate::error::{Error, Result};
use crate::generators::base::naming::top_level_bindings;
use regex::Regex;
use std::sync::LazyLock;

/// `/* {{name}} */`, optionally alone on its line (leading indentation and
/// trailing line break captured)
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^[ \t]*)?(/\*\s*\{\{\s*(\w+)\s*\}\}\s*\*/)([ \t]*\r?\n)?").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    name: String,
    /// Indentation of a marker that sits alone on its line; `None` for inline markers
    line_indent: Option<String>,
    chunks: Vec<String>,
}

/// A template split into literal text and named insertion slots.
///
/// Content is appended to slots in any order and the whole document is
/// serialized once. Slots that receive nothing disappear from the output,
/// together with their line when the marker stood alone on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    segments: Vec<Segment>,
}

impl Document {
    pub fn parse(name: &str, template: &str) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in MARKER.captures_iter(template) {
            let (Some(whole), Some(marker), Some(slot_name)) = (caps.get(0), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let standalone = caps.get(1).is_some()
                && (caps.get(4).is_some() || whole.end() == template.len());

            let (text_end, resume_at, line_indent) = if standalone {
                let indent = caps.get(1).map(|m| m.as_str().to_string());
                (whole.start(), whole.end(), indent)
            } else {
                (marker.start(), marker.end(), None)
            };

            if text_end > cursor {
                segments.push(Segment::Text(template[cursor..text_end].to_string()));
            }
            segments.push(Segment::Slot(Slot {
                name: slot_name.as_str().to_string(),
                line_indent,
                chunks: Vec::new(),
            }));
            cursor = resume_at;
        }

        if cursor < template.len() {
            segments.push(Segment::Text(template[cursor..].to_string()));
        }

        Self {
            name: name.to_string(),
            segments,
        }
    }

    /// Module-scope identifiers the template text itself binds.
    pub fn declared_bindings(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(top_level_bindings(text)),
                Segment::Slot(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn slot_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Slot(slot) => Some(slot.name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slot_names().contains(&name)
    }

    /// Fail with [`Error::MissingMarker`] for the first marker the template lacks.
    pub fn require(&self, markers: &[&str]) -> Result<()> {
        match markers.iter().find(|marker| !self.has_slot(marker)) {
            Some(marker) => Err(Error::MissingMarker {
                template: self.name.clone(),
                marker: marker.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Append content to the first slot with this name. Returns false if there is none.
    pub fn append(&mut self, slot_name: &str, content: &str) -> bool {
        for segment in &mut self.segments {
            if let Segment::Slot(slot) = segment {
                if slot.name == slot_name {
                    slot.chunks.push(content.to_string());
                    return true;
                }
            }
        }
        false
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Slot {
                    line_indent: Some(indent),
                    chunks,
                    ..
                }) => {
                    for line in chunks.iter().flat_map(|chunk| chunk.lines()) {
                        if !line.is_empty() {
                            out.push_str(indent);
                            out.push_str(line);
                        }
                        out.push('\n');
                    }
                }
                Segment::Slot(Slot {
                    line_indent: None,
                    chunks,
                    ..
                }) => {
                    for chunk in chunks {
                        out.push_str(chunk);
                    }
                }
            }
        }
        out
    }
}
