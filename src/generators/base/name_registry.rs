use std::collections::HashMap;

/// Hands out collision-free names for one rendered artifact.
///
/// The first claim of a name returns it unchanged; the n-th claim (n >= 2)
/// returns `name_n`.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    occurrences: HashMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry where `names` are already taken, so the first claim of one
    /// of them is suffixed.
    pub fn reserving<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry
                .occurrences
                .entry(name.as_ref().to_string())
                .or_insert(1);
        }
        registry
    }

    pub fn claim(&mut self, name: &str) -> String {
        let count = self.occurrences.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name.to_string()
        } else {
            format!("{}_{}", name, count)
        }
    }

    pub fn occurrences(&self, name: &str) -> usize {
        self.occurrences.get(name).copied().unwrap_or(0)
    }
}
