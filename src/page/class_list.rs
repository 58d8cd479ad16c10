//! Class attribute model for presentation-tree nodes.

/// Ordered set of class names attached to a node.
///
/// Insertion order is preserved so rendered markup stays stable; duplicate
/// names are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a class list from a sequence of names, skipping duplicates.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = Self::new();
        for name in names {
            list.add(name);
        }
        list
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Flip a class on or off, returning whether it is now present.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.add(name);
            true
        }
    }

    /// Force a class on or off.
    pub fn set(&mut self, name: &str, on: bool) {
        if on {
            self.add(name);
        } else {
            self.remove(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
