// File: crates/pulse-core/src/visibility.rs
// Summary: Host-owned visibility map; hosts toggle ids here and re-supply datasets with `hidden` set.

use std::collections::HashSet;

use crate::series::{CategoryDatum, Series};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    hidden: HashSet<String>,
}

impl Visibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `ids` hidden.
    pub fn hiding<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { hidden: ids.into_iter().map(Into::into).collect() }
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    /// Flip one id; returns whether it is hidden afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.hidden.remove(id) {
            self.hidden.insert(id.to_string());
            return true;
        }
        false
    }

    pub fn hide(&mut self, id: &str) {
        self.hidden.insert(id.to_string());
    }

    pub fn show(&mut self, id: &str) {
        self.hidden.remove(id);
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn apply_to_series(&self, datasets: &mut [Series]) {
        for s in datasets {
            s.hidden = self.is_hidden(&s.id);
        }
    }

    pub fn apply_to_categories(&self, data: &mut [CategoryDatum]) {
        for d in data {
            d.hidden = self.is_hidden(&d.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn toggle_twice_restores() {
        let mut v = Visibility::new();
        assert!(v.toggle("a"));
        assert!(v.is_hidden("a"));
        assert!(!v.toggle("a"));
        assert!(!v.is_hidden("a"));
    }

    #[test]
    fn apply_sets_flags() {
        let c = Rgba::rgb(0, 0, 0);
        let mut data = vec![Series::new("a", "A", c), Series::new("b", "B", c).hidden(true)];
        Visibility::hiding(["a"]).apply_to_series(&mut data);
        assert!(data[0].hidden);
        assert!(!data[1].hidden);
    }
}
