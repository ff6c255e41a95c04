use super::RiskFactor;
use indexmap::IndexMap;

/// Named risk factors in insertion order.
///
/// Re-adding a name replaces the stored factor but keeps its original
/// position, so iteration order only ever grows at the tail.
#[derive(Clone, Debug, Default)]
pub struct RiskRegistry {
    factors: IndexMap<String, RiskFactor>,
}

impl RiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the factor stored under its name.
    pub fn insert(&mut self, factor: RiskFactor) {
        let name = factor.name().to_string();
        if self.factors.insert(name.clone(), factor).is_some() {
            log::debug!("Replaced existing risk factor '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RiskFactor> {
        self.factors.get(name)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors.values()
    }

    /// Owned copy of the current factors, detached from later mutation.
    pub fn snapshot(&self) -> Vec<RiskFactor> {
        self.factors.values().cloned().collect()
    }
}

impl Extend<RiskFactor> for RiskRegistry {
    fn extend<T: IntoIterator<Item = RiskFactor>>(&mut self, iter: T) {
        for factor in iter {
            self.insert(factor);
        }
    }
}

impl FromIterator<RiskFactor> for RiskRegistry {
    fn from_iter<T: IntoIterator<Item = RiskFactor>>(iter: T) -> Self {
        let mut registry = RiskRegistry::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskCategory;

    fn factor(name: &str, probability: f64) -> RiskFactor {
        RiskFactor::new(name, RiskCategory::Quality, "", probability, 0.5).unwrap()
    }

    #[test]
    fn test_insert_preserves_insertion_order() {
        let registry: RiskRegistry = vec![factor("c", 0.1), factor("a", 0.2), factor("b", 0.3)]
            .into_iter()
            .collect();

        let names: Vec<&str> = registry.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut registry = RiskRegistry::new();
        registry.insert(factor("a", 0.1));
        registry.insert(factor("b", 0.2));
        registry.insert(factor("a", 0.9));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").unwrap().probability(), 0.9);
        let names: Vec<&str> = registry.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = RiskRegistry::new();
        registry.insert(factor("a", 0.1));
        let snapshot = registry.snapshot();

        registry.insert(factor("a", 0.8));
        registry.insert(factor("z", 0.3));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].probability(), 0.1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = RiskRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
        assert!(registry.get("missing").is_none());
    }
}
