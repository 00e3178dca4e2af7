//! Check registry.
//!
//! An explicit, name-keyed collection of checks, constructed once at process
//! start and threaded through the runner by reference. Registration order is
//! execution order; re-registering a name replaces the check in place.

use crate::checks::Check;

/// Registry of workspace checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        CheckRegistry { checks: Vec::new() }
    }

    /// Create a registry holding the built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(crate::checks::cycles::CircularDependencies));
        registry.register(Box::new(crate::checks::exports::ExportCompleteness));
        registry.register(Box::new(crate::checks::naming::NamingConvention));
        registry.register(Box::new(crate::checks::docs::DocCompleteness));
        registry.register(Box::new(crate::checks::license::LicenseHeaders));
        registry.register(Box::new(crate::checks::consistency::ManifestConsistency));
        registry
    }

    /// Register a check; an existing check with the same name is replaced
    /// at its position.
    pub fn register(&mut self, check: Box<dyn Check>) {
        match self.checks.iter().position(|c| c.name() == check.name()) {
            Some(i) => self.checks[i] = check,
            None => self.checks.push(check),
        }
    }

    /// Get a check by name.
    pub fn get(&self, name: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// All checks in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckContext, CheckReport};
    use anyhow::Result;

    struct Dummy(&'static str);

    impl Check for Dummy {
        fn name(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "dummy"
        }
        fn run(&self, _ctx: &CheckContext<'_>) -> Result<CheckReport> {
            Ok(CheckReport::new(self.0))
        }
    }

    #[test]
    fn test_builtins_registered_in_order() {
        let registry = CheckRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["cycles", "exports", "naming", "docs", "license", "consistency"]
        );
    }

    #[test]
    fn test_register_overwrites_by_name() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(Dummy("a")));
        registry.register(Box::new(Dummy("b")));
        registry.register(Box::new(Dummy("a")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = CheckRegistry::with_builtins();
        assert!(registry.get("cycles").is_some());
        assert!(registry.get("nonexistent").is_none());
    }
}
