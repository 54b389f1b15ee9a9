//! Built-in route modules.
//!
//! Each module implements [`RouteFactory`](crate::routing::RouteFactory) and
//! is registered here under the name a routes-directory entry must carry to
//! activate it. Registration alone mounts nothing; the directory entry is
//! the switch.

pub mod health;
pub mod status;

use crate::routing::registry::FactoryRegistry;

/// Registry preloaded with the built-in route modules.
pub fn builtin_registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry.register("health", health::HealthRoutes);
    registry.register("status", status::StatusRoutes);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = builtin_registry();
        assert!(registry.get("health").is_some());
        assert!(registry.get("status").is_some());
        assert!(registry.get("users").is_none());
    }
}
