// crates/engine_core/src/input/registry.rs
use std::collections::HashMap;
use engine_shared::ActionId;

#[derive(Default, Clone, Debug)]
pub struct ActionRegistry {
    name_to_id: HashMap<String, ActionId>,
    next_id: ActionId,
}

impl ActionRegistry {
    /// Returns the existing id for `name`, or allocates the next one.
    pub fn register(&mut self, name: &str) -> ActionId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.next_id;
        self.name_to_id.insert(name.to_string(), id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn get_id(&self, name: &str) -> Option<ActionId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut reg = ActionRegistry::default();
        let a = reg.register("Shoot");
        let b = reg.register("Open");
        assert_eq!(reg.register("Shoot"), a);
        assert_ne!(a, b);
        assert_eq!(reg.get_id("Open"), Some(b));
        assert_eq!(reg.get_id("Jump"), None);
        assert_eq!(reg.len(), 2);
    }
}
