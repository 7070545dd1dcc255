//! Per item-type behaviour and the registry it is looked up in.

use crate::coordinates::NodePos;
use crate::host::{Node, ToolCapabilities};
use crate::item::ItemStack;
use crate::storage::DataStore;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    OnDrop,
    OnPickup,
    OnDestroy,
    OnCopy,
    OnPlaceExact,
    CanDig,
    PreserveMetadata,
}

/// Hooks an item type may implement. Every default means "not handled", so
/// the lifecycle helpers fall back to the host's behaviour.
pub trait ItemBehavior {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &[Capability] {
        &[]
    }

    fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Returns the part of `stack` that should still be spawned, if any.
    fn on_drop(&self, stack: ItemStack, _pos: NodePos) -> Option<ItemStack> {
        Some(stack)
    }

    fn on_pickup(&self, stack: ItemStack) -> Option<ItemStack> {
        Some(stack)
    }

    fn on_destroy(&self, _stack: &ItemStack, _store: &DataStore) {}

    fn on_copy(&self, stack: &ItemStack, _store: &DataStore) -> ItemStack {
        stack.clone()
    }

    fn on_place(&self, _stack: &ItemStack, _pos: NodePos) -> Option<Node> {
        None
    }

    fn can_dig(&self, _node: &Node, _tool: Option<&ToolCapabilities>) -> Option<bool> {
        None
    }

    fn placement_sound(&self) -> Option<&str> {
        None
    }

    fn tool_capabilities(&self) -> Option<&ToolCapabilities> {
        None
    }
}

#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<String, Box<dyn ItemBehavior>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any behaviour already registered under the same name.
    pub fn register(&mut self, behavior: Box<dyn ItemBehavior>) {
        self.behaviors.insert(behavior.name().to_string(), behavior);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ItemBehavior> {
        self.behaviors.get(name).map(|behavior| behavior.as_ref())
    }

    pub fn has_capability(&self, name: &str, capability: Capability) -> bool {
        self.get(name).is_some_and(|behavior| behavior.has(capability))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(&'static str);

    impl ItemBehavior for Plain {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct Backpack;

    impl ItemBehavior for Backpack {
        fn name(&self) -> &str {
            "backpack"
        }

        fn capabilities(&self) -> &[Capability] {
            &[Capability::OnDestroy, Capability::PreserveMetadata]
        }
    }

    #[test]
    fn looks_up_by_name() {
        let mut registry = BehaviorRegistry::new();
        registry.register(Box::new(Plain("stone")));
        registry.register(Box::new(Backpack));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("stone").unwrap().name(), "stone");
        assert!(registry.get("dirt").is_none());
    }

    #[test]
    fn capability_queries() {
        let mut registry = BehaviorRegistry::new();
        registry.register(Box::new(Plain("stone")));
        registry.register(Box::new(Backpack));

        assert!(registry.has_capability("backpack", Capability::PreserveMetadata));
        assert!(!registry.has_capability("backpack", Capability::CanDig));
        assert!(!registry.has_capability("stone", Capability::OnDestroy));
        assert!(!registry.has_capability("missing", Capability::OnDrop));
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = BehaviorRegistry::new();
        registry.register(Box::new(Plain("backpack")));
        registry.register(Box::new(Backpack));

        assert_eq!(registry.len(), 1);
        assert!(registry.has_capability("backpack", Capability::OnDestroy));
    }

    #[test]
    fn default_hooks_pass_stacks_through() {
        let plain = Plain("torch");
        let stack = ItemStack::new("torch", 3);
        assert_eq!(plain.on_pickup(stack.clone()), Some(stack.clone()));
        assert_eq!(plain.on_drop(stack.clone(), NodePos::new(0, 0, 0)), Some(stack));
        assert_eq!(plain.can_dig(&Node::new("torch"), None), None);
    }
}
