use crate::behavior::{BehaviorRegistry, Capability, ItemBehavior};
use crate::coordinates::{Direction, NodePos};
use crate::host::{Node, NodeMap, ToolCapabilities};
use crate::inventory::{InventorySlots, add_stack_to_slots};
use crate::item::ItemStack;
use crate::storage::DataStore;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub placed: Node,
    pub target: NodePos,
    pub remaining_in_stack: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("node at {0:?} is not loaded")]
    Unloaded(NodePos),
    #[error("nothing to dig at {0:?}")]
    NothingToDig(NodePos),
    #[error("{node} at {pos:?} cannot be dug with this tool")]
    NotDiggable { node: String, pos: NodePos },
    #[error("target {0:?} is not empty")]
    TargetBlocked(NodePos),
    #[error("stack is empty")]
    EmptyStack,
    #[error("inventory is full")]
    InventoryFull,
}

/// Dig, place, drop, pick up, destroy and copy items, asking the item's
/// registered behaviour first and the host map otherwise.
pub struct ItemLifecycle<'a> {
    registry: &'a BehaviorRegistry,
    store: &'a DataStore,
}

impl<'a> ItemLifecycle<'a> {
    pub fn new(registry: &'a BehaviorRegistry, store: &'a DataStore) -> Self {
        Self { registry, store }
    }

    fn behavior_with(&self, name: &str, capability: Capability) -> Option<&'a dyn ItemBehavior> {
        self.registry
            .get(name)
            .filter(|behavior| behavior.has(capability))
    }

    fn tool_capabilities(&self, tool: Option<&ItemStack>) -> Option<&'a ToolCapabilities> {
        tool.and_then(|stack| self.registry.get(&stack.name))
            .and_then(|behavior| behavior.tool_capabilities())
    }

    pub fn dig<M: NodeMap + ?Sized>(
        &self,
        map: &mut M,
        pos: NodePos,
        tool: Option<&ItemStack>,
    ) -> Result<Vec<ItemStack>, LifecycleError> {
        let node = map
            .node_at(pos, true)
            .ok_or(LifecycleError::Unloaded(pos))?;
        if node.is_air() {
            return Err(LifecycleError::NothingToDig(pos));
        }

        let caps = self.tool_capabilities(tool);
        let diggable = self
            .behavior_with(&node.name, Capability::CanDig)
            .and_then(|behavior| behavior.can_dig(&node, caps))
            .unwrap_or_else(|| map.is_diggable(&node, caps));
        if !diggable {
            return Err(LifecycleError::NotDiggable {
                node: node.name,
                pos,
            });
        }

        let drops = map.drops_for(&node, caps);
        map.remove_node(pos);
        debug!("dug {} at {:?}, {} drops", node.name, pos, drops.len());
        Ok(drops)
    }

    pub fn place<M: NodeMap + ?Sized>(
        &self,
        map: &mut M,
        stack: &mut ItemStack,
        pos: NodePos,
        facing: Direction,
    ) -> Result<PlacementOutcome, LifecycleError> {
        if stack.is_empty() {
            return Err(LifecycleError::EmptyStack);
        }

        let current = map
            .node_at(pos, false)
            .ok_or(LifecycleError::Unloaded(pos))?;
        if !current.is_air() {
            return Err(LifecycleError::TargetBlocked(pos));
        }

        let node = self
            .behavior_with(&stack.name, Capability::OnPlaceExact)
            .and_then(|behavior| behavior.on_place(stack, pos))
            .unwrap_or_else(|| Node::new(stack.name.as_str()).with_param2(facing.facedir()));

        map.set_node(pos, node.clone());
        if let Some(sound) = self
            .registry
            .get(&stack.name)
            .and_then(|behavior| behavior.placement_sound())
        {
            map.play_sound(sound, pos);
        }

        stack.count -= 1;
        Ok(PlacementOutcome {
            placed: node,
            target: pos,
            remaining_in_stack: stack.count,
        })
    }

    /// Spawns whatever survives the item's `on_drop` hook and returns it.
    pub fn drop_item<M: NodeMap + ?Sized>(
        &self,
        map: &mut M,
        stack: ItemStack,
        pos: NodePos,
    ) -> Option<ItemStack> {
        let surviving = match self.behavior_with(&stack.name, Capability::OnDrop) {
            Some(behavior) => behavior.on_drop(stack, pos),
            None => Some(stack),
        }
        .filter(|stack| !stack.is_empty())?;

        map.spawn_item(pos, surviving.clone());
        Some(surviving)
    }

    pub fn pickup(&self, slots: &mut InventorySlots, stack: ItemStack) -> Result<(), LifecycleError> {
        let incoming = match self.behavior_with(&stack.name, Capability::OnPickup) {
            Some(behavior) => behavior.on_pickup(stack),
            None => Some(stack),
        };
        let Some(incoming) = incoming else {
            return Ok(());
        };

        if add_stack_to_slots(slots, incoming) {
            Ok(())
        } else {
            Err(LifecycleError::InventoryFull)
        }
    }

    /// Without an `on_destroy` hook the stack's own record is removed from
    /// the store, namespaced by the item name.
    pub fn destroy(&self, stack: &ItemStack) {
        if let Some(behavior) = self.behavior_with(&stack.name, Capability::OnDestroy) {
            behavior.on_destroy(stack, self.store);
            return;
        }

        if let Some(data_id) = stack.data_id {
            if let Err(err) = self.store.remove(&stack.name, data_id, None) {
                warn!("failed to clean up data for {}: {}", stack.name, err);
            }
        }
    }

    pub fn copy(&self, stack: &ItemStack) -> ItemStack {
        if let Some(behavior) = self.behavior_with(&stack.name, Capability::OnCopy) {
            return behavior.on_copy(stack, self.store);
        }

        let mut copy = stack.clone();
        if !self.registry.has_capability(&stack.name, Capability::PreserveMetadata) {
            copy.data_id = None;
        }
        copy
    }
}
