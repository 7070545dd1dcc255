use crate::item::ItemStack;

pub const INVENTORY_SLOTS: usize = 10;

pub type InventorySlots = [Option<ItemStack>; INVENTORY_SLOTS];

pub fn empty_inventory() -> InventorySlots {
    Default::default()
}

/// Stacks carrying a data id never merge; each keeps its own slot.
pub fn add_stack_to_slots(slots: &mut InventorySlots, stack: ItemStack) -> bool {
    if stack.is_empty() {
        return true;
    }

    if stack.data_id.is_none() {
        if let Some(existing) = slots
            .iter_mut()
            .flatten()
            .find(|slot| slot.name == stack.name && slot.data_id.is_none())
        {
            existing.count = existing.count.saturating_add(stack.count);
            return true;
        }
    }

    if let Some(slot) = slots.iter_mut().find(|slot| slot.is_none()) {
        *slot = Some(stack);
        return true;
    }

    false
}

pub fn take_from_slot(slots: &mut InventorySlots, slot_index: usize, n: u32) -> Option<ItemStack> {
    let slot = slots.get_mut(slot_index)?;
    let taken = slot.as_mut()?.take(n);
    if slot.as_ref().is_some_and(ItemStack::is_empty) {
        *slot = None;
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_plain_stacks_by_name() {
        let mut slots = empty_inventory();
        assert!(add_stack_to_slots(&mut slots, ItemStack::new("dirt", 3)));
        assert!(add_stack_to_slots(&mut slots, ItemStack::new("dirt", 4)));
        assert_eq!(slots[0].as_ref().unwrap().count, 7);
        assert!(slots[1].is_none());
    }

    #[test]
    fn stacks_with_data_use_their_own_slot() {
        let mut slots = empty_inventory();
        add_stack_to_slots(&mut slots, ItemStack::new("bag", 1).with_data_id(1));
        add_stack_to_slots(&mut slots, ItemStack::new("bag", 1).with_data_id(2));
        add_stack_to_slots(&mut slots, ItemStack::new("bag", 1));
        assert_eq!(slots.iter().flatten().count(), 3);
    }

    #[test]
    fn full_inventory_rejects_new_stack() {
        let mut slots = empty_inventory();
        for i in 0..INVENTORY_SLOTS {
            assert!(add_stack_to_slots(&mut slots, ItemStack::new(format!("item{i}"), 1)));
        }
        assert!(!add_stack_to_slots(&mut slots, ItemStack::new("extra", 1)));
    }

    #[test]
    fn taking_last_item_clears_slot() {
        let mut slots = empty_inventory();
        add_stack_to_slots(&mut slots, ItemStack::new("dirt", 2));
        assert_eq!(take_from_slot(&mut slots, 0, 1).unwrap().count, 1);
        assert_eq!(take_from_slot(&mut slots, 0, 5).unwrap().count, 1);
        assert!(slots[0].is_none());
        assert!(take_from_slot(&mut slots, 0, 1).is_none());
        assert!(take_from_slot(&mut slots, 99, 1).is_none());
    }
}
