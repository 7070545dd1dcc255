pub mod behavior;
pub mod config;
pub mod coordinates;
pub mod host;
pub mod inventory;
pub mod item;
pub mod lifecycle;
pub mod storage;

pub use behavior::{BehaviorRegistry, Capability, ItemBehavior};
pub use config::{ConfigError, StoreConfig};
pub use coordinates::{Direction, NodePos};
pub use host::{Node, NodeMap, ToolCapabilities};
pub use inventory::{INVENTORY_SLOTS, InventorySlots, add_stack_to_slots, empty_inventory, take_from_slot};
pub use item::ItemStack;
pub use lifecycle::{ItemLifecycle, LifecycleError, PlacementOutcome};
pub use storage::{DATA_ID_LIMIT, DataId, DataStore, StorageError};
