//! The slice of the host engine the lifecycle helpers call into.

use crate::coordinates::NodePos;
use crate::item::ItemStack;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub param2: u8,
}

impl Node {
    pub const AIR_NAME: &'static str = "air";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param2: 0,
        }
    }

    pub fn air() -> Self {
        Self::new(Self::AIR_NAME)
    }

    pub fn with_param2(mut self, param2: u8) -> Self {
        self.param2 = param2;
        self
    }

    pub fn is_air(&self) -> bool {
        self.name == Self::AIR_NAME
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCapabilities {
    pub max_level: u8,
    #[serde(default)]
    pub groups: Vec<String>,
}

pub trait NodeMap {
    /// `None` when the position is not loaded. `force_load` asks the host to
    /// load the surrounding area first.
    fn node_at(&self, pos: NodePos, force_load: bool) -> Option<Node>;

    fn set_node(&mut self, pos: NodePos, node: Node);

    fn remove_node(&mut self, pos: NodePos);

    fn drops_for(&self, node: &Node, tool: Option<&ToolCapabilities>) -> Vec<ItemStack>;

    fn is_diggable(&self, node: &Node, tool: Option<&ToolCapabilities>) -> bool;

    fn spawn_item(&mut self, pos: NodePos, stack: ItemStack);

    fn play_sound(&mut self, _name: &str, _pos: NodePos) {}
}
