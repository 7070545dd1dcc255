use crate::storage::DataId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub name: String,
    pub count: u32,
    /// Key of the stack's record in the data store, namespaced by `name`.
    #[serde(default)]
    pub data_id: Option<DataId>,
}

impl ItemStack {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
            data_id: None,
        }
    }

    pub fn with_data_id(mut self, data_id: DataId) -> Self {
        self.data_id = Some(data_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Splits off up to `n` items. The returned stack keeps the data id.
    pub fn take(&mut self, n: u32) -> Option<ItemStack> {
        let taken = n.min(self.count);
        if taken == 0 {
            return None;
        }
        self.count -= taken;
        Some(ItemStack {
            name: self.name.clone(),
            count: taken,
            data_id: self.data_id,
        })
    }
}
