//! Identifiers for host-owned scene entities.
//!
//! The host allocates these densely; they are opaque to the pipeline and
//! only valid for the scene instance that produced them.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub u32);

/// Monotonic allocator for scene entity ids. Host implementations use this
/// to hand out dense ids; the pipeline never constructs ids itself.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_object: u32,
    next_action: u32,
    next_collection: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_object(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object = self.next_object.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_action(&mut self) -> ActionId {
        let id = ActionId(self.next_action);
        self.next_action = self.next_action.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_collection(&mut self) -> CollectionId {
        let id = CollectionId(self.next_collection);
        self.next_collection = self.next_collection.wrapping_add(1);
        id
    }
}
