//! Identifiers for host objects and component-owned entities.
//!
//! Host ids (`NodeId`, `GroupId`, `ElementId`, `ListenerId`) are opaque handles minted
//! by the host adapter; the component only compares and passes them back.
//! `TimerId` and `WaitId` are allocated by the component itself.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WaitId(pub u32);

/// Monotonic allocator for TimerId and WaitId.
/// Ids are never reused within one attached instance.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_timer: u32,
    next_wait: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_wait(&mut self) -> WaitId {
        let id = WaitId(self.next_wait);
        self.next_wait = self.next_wait.wrapping_add(1);
        id
    }
}
