//! Completion waits: "commit this part's new state once these groups stop playing".
//!
//! A wait is checked right after playback starts and then re-checked by a poll timer
//! every `poll_interval` until none of its groups is playing or its deadline passes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::ids::{GroupId, IdAllocator, TimerId, WaitId};
use crate::state::Part;

/// Cancellable handle to an in-flight completion wait.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaitHandle(pub(crate) WaitId);

impl WaitHandle {
    pub fn id(self) -> WaitId {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CompletionWait {
    pub id: WaitId,
    pub part: Part,
    pub groups: Vec<GroupId>,
    /// Flag value written for `part` on completion; `None` for stateless parts.
    pub commit: Option<bool>,
    pub deadline: Option<Duration>,
    /// Poll timer currently scheduled for this wait.
    pub timer: Option<TimerId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum WaitPoll {
    Finished,
    TimedOut,
    Playing,
}

impl CompletionWait {
    pub fn poll(&self, host: &dyn Host, now: Duration) -> WaitPoll {
        // a group that vanished from the host counts as finished
        let playing = self.groups.iter().any(|g| {
            host.group_info(*g)
                .map(|info| info.is_playing)
                .unwrap_or(false)
        });
        if !playing {
            WaitPoll::Finished
        } else if self.deadline.is_some_and(|d| now >= d) {
            WaitPoll::TimedOut
        } else {
            WaitPoll::Playing
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct WaitSet {
    ids: IdAllocator,
    waits: Vec<CompletionWait>,
}

impl WaitSet {
    pub fn insert(
        &mut self,
        part: Part,
        groups: Vec<GroupId>,
        commit: Option<bool>,
        deadline: Option<Duration>,
    ) -> WaitId {
        let id = self.ids.alloc_wait();
        self.waits.push(CompletionWait {
            id,
            part,
            groups,
            commit,
            deadline,
            timer: None,
        });
        id
    }

    pub fn get(&self, id: WaitId) -> Option<&CompletionWait> {
        self.waits.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WaitId) -> Option<&mut CompletionWait> {
        self.waits.iter_mut().find(|w| w.id == id)
    }

    pub fn remove(&mut self, id: WaitId) -> Option<CompletionWait> {
        let idx = self.waits.iter().position(|w| w.id == id)?;
        Some(self.waits.remove(idx))
    }

    pub fn has_part(&self, part: Part) -> bool {
        self.waits.iter().any(|w| w.part == part)
    }

    pub fn len(&self) -> usize {
        self.waits.len()
    }

    pub fn clear(&mut self) -> usize {
        let n = self.waits.len();
        self.waits.clear();
        n
    }
}
