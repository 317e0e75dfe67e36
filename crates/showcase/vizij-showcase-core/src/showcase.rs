//! CarShowcase: attach/detach lifecycle, click handlers and completion tracking.
//!
//! Flow of a click: the host reports a [`Button`] → the handler resolves the part's
//! animation groups → each group is started in the implied direction → a completion
//! wait is polled on the component clock → the part's flag flips once every group
//! has stopped playing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ShowcaseConfig;
use crate::host::Host;
use crate::ids::{GroupId, NodeId, WaitId};
use crate::lookup::{collect_hierarchy, GroupIndex};
use crate::playback::{force_apply_frame, play, reset_to_start};
use crate::state::{Button, Part, PartState};
use crate::timers::TimerQueue;
use crate::ui::{ButtonSets, ClickRegistration, UiMode};
use crate::wait::{WaitHandle, WaitPoll, WaitSet};

/// Result of dispatching one click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing happened: no matching group, playback rejected by the host, a wait
    /// already in flight, or detached.
    Ignored,
    /// The click took effect immediately.
    Applied,
    /// Playback started; state commits when the wait completes.
    Pending(WaitHandle),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    /// Second reset pass after the host's first tick, plus NFC priming.
    DeferredReset,
    PollWait(WaitId),
}

#[derive(Debug)]
pub struct CarShowcase {
    config: ShowcaseConfig,
    state: PartState,
    root: Option<NodeId>,
    groups: GroupIndex,
    buttons: ButtonSets,
    registrations: Vec<ClickRegistration>,
    timers: TimerQueue<Task>,
    waits: WaitSet,
    clock: Duration,
    attached: bool,
}

impl CarShowcase {
    /// Resolve the car root, index its animation groups, rewind them, wire the
    /// configured buttons and show the exterior button set.
    ///
    /// Without a resolvable root (neither `car_root` nor the host's own node) the
    /// instance stays inert: attached, but with nothing wired.
    pub fn attach(host: &mut dyn Host, config: ShowcaseConfig) -> Self {
        let mut showcase = Self {
            config,
            state: PartState::default(),
            root: None,
            groups: GroupIndex::default(),
            buttons: ButtonSets::default(),
            registrations: Vec::new(),
            timers: TimerQueue::new(),
            waits: WaitSet::default(),
            clock: Duration::ZERO,
            attached: true,
        };

        let root = showcase
            .config
            .car_root
            .as_deref()
            .and_then(|r| host.node_by_ref(r))
            .or_else(|| host.self_node());
        let Some(root) = root else {
            log::warn!("car root did not resolve; showcase left inert");
            return showcase;
        };
        showcase.root = Some(root);

        let nodes = collect_hierarchy(&*host, root);
        showcase.groups = GroupIndex::build(&*host, &nodes, showcase.config.match_policy);
        showcase.reset_all(host);
        // hosts may auto-play groups on their first tick; rewind again after it
        showcase
            .timers
            .schedule(showcase.clock, Duration::ZERO, Task::DeferredReset);

        showcase.wire_buttons(host);
        showcase.apply_ui_mode(host, UiMode::Exterior);

        log::debug!(
            "showcase attached: {} car groups of {} in scene, {} click listeners",
            showcase.groups.car_groups().count(),
            showcase.groups.scene_groups().count(),
            showcase.registrations.len()
        );
        showcase
    }

    /// Remove every click listener and cancel every timer and pending wait.
    /// Animations already running keep running. Calling it again is a no-op.
    pub fn detach(&mut self, host: &mut dyn Host) {
        if !self.attached {
            return;
        }
        for reg in self.registrations.drain(..) {
            if let Err(err) = reg.unregister(host) {
                log::debug!("removing {:?} listener ignored: {err}", reg.button);
            }
        }
        let timers = self.timers.cancel_all();
        let waits = self.waits.clear();
        self.buttons.clear();
        self.attached = false;
        log::debug!("showcase detached: cancelled {timers} timers, {waits} waits");
    }

    /// Advance the component clock by `dt` and run the timers that came due.
    pub fn advance(&mut self, host: &mut dyn Host, dt: Duration) {
        if !self.attached {
            return;
        }
        self.clock += dt;
        for (_, task) in self.timers.take_due(self.clock) {
            match task {
                Task::DeferredReset => {
                    self.reset_all(host);
                    self.prime_nfc_open(host);
                }
                Task::PollWait(id) => {
                    if let Some(wait) = self.waits.get_mut(id) {
                        wait.timer = None;
                    }
                    self.poll_wait(host, id);
                }
            }
        }
    }

    /// Dispatch a click reported by the host.
    pub fn handle_click(&mut self, host: &mut dyn Host, button: Button) -> ClickOutcome {
        if !self.attached {
            return ClickOutcome::Ignored;
        }
        let Some(part) = button.part() else {
            let next = UiMode::from_interior(!self.state.is_interior);
            self.apply_ui_mode(host, next);
            return ClickOutcome::Applied;
        };
        if self.config.guard_reentrant_clicks && self.waits.has_part(part) {
            log::debug!("{} click ignored: previous animation still running", button.label());
            return ClickOutcome::Ignored;
        }
        match part {
            Part::Nfc => self.on_nfc(host),
            Part::SteeringWheel => self.on_steering_wheel(host),
            _ => self.on_toggle(host, part),
        }
    }

    /// Abandon a pending wait without committing its state.
    pub fn cancel_wait(&mut self, handle: WaitHandle) -> bool {
        match self.waits.remove(handle.id()) {
            Some(wait) => {
                if let Some(timer) = wait.timer {
                    self.timers.cancel(timer);
                }
                true
            }
            None => false,
        }
    }

    pub fn wait_pending(&self, handle: WaitHandle) -> bool {
        self.waits.get(handle.id()).is_some()
    }

    pub fn state(&self) -> &PartState {
        &self.state
    }

    pub fn ui_mode(&self) -> UiMode {
        UiMode::from_interior(self.state.is_interior)
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn pending_waits(&self) -> usize {
        self.waits.len()
    }

    pub fn registrations(&self) -> &[ClickRegistration] {
        &self.registrations
    }

    // ---------------------------------------------------------------------
    // Attach helpers
    // ---------------------------------------------------------------------

    fn reset_all(&self, host: &mut dyn Host) {
        let scene: Vec<GroupId> = self.groups.scene_groups().collect();
        let car: Vec<GroupId> = self.groups.car_groups().collect();
        reset_to_start(host, &scene);
        reset_to_start(host, &car);
    }

    fn wire_buttons(&mut self, host: &mut dyn Host) {
        for button in Button::ALL {
            let Some(reference) = self.config.button_ref(button) else {
                continue;
            };
            let Some(element) = host.ui_element(reference) else {
                log::debug!("{} button '{reference}' did not resolve", button.label());
                continue;
            };
            match element.register_click(host, button) {
                Ok(reg) => self.registrations.push(reg),
                Err(err) => log::debug!("{} button not clickable: {err}", button.label()),
            }
            if button.is_exterior() {
                self.buttons.exterior.push(element);
            } else if button.is_interior() {
                self.buttons.interior.push(element);
            } else {
                self.buttons.toggle = Some(element);
            }
        }
    }

    fn apply_ui_mode(&mut self, host: &mut dyn Host, mode: UiMode) {
        self.state.is_interior = mode.is_interior();
        self.buttons.apply(host, mode);
    }

    fn prime_nfc_open(&mut self, host: &mut dyn Host) {
        let names = &self.config.animations;
        let open = self.groups.find(&names.nfc_open);
        let close = self.groups.find(&names.nfc_close);
        if let Some(g) = open {
            let end = host.group_info(g).map(|i| i.to).unwrap_or(0.0);
            force_apply_frame(host, g, end);
        } else if let Some(g) = close {
            let start = group_from(host, g);
            force_apply_frame(host, g, start);
        }
        self.state.nfc_open = true;
    }

    // ---------------------------------------------------------------------
    // Click handlers
    // ---------------------------------------------------------------------

    fn on_toggle(&mut self, host: &mut dyn Host, part: Part) -> ClickOutcome {
        let groups = self
            .groups
            .find_all(self.config.animations.names_for(part));
        if groups.is_empty() {
            return ClickOutcome::Ignored;
        }
        let forward = !self.state.is_open(part).unwrap_or(false);
        let limit = self.config.frame_limit(part);
        let speed = self.config.speed();
        let started: Vec<GroupId> = groups
            .into_iter()
            .filter(|&g| play(host, g, forward, limit, speed).is_some())
            .collect();
        if started.is_empty() {
            log::debug!("{part:?} click ignored: no group started");
            return ClickOutcome::Ignored;
        }
        self.await_groups(host, part, started, Some(forward))
    }

    fn on_steering_wheel(&mut self, host: &mut dyn Host) -> ClickOutcome {
        let Some(g) = self.groups.find(&self.config.animations.steering_wheel) else {
            return ClickOutcome::Ignored;
        };
        let start = group_from(host, g);
        force_apply_frame(host, g, start);
        let limit = self.config.frame_limit(Part::SteeringWheel);
        if play(host, g, true, limit, self.config.speed()).is_none() {
            return ClickOutcome::Ignored;
        }
        self.await_groups(host, Part::SteeringWheel, vec![g], None)
    }

    /// NFC uses separate open and close clips, both played forward.
    fn on_nfc(&mut self, host: &mut dyn Host) -> ClickOutcome {
        let names = &self.config.animations;
        let open = self.groups.find(&names.nfc_open);
        let close = self.groups.find(&names.nfc_close);
        let (clip, next) = if self.state.nfc_open {
            (close, false)
        } else {
            (open, true)
        };
        let Some(g) = clip else {
            return ClickOutcome::Ignored;
        };
        let start = group_from(host, g);
        force_apply_frame(host, g, start);
        let limit = self.config.frame_limit(Part::Nfc);
        if play(host, g, true, limit, self.config.speed()).is_none() {
            return ClickOutcome::Ignored;
        }
        self.await_groups(host, Part::Nfc, vec![g], Some(next))
    }

    // ---------------------------------------------------------------------
    // Completion waits
    // ---------------------------------------------------------------------

    fn await_groups(
        &mut self,
        host: &mut dyn Host,
        part: Part,
        groups: Vec<GroupId>,
        commit: Option<bool>,
    ) -> ClickOutcome {
        let deadline = self.config.wait_timeout().map(|t| self.clock + t);
        let id = self.waits.insert(part, groups, commit, deadline);
        if self.poll_wait(host, id) {
            ClickOutcome::Pending(WaitHandle(id))
        } else {
            ClickOutcome::Applied
        }
    }

    /// Check a wait once. Returns true while it stays pending (a new poll timer is
    /// scheduled), false once it has been resolved and removed.
    fn poll_wait(&mut self, host: &mut dyn Host, id: WaitId) -> bool {
        let Some(status) = self.waits.get(id).map(|w| w.poll(&*host, self.clock)) else {
            return false;
        };
        match status {
            WaitPoll::Playing => {
                let timer = self.timers.schedule(
                    self.clock,
                    self.config.poll_interval(),
                    Task::PollWait(id),
                );
                if let Some(wait) = self.waits.get_mut(id) {
                    wait.timer = Some(timer);
                }
                true
            }
            WaitPoll::Finished | WaitPoll::TimedOut => {
                if let Some(wait) = self.waits.remove(id) {
                    if status == WaitPoll::TimedOut {
                        log::warn!(
                            "{:?} animation still playing after timeout; committing anyway",
                            wait.part
                        );
                    }
                    if let Some(open) = wait.commit {
                        self.state.set_open(wait.part, open);
                    }
                }
                false
            }
        }
    }
}

fn group_from(host: &dyn Host, group: GroupId) -> f32 {
    host.group_info(group).map(|i| i.from).unwrap_or(0.0)
}
