//! Playback helpers over host animation groups.
//!
//! Host failures are logged and swallowed: a group that cannot be driven simply
//! does not move. `play` reports whether playback actually started.

use serde::{Deserialize, Serialize};

use crate::error::HostResult;
use crate::host::{Host, StartArgs};
use crate::ids::GroupId;

/// Effective playback window of one group.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRange {
    pub from: f32,
    pub end: f32,
}

/// A positive `limit` caps the window at `from + limit` (never past `to`);
/// anything else plays the full clip.
pub fn frame_range(from: f32, to: f32, limit: f32) -> FrameRange {
    let end = if limit > 0.0 { (from + limit).min(to) } else { to };
    FrameRange { from, end }
}

fn swallow(group: GroupId, op: &str, result: HostResult<()>) {
    if let Err(err) = result {
        log::debug!("{op} on {group:?} ignored: {err}");
    }
}

fn start_window(
    host: &mut dyn Host,
    group: GroupId,
    range: FrameRange,
    forward: bool,
    speed: f32,
) -> HostResult<()> {
    host.stop_group(group)?;
    let seek = if forward { range.from } else { range.end };
    host.go_to_frame(group, seek)?;
    let direction = if forward { 1.0 } else { -1.0 };
    host.start_group(
        group,
        StartArgs {
            looping: false,
            speed_ratio: speed * direction,
            from: range.from,
            to: range.end,
        },
    )
}

/// Play `group` forward or backward over its (limited) range at `speed`.
///
/// Returns the window that was started. `None` when the group no longer resolves or
/// the host rejected the stop, seek or start; the failing step aborts the rest.
pub fn play(
    host: &mut dyn Host,
    group: GroupId,
    forward: bool,
    limit: f32,
    speed: f32,
) -> Option<FrameRange> {
    let info = host.group_info(group)?;
    let range = frame_range(info.from, info.to, limit);
    match start_window(host, group, range, forward, speed) {
        Ok(()) => Some(range),
        Err(err) => {
            log::debug!("playing {group:?} aborted: {err}");
            None
        }
    }
}

fn pin_frame(host: &mut dyn Host, group: GroupId, frame: f32) -> HostResult<()> {
    host.reset_group(group)?;
    host.start_group(
        group,
        StartArgs {
            looping: false,
            speed_ratio: 1.0,
            from: frame,
            to: frame,
        },
    )?;
    host.stop_group(group)?;
    host.go_to_frame(group, frame)?;
    host.evaluate_group(group, frame)
}

/// Pin `group` at `frame` without leaving it playing: reset, a zero-length start,
/// stop, seek, then evaluate its targeted animations at that frame.
///
/// The first failing step aborts the rest.
pub fn force_apply_frame(host: &mut dyn Host, group: GroupId, frame: f32) {
    swallow(group, "force_apply_frame", pin_frame(host, group, frame));
}

/// Force every group to its own start frame.
pub fn reset_to_start(host: &mut dyn Host, groups: &[GroupId]) {
    for &group in groups {
        let from = host.group_info(group).map(|i| i.from).unwrap_or(0.0);
        force_apply_frame(host, group, from);
    }
}
