//! Reference frame clock for one animation group.
//!
//! Hosts that do not ship their own animation-group runtime (the Bevy adapter, the
//! test mock) embed a `GroupCursor` per group and map the [`crate::Host`] group calls
//! onto it. It only tracks the frame counter; evaluating the animated properties at
//! that frame stays with the host.

use serde::{Deserialize, Serialize};

use crate::host::{GroupInfo, StartArgs};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupCursor {
    pub name: String,
    /// Full clip range.
    pub from: f32,
    pub to: f32,
    /// Current frame.
    pub frame: f32,
    /// Active playback range, set by `start`.
    pub range_from: f32,
    pub range_to: f32,
    pub speed_ratio: f32,
    pub looping: bool,
    pub playing: bool,
}

impl GroupCursor {
    pub fn new(name: impl Into<String>, from: f32, to: f32) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            frame: from,
            range_from: from,
            range_to: to,
            speed_ratio: 1.0,
            looping: false,
            playing: false,
        }
    }

    pub fn info(&self) -> GroupInfo {
        GroupInfo {
            name: self.name.clone(),
            from: self.from,
            to: self.to,
            is_playing: self.playing,
        }
    }

    pub fn reset(&mut self) {
        self.playing = false;
        self.frame = self.from;
        self.range_from = self.from;
        self.range_to = self.to;
    }

    /// Begin playback over `args.from..=args.to`; a negative ratio starts at the end.
    pub fn start(&mut self, args: StartArgs) {
        let (lo, hi) = if args.from <= args.to {
            (args.from, args.to)
        } else {
            (args.to, args.from)
        };
        self.range_from = lo;
        self.range_to = hi;
        self.speed_ratio = args.speed_ratio;
        self.looping = args.looping;
        self.frame = if args.speed_ratio < 0.0 { hi } else { lo };
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn go_to_frame(&mut self, frame: f32) {
        self.frame = frame;
    }

    /// Move the frame by `frames × speed_ratio`. A non-looping cursor that reaches the
    /// end of its range clamps there and stops.
    pub fn advance(&mut self, frames: f32) {
        if !self.playing {
            return;
        }
        let span = self.range_to - self.range_from;
        if span <= 0.0 {
            // zero-length ranges finish on the first tick
            self.frame = self.range_from;
            self.playing = self.looping;
            return;
        }
        if self.speed_ratio == 0.0 {
            return;
        }
        let next = self.frame + frames * self.speed_ratio;
        if next > self.range_to {
            if self.looping {
                self.frame = self.range_from + (next - self.range_to) % span;
            } else {
                self.frame = self.range_to;
                self.playing = false;
            }
        } else if next < self.range_from {
            if self.looping {
                self.frame = self.range_to - (self.range_from - next) % span;
            } else {
                self.frame = self.range_from;
                self.playing = false;
            }
        } else {
            self.frame = next;
        }
    }
}
