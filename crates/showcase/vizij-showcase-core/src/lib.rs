//! Vizij Showcase Core (engine-agnostic)
//!
//! Binds a car model's interactive parts (doors, charging port, trunk, NFC reader,
//! steering wheel, screen) to the host scene's animation groups and to UI buttons.
//! The host owns rendering, the scene graph and the animation evaluator; this crate
//! owns the wiring, the per-part open/closed state and the completion waits.
//!
//! Adapters (Bevy, test mocks) implement [`Host`] and drive the component with
//! [`CarShowcase::advance`] and [`CarShowcase::handle_click`].

pub mod config;
pub mod cursor;
pub mod error;
pub mod host;
pub mod ids;
pub mod lookup;
pub mod playback;
pub mod showcase;
pub mod state;
pub mod timers;
pub mod ui;
pub mod wait;

// Re-exports for consumers (adapters)
pub use config::{MatchPolicy, NumberParam, ParamKind, ParamSpec, PartAnimations, ShowcaseConfig};
pub use cursor::GroupCursor;
pub use error::{HostError, ShowcaseError};
pub use host::{ControlFlags, GroupInfo, Host, StartArgs};
pub use ids::{ElementId, GroupId, ListenerId, NodeId, TimerId, WaitId};
pub use lookup::{normalize_name, GroupIndex};
pub use playback::{force_apply_frame, frame_range, play, reset_to_start, FrameRange};
pub use showcase::{CarShowcase, ClickOutcome};
pub use state::{Button, Part, PartState};
pub use timers::TimerQueue;
pub use ui::{ClickRegistration, UiElement, UiMode};
pub use wait::WaitHandle;
