//! Showcase configuration: the host parameter surface plus the animation mapping.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;
use crate::state::{Button, Part};

/// Lower bound applied to the global speed multiplier so playback never stalls at 0.
pub const MIN_SPEED: f32 = 0.0001;

/// Numeric inspector value. Host editors may hand numbers back as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberParam {
    Number(f32),
    Text(String),
    /// Cleared in the inspector (`null`); readers fall back to the parameter default.
    Unset,
}

impl NumberParam {
    /// Numeric reading of the parameter; unparsable text and `Unset` read as NaN,
    /// blank text as 0.
    pub fn as_f32(&self) -> f32 {
        match self {
            NumberParam::Number(n) => *n,
            NumberParam::Unset => f32::NAN,
            NumberParam::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    0.0
                } else {
                    t.parse::<f32>().unwrap_or(f32::NAN)
                }
            }
        }
    }
}

impl Default for NumberParam {
    fn default() -> Self {
        NumberParam::Number(0.0)
    }
}

impl From<f32> for NumberParam {
    fn from(v: f32) -> Self {
        NumberParam::Number(v)
    }
}

impl From<&str> for NumberParam {
    fn from(v: &str) -> Self {
        NumberParam::Text(v.to_string())
    }
}

/// How logical part names resolve to scene animation groups.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Exact name, then case-insensitive substring containment.
    #[default]
    Fuzzy,
    /// Exact name only.
    Exact,
}

/// Animation group names driven by each part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartAnimations {
    pub doors: Vec<String>,
    pub charging_port: String,
    pub trunk: String,
    pub steering_wheel: String,
    pub screen: String,
    pub nfc_open: String,
    pub nfc_close: String,
}

impl Default for PartAnimations {
    fn default() -> Self {
        Self {
            doors: ["BL", "BR", "FL", "FR"]
                .iter()
                .map(|side| format!("mk_animation_ID0_{side}"))
                .collect(),
            charging_port: "mk_animation_ID10_ChargingPort".into(),
            trunk: "mk_animation_ID6_Trunk_Open".into(),
            steering_wheel: "mk_animation_ID8_Wheel".into(),
            screen: "mk_animation_ID7_Screen".into(),
            nfc_open: "mk_animation_ID18_NFC_Open".into(),
            nfc_close: "mk_animation_ID18_NFC_Close".into(),
        }
    }
}

impl PartAnimations {
    /// Group names played by a bidirectional part. NFC uses `nfc_open`/`nfc_close` instead.
    pub fn names_for(&self, part: Part) -> Vec<&str> {
        match part {
            Part::Doors => self.doors.iter().map(String::as_str).collect(),
            Part::ChargingPort => vec![self.charging_port.as_str()],
            Part::Trunk => vec![self.trunk.as_str()],
            Part::SteeringWheel => vec![self.steering_wheel.as_str()],
            Part::Screen => vec![self.screen.as_str()],
            Part::Nfc => vec![self.nfc_open.as_str(), self.nfc_close.as_str()],
        }
    }
}

/// Parameters supplied by the host for one attached car.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowcaseConfig {
    /// Node reference of the car root. Falls back to the script's own node.
    pub car_root: Option<String>,

    // Exterior buttons
    pub button_doors: Option<String>,
    pub button_charging_port: Option<String>,
    pub button_trunk: Option<String>,
    #[serde(rename = "buttonNFC")]
    pub button_nfc: Option<String>,

    // Toggle + interior buttons
    pub button_toggle_interior: Option<String>,
    pub button_steering_wheel: Option<String>,
    pub button_screen: Option<String>,

    // Frame limits, 0 = full range
    pub frames_doors: NumberParam,
    pub frames_charging_port: NumberParam,
    pub frames_trunk: NumberParam,
    #[serde(rename = "framesNFC")]
    pub frames_nfc: NumberParam,
    pub frames_steering_wheel: NumberParam,
    pub frames_screen: NumberParam,

    pub speed_multiplier: NumberParam,

    pub animations: PartAnimations,
    pub match_policy: MatchPolicy,

    /// Completion polling cadence.
    pub poll_interval_ms: u64,
    /// Give up on a completion wait after this long; `None` waits forever.
    pub wait_timeout_ms: Option<u64>,
    /// Ignore clicks on a part whose previous animation is still being awaited.
    pub guard_reentrant_clicks: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            car_root: None,
            button_doors: None,
            button_charging_port: None,
            button_trunk: None,
            button_nfc: None,
            button_toggle_interior: None,
            button_steering_wheel: None,
            button_screen: None,
            frames_doors: NumberParam::default(),
            frames_charging_port: NumberParam::default(),
            frames_trunk: NumberParam::default(),
            frames_nfc: NumberParam::default(),
            frames_steering_wheel: NumberParam::default(),
            frames_screen: NumberParam::default(),
            speed_multiplier: NumberParam::Number(1.0),
            animations: PartAnimations::default(),
            match_policy: MatchPolicy::Fuzzy,
            poll_interval_ms: 20,
            wait_timeout_ms: Some(10_000),
            guard_reentrant_clicks: true,
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json(text: &str) -> Result<Self, ShowcaseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Effective global speed: non-finite input reads as 1, anything else is floored at
    /// [`MIN_SPEED`].
    pub fn speed(&self) -> f32 {
        let s = self.speed_multiplier.as_f32();
        if s.is_finite() {
            s.max(MIN_SPEED)
        } else {
            1.0
        }
    }

    /// Frame limit for a part; non-finite input reads as 0 (full range).
    pub fn frame_limit(&self, part: Part) -> f32 {
        let raw = match part {
            Part::Doors => &self.frames_doors,
            Part::ChargingPort => &self.frames_charging_port,
            Part::Trunk => &self.frames_trunk,
            Part::Nfc => &self.frames_nfc,
            Part::SteeringWheel => &self.frames_steering_wheel,
            Part::Screen => &self.frames_screen,
        };
        let v = raw.as_f32();
        if v.is_finite() {
            v
        } else {
            0.0
        }
    }

    pub fn button_ref(&self, button: Button) -> Option<&str> {
        let r = match button {
            Button::Doors => &self.button_doors,
            Button::ChargingPort => &self.button_charging_port,
            Button::Trunk => &self.button_trunk,
            Button::Nfc => &self.button_nfc,
            Button::ToggleInterior => &self.button_toggle_interior,
            Button::SteeringWheel => &self.button_steering_wheel,
            Button::Screen => &self.button_screen,
        };
        r.as_deref()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }

    /// Parameter schema as exposed to the host inspector.
    pub fn schema() -> Vec<ParamSpec> {
        let frames = |key, label| ParamSpec {
            key,
            label,
            kind: ParamKind::Number {
                default: 0.0,
                min: 0.0,
                max: 1000.0,
                step: 1.0,
            },
        };
        let ui = |key, label| ParamSpec {
            key,
            label,
            kind: ParamKind::UiElement,
        };
        vec![
            ParamSpec {
                key: "carRoot",
                label: "Car Root Node",
                kind: ParamKind::NodeRef,
            },
            ui("buttonDoors", "Button • Doors"),
            ui("buttonChargingPort", "Button • Charging Port"),
            ui("buttonTrunk", "Button • Trunk"),
            ui("buttonNFC", "Button • NFC"),
            ui("buttonToggleInterior", "Button • Toggle Interior/Exterior"),
            ui("buttonSteeringWheel", "Button • Steering Wheel (Interior)"),
            ui("buttonScreen", "Button • Screen (Interior)"),
            frames("framesDoors", "Frames • Doors"),
            frames("framesChargingPort", "Frames • Charging Port"),
            frames("framesTrunk", "Frames • Trunk"),
            frames("framesNFC", "Frames • NFC"),
            frames("framesSteeringWheel", "Frames • Steering Wheel (Interior)"),
            frames("framesScreen", "Frames • Screen (Interior)"),
            ParamSpec {
                key: "speedMultiplier",
                label: "Global Speed Multiplier",
                kind: ParamKind::Number {
                    default: 1.0,
                    min: 0.1,
                    max: 4.0,
                    step: 0.1,
                },
            },
        ]
    }
}

/// One entry of the inspector schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParamKind {
    NodeRef,
    UiElement,
    Number {
        default: f32,
        min: f32,
        max: f32,
        step: f32,
    },
}
