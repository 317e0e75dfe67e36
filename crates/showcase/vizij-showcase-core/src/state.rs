//! Part identities, button tokens and the per-part open/closed flags.

use serde::{Deserialize, Serialize};

/// Interactive car part.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    Doors,
    ChargingPort,
    Trunk,
    Nfc,
    SteeringWheel,
    Screen,
}

/// UI button wired by the component. The same value is handed to the host when a
/// click listener is registered and comes back through [`crate::CarShowcase::handle_click`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Doors,
    ChargingPort,
    Trunk,
    Nfc,
    ToggleInterior,
    SteeringWheel,
    Screen,
}

impl Button {
    /// Wiring order: exterior buttons, the mode toggle, then interior buttons.
    pub const ALL: [Button; 7] = [
        Button::Doors,
        Button::ChargingPort,
        Button::Trunk,
        Button::Nfc,
        Button::ToggleInterior,
        Button::SteeringWheel,
        Button::Screen,
    ];

    pub fn part(self) -> Option<Part> {
        match self {
            Button::Doors => Some(Part::Doors),
            Button::ChargingPort => Some(Part::ChargingPort),
            Button::Trunk => Some(Part::Trunk),
            Button::Nfc => Some(Part::Nfc),
            Button::ToggleInterior => None,
            Button::SteeringWheel => Some(Part::SteeringWheel),
            Button::Screen => Some(Part::Screen),
        }
    }

    pub fn is_exterior(self) -> bool {
        matches!(
            self,
            Button::Doors | Button::ChargingPort | Button::Trunk | Button::Nfc
        )
    }

    pub fn is_interior(self) -> bool {
        matches!(self, Button::SteeringWheel | Button::Screen)
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Doors => "Doors",
            Button::ChargingPort => "Charging Port",
            Button::Trunk => "Trunk",
            Button::Nfc => "NFC",
            Button::ToggleInterior => "Toggle Interior/Exterior",
            Button::SteeringWheel => "Steering Wheel",
            Button::Screen => "Screen",
        }
    }
}

/// Open/closed flags. Each flag changes only once its animation has finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartState {
    pub doors_open: bool,
    pub charging_port_open: bool,
    pub trunk_open: bool,
    pub nfc_open: bool,
    pub screen_open: bool,
    pub is_interior: bool,
}

impl Default for PartState {
    fn default() -> Self {
        Self {
            doors_open: false,
            charging_port_open: false,
            trunk_open: false,
            // the reader ships deployed
            nfc_open: true,
            screen_open: false,
            is_interior: false,
        }
    }
}

impl PartState {
    /// Persisted flag for a part; the steering wheel has none.
    pub fn is_open(&self, part: Part) -> Option<bool> {
        match part {
            Part::Doors => Some(self.doors_open),
            Part::ChargingPort => Some(self.charging_port_open),
            Part::Trunk => Some(self.trunk_open),
            Part::Nfc => Some(self.nfc_open),
            Part::Screen => Some(self.screen_open),
            Part::SteeringWheel => None,
        }
    }

    pub fn set_open(&mut self, part: Part, open: bool) {
        match part {
            Part::Doors => self.doors_open = open,
            Part::ChargingPort => self.charging_port_open = open,
            Part::Trunk => self.trunk_open = open,
            Part::Nfc => self.nfc_open = open,
            Part::Screen => self.screen_open = open,
            Part::SteeringWheel => {}
        }
    }
}
