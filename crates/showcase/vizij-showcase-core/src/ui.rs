//! UI element capabilities and exterior/interior visibility.

use serde::{Deserialize, Serialize};

use crate::error::HostResult;
use crate::host::{ControlFlags, Host};
use crate::ids::{ElementId, ListenerId};
use crate::state::Button;

/// A host UI element, tagged by the way it takes clicks and visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiElement {
    /// DOM-like: `addEventListener("click")` and `style.display`/`pointerEvents`.
    Dom(ElementId),
    /// GUI-control-like: `onPointerUpObservable` and visible/enabled/hit-test flags.
    Control(ElementId),
}

/// A live click subscription, kept so it can be removed on detach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRegistration {
    pub element: UiElement,
    pub listener: ListenerId,
    pub button: Button,
}

impl UiElement {
    pub fn register_click(
        self,
        host: &mut dyn Host,
        button: Button,
    ) -> HostResult<ClickRegistration> {
        let listener = match self {
            UiElement::Dom(id) => host.add_click_listener(id, button)?,
            UiElement::Control(id) => host.observe_pointer_up(id, button)?,
        };
        Ok(ClickRegistration {
            element: self,
            listener,
            button,
        })
    }

    pub fn set_visible(self, host: &mut dyn Host, visible: bool) -> HostResult<()> {
        match self {
            UiElement::Dom(id) => host.set_style_visibility(id, visible),
            UiElement::Control(id) => host.set_control_flags(id, ControlFlags::all(visible)),
        }
    }
}

impl ClickRegistration {
    pub fn unregister(&self, host: &mut dyn Host) -> HostResult<()> {
        match self.element {
            UiElement::Dom(id) => host.remove_click_listener(id, self.listener),
            UiElement::Control(id) => host.remove_pointer_up_observer(id, self.listener),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMode {
    #[default]
    Exterior,
    Interior,
}

impl UiMode {
    pub fn from_interior(is_interior: bool) -> Self {
        if is_interior {
            UiMode::Interior
        } else {
            UiMode::Exterior
        }
    }

    pub fn is_interior(self) -> bool {
        self == UiMode::Interior
    }
}

/// The two button sets plus the mode toggle, as resolved at attach time.
#[derive(Clone, Debug, Default)]
pub struct ButtonSets {
    pub exterior: Vec<UiElement>,
    pub interior: Vec<UiElement>,
    pub toggle: Option<UiElement>,
}

impl ButtonSets {
    /// Show the set belonging to `mode`, hide the other; the toggle stays visible.
    pub fn apply(&self, host: &mut dyn Host, mode: UiMode) {
        let interior = mode.is_interior();
        for el in &self.exterior {
            set_visible_logged(host, *el, !interior);
        }
        for el in &self.interior {
            set_visible_logged(host, *el, interior);
        }
        if let Some(toggle) = self.toggle {
            set_visible_logged(host, toggle, true);
        }
    }

    pub fn clear(&mut self) {
        self.exterior.clear();
        self.interior.clear();
        self.toggle = None;
    }
}

fn set_visible_logged(host: &mut dyn Host, el: UiElement, visible: bool) {
    if let Err(err) = el.set_visible(host, visible) {
        log::debug!("visibility update on {el:?} ignored: {err}");
    }
}
