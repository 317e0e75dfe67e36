//! In-memory host for integration tests.
//!
//! Nodes, animation groups and UI elements come from a [`SceneSpec`]. Groups run on
//! [`GroupCursor`]s advanced by [`MockScene::step`]; every group call is recorded in
//! [`MockScene::calls`] so tests can assert on the exact host traffic.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Deserialize;
use vizij_showcase_core::error::HostResult;
use vizij_showcase_core::{
    Button, CarShowcase, ControlFlags, ElementId, GroupCursor, GroupId, GroupInfo, Host,
    HostError, ListenerId, NodeId, StartArgs, UiElement,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSpec {
    #[serde(default)]
    pub self_node: Option<String>,
    pub nodes: Vec<NodeSpec>,
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    /// Frames per second used by `step`.
    #[serde(default = "default_fps")]
    pub fps: f32,
}

fn default_fps() -> f32 {
    60.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    pub from: f32,
    pub to: f32,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Dom,
    Control,
    /// Resolves, but exposes no click API.
    Plain,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ElementSpec {
    #[serde(rename = "ref")]
    pub reference: String,
    pub kind: ElementKind,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HostCall {
    Reset(GroupId),
    Start(GroupId, StartArgs),
    Stop(GroupId),
    GoTo(GroupId, f32),
    Evaluate(GroupId, f32),
}

#[derive(Clone, Debug)]
struct MockNode {
    name: String,
    parent: Option<NodeId>,
}

#[derive(Clone, Debug)]
struct MockGroup {
    cursor: GroupCursor,
    targets: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct MockElement {
    pub reference: String,
    pub kind: ElementKind,
    pub listeners: Vec<(ListenerId, Button)>,
    /// Last `style.display` visibility written, if any.
    pub style_visible: Option<bool>,
    /// Last control flags written, if any.
    pub flags: Option<ControlFlags>,
}

impl MockElement {
    pub fn visible(&self) -> Option<bool> {
        match self.kind {
            ElementKind::Dom => self.style_visible,
            ElementKind::Control | ElementKind::Plain => self.flags.map(|f| f.is_visible),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockScene {
    nodes: Vec<MockNode>,
    self_node: Option<NodeId>,
    groups: Vec<MockGroup>,
    elements: Vec<MockElement>,
    next_listener: u64,
    fps: f32,
    pub calls: Vec<HostCall>,
    /// Make `descendants` fail.
    pub fail_descendants: bool,
    /// Make every group manipulation fail.
    pub fail_group_ops: bool,
    /// Make listener removal fail.
    pub fail_listener_removal: bool,
}

impl MockScene {
    pub fn from_spec(spec: SceneSpec) -> Self {
        let mut scene = MockScene {
            fps: spec.fps,
            ..Default::default()
        };
        for n in &spec.nodes {
            scene.nodes.push(MockNode {
                name: n.name.clone(),
                parent: None,
            });
        }
        for (i, n) in spec.nodes.iter().enumerate() {
            let parent = n.parent.as_deref().and_then(|p| scene.node(p));
            scene.nodes[i].parent = parent;
        }
        scene.self_node = spec.self_node.as_deref().and_then(|n| scene.node(n));
        for g in spec.groups {
            let targets = g.targets.iter().filter_map(|t| scene.node(t)).collect();
            scene.groups.push(MockGroup {
                cursor: GroupCursor::new(g.name, g.from, g.to),
                targets,
            });
        }
        for e in spec.elements {
            scene.elements.push(MockElement {
                reference: e.reference,
                kind: e.kind,
                listeners: Vec::new(),
                style_visible: None,
                flags: None,
            });
        }
        scene
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u64))
    }

    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.cursor.name == name)
            .map(|i| GroupId(i as u64))
    }

    pub fn group(&self, name: &str) -> Option<&GroupCursor> {
        self.groups
            .iter()
            .find(|g| g.cursor.name == name)
            .map(|g| &g.cursor)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut GroupCursor> {
        self.groups
            .iter_mut()
            .find(|g| g.cursor.name == name)
            .map(|g| &mut g.cursor)
    }

    pub fn element(&self, reference: &str) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.reference == reference)
    }

    pub fn listener_count(&self) -> usize {
        self.elements.iter().map(|e| e.listeners.len()).sum()
    }

    /// Buttons a click on `reference` would report to the component.
    pub fn click(&self, reference: &str) -> Vec<Button> {
        self.element(reference)
            .map(|e| e.listeners.iter().map(|(_, b)| *b).collect())
            .unwrap_or_default()
    }

    pub fn any_playing(&self) -> bool {
        self.groups.iter().any(|g| g.cursor.playing)
    }

    /// Advance every group's frame clock by `dt`.
    pub fn step(&mut self, dt: Duration) {
        let frames = dt.as_secs_f32() * self.fps;
        for g in &mut self.groups {
            g.cursor.advance(frames);
        }
    }

    fn group_slot(&mut self, group: GroupId, op: &'static str) -> HostResult<&mut GroupCursor> {
        if self.fail_group_ops {
            return Err(HostError::Rejected {
                op,
                reason: "group ops disabled".into(),
            });
        }
        self.groups
            .get_mut(group.0 as usize)
            .map(|g| &mut g.cursor)
            .ok_or(HostError::GroupNotFound(group))
    }

    fn element_slot(&mut self, element: ElementId) -> HostResult<&mut MockElement> {
        self.elements
            .get_mut(element.0 as usize)
            .ok_or(HostError::ElementNotFound(element))
    }

    fn add_listener(
        &mut self,
        element: ElementId,
        button: Button,
        kind: ElementKind,
        op: &'static str,
    ) -> HostResult<ListenerId> {
        let id = ListenerId(self.next_listener);
        let el = self.element_slot(element)?;
        if el.kind != kind {
            return Err(HostError::Unsupported { op });
        }
        el.listeners.push((id, button));
        self.next_listener += 1;
        Ok(id)
    }

    fn remove_listener(&mut self, element: ElementId, listener: ListenerId) -> HostResult<()> {
        if self.fail_listener_removal {
            return Err(HostError::Rejected {
                op: "remove_listener",
                reason: "removal disabled".into(),
            });
        }
        let el = self.element_slot(element)?;
        let before = el.listeners.len();
        el.listeners.retain(|(id, _)| *id != listener);
        if el.listeners.len() == before {
            return Err(HostError::ListenerNotFound(listener));
        }
        Ok(())
    }
}

impl Host for MockScene {
    fn node_by_ref(&self, reference: &str) -> Option<NodeId> {
        self.node(reference)
    }

    fn self_node(&self) -> Option<NodeId> {
        self.self_node
    }

    fn descendants(&self, node: NodeId) -> HostResult<Vec<NodeId>> {
        if self.fail_descendants {
            return Err(HostError::Rejected {
                op: "descendants",
                reason: "walk disabled".into(),
            });
        }
        if node.0 as usize >= self.nodes.len() {
            return Err(HostError::NodeNotFound(node));
        }
        let mut out = Vec::new();
        let mut queue = VecDeque::from([node]);
        while let Some(parent) = queue.pop_front() {
            for (i, n) in self.nodes.iter().enumerate() {
                if n.parent == Some(parent) {
                    let child = NodeId(i as u64);
                    out.push(child);
                    queue.push_back(child);
                }
            }
        }
        Ok(out)
    }

    fn animation_groups(&self) -> Vec<GroupId> {
        (0..self.groups.len() as u64).map(GroupId).collect()
    }

    fn group_info(&self, group: GroupId) -> Option<GroupInfo> {
        self.groups.get(group.0 as usize).map(|g| g.cursor.info())
    }

    fn group_targets(&self, group: GroupId) -> Vec<NodeId> {
        self.groups
            .get(group.0 as usize)
            .map(|g| g.targets.clone())
            .unwrap_or_default()
    }

    fn reset_group(&mut self, group: GroupId) -> HostResult<()> {
        self.group_slot(group, "reset")?.reset();
        self.calls.push(HostCall::Reset(group));
        Ok(())
    }

    fn start_group(&mut self, group: GroupId, args: StartArgs) -> HostResult<()> {
        self.group_slot(group, "start")?.start(args);
        self.calls.push(HostCall::Start(group, args));
        Ok(())
    }

    fn stop_group(&mut self, group: GroupId) -> HostResult<()> {
        self.group_slot(group, "stop")?.stop();
        self.calls.push(HostCall::Stop(group));
        Ok(())
    }

    fn go_to_frame(&mut self, group: GroupId, frame: f32) -> HostResult<()> {
        self.group_slot(group, "go_to_frame")?.go_to_frame(frame);
        self.calls.push(HostCall::GoTo(group, frame));
        Ok(())
    }

    fn evaluate_group(&mut self, group: GroupId, frame: f32) -> HostResult<()> {
        self.group_slot(group, "evaluate")?;
        self.calls.push(HostCall::Evaluate(group, frame));
        Ok(())
    }

    fn ui_element(&mut self, reference: &str) -> Option<UiElement> {
        let idx = self.elements.iter().position(|e| e.reference == reference)?;
        let id = ElementId(idx as u64);
        Some(match self.elements[idx].kind {
            ElementKind::Dom => UiElement::Dom(id),
            ElementKind::Control | ElementKind::Plain => UiElement::Control(id),
        })
    }

    fn add_click_listener(&mut self, element: ElementId, button: Button) -> HostResult<ListenerId> {
        self.add_listener(element, button, ElementKind::Dom, "add_click_listener")
    }

    fn remove_click_listener(&mut self, element: ElementId, listener: ListenerId) -> HostResult<()> {
        self.remove_listener(element, listener)
    }

    fn observe_pointer_up(&mut self, element: ElementId, button: Button) -> HostResult<ListenerId> {
        self.add_listener(element, button, ElementKind::Control, "observe_pointer_up")
    }

    fn remove_pointer_up_observer(
        &mut self,
        element: ElementId,
        observer: ListenerId,
    ) -> HostResult<()> {
        self.remove_listener(element, observer)
    }

    fn set_style_visibility(&mut self, element: ElementId, visible: bool) -> HostResult<()> {
        self.element_slot(element)?.style_visible = Some(visible);
        Ok(())
    }

    fn set_control_flags(&mut self, element: ElementId, flags: ControlFlags) -> HostResult<()> {
        self.element_slot(element)?.flags = Some(flags);
        Ok(())
    }
}

/// Step scene and component together in `tick` increments for `total`.
pub fn run_for(showcase: &mut CarShowcase, scene: &mut MockScene, total: Duration, tick: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        scene.step(tick);
        showcase.advance(&mut *scene, tick);
        elapsed += tick;
    }
}

/// Step until no wait is pending, giving up after `limit` of simulated time.
/// Returns the simulated time spent.
pub fn run_until_settled(
    showcase: &mut CarShowcase,
    scene: &mut MockScene,
    limit: Duration,
) -> Duration {
    let tick = Duration::from_millis(10);
    let mut elapsed = Duration::ZERO;
    while showcase.pending_waits() > 0 && elapsed < limit {
        scene.step(tick);
        showcase.advance(&mut *scene, tick);
        elapsed += tick;
    }
    elapsed
}
