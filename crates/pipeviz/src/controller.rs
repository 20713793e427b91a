//! Diagram interaction controller.
//!
//! [`DiagramController`] owns the mutable state of one diagram view: current
//! node positions, the set of nodes shown in business mode, and the drag
//! state machine. The machine has two states, [`DragState::Idle`] and
//! [`DragState::Dragging`], driven by four transitions:
//!
//! ```text
//!            begin_drag                 update_drag
//!   Idle ───────────────► Dragging ◄──────────────┐
//!    ▲                       │    └────────────────┘
//!    └───────────────────────┘
//!              end_drag
//! ```
//!
//! `resolve_click` runs alongside the machine: it compares the pointer
//! position at release with the position recorded at press time and toggles
//! the node's display mode when the pointer barely moved.
//!
//! No operation ever fails. Events that do not apply to the current state
//! return [`Effect::Noop`] with the reason and leave the state untouched.
//! Edges are never stored with positions; they are routed from the current
//! node positions on every render.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use pipeviz_core::geometry::Point;

use crate::{
    config::InteractionConfig,
    model::{BusinessInfo, Diagram, DisplayContent, Edge, Node, Region},
};

/// A rendering surface that node coordinates are relative to.
pub trait Surface {
    /// Top-left corner of the surface in pointer-event coordinates.
    fn origin(&self) -> Point;
}

/// A surface at a fixed origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedSurface(pub Point);

impl Surface for FixedSurface {
    fn origin(&self) -> Point {
        self.0
    }
}

/// Pointer input, in the same coordinate space as [`Surface::origin`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on a node.
    Down { node: String, position: Point },
    /// Pointer moved anywhere over the surface.
    Move { position: Point },
    /// Pointer released, over a node or over empty surface.
    Up {
        node: Option<String>,
        position: Point,
    },
    /// Pointer left the tracking surface.
    Leave,
}

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    UnknownNode,
    NoActiveDrag,
    NoPressRecorded,
    PressedOtherNode,
    BeyondClickThreshold,
    NoBusinessInfo,
    ReleasedOffNode,
}

/// Observable outcome of one controller operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    DragStarted(String),
    Moved { node: String, position: Point },
    DragEnded(String),
    ModeToggled { node: String, business: bool },
    Noop(NoopReason),
}

/// Node grabbed by the pointer and the pointer-to-origin offset at grab time.
#[derive(Debug, Clone, PartialEq)]
pub struct DragRecord {
    node: String,
    offset: Point,
}

impl DragRecord {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragRecord),
}

/// Pointer position at press time, kept until the matching release.
#[derive(Debug, Clone, PartialEq)]
struct Press {
    node: String,
    start: Point,
}

/// State object of one diagram view.
///
/// # Examples
///
/// ```
/// # use pipeviz::controller::{DiagramController, Effect};
/// # use pipeviz::config::InteractionConfig;
/// # use pipeviz::geometry::Point;
/// let mut controller =
///     DiagramController::new(pipeviz::dataset::pipeline(), InteractionConfig::default());
/// let origin = Point::default();
///
/// // A press and release on the same spot is a click.
/// controller.begin_drag("kb", Point::new(600.0, 150.0), origin);
/// controller.end_drag();
/// let effect = controller.resolve_click("kb", Point::new(600.0, 150.0));
///
/// assert!(matches!(effect, Effect::ModeToggled { business: true, .. }));
/// assert!(controller.is_business("kb"));
/// ```
#[derive(Debug, Clone)]
pub struct DiagramController {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    business_info: HashMap<String, BusinessInfo>,
    regions: Vec<Region>,
    business: HashSet<String>,
    state: DragState,
    press: Option<Press>,
    last_offset: Point,
    config: InteractionConfig,
}

impl DiagramController {
    /// Takes ownership of a diagram. Later nodes replace earlier ones with the same id.
    pub fn new(diagram: Diagram, config: InteractionConfig) -> Self {
        let (nodes, edges, business_info, regions) = diagram.into_parts();
        let nodes = nodes
            .into_iter()
            .map(|node| (node.id().to_string(), node))
            .collect();

        Self {
            nodes,
            edges,
            business_info,
            regions,
            business: HashSet::new(),
            state: DragState::Idle,
            press: None,
            last_offset: Point::default(),
            config,
        }
    }

    /// Nodes in their original order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Identifier of the node being dragged, if any.
    pub fn dragging(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(record) => Some(record.node()),
        }
    }

    /// Offset captured by the most recent drag start.
    pub fn last_offset(&self) -> Point {
        self.last_offset
    }

    pub fn is_business(&self, id: &str) -> bool {
        self.business.contains(id)
    }

    /// Whether the node has alternate content and can enter business mode.
    pub fn has_business_info(&self, id: &str) -> bool {
        self.business_info.contains_key(id)
    }

    /// The label and description the node currently shows.
    pub fn display(&self, id: &str) -> Option<DisplayContent> {
        let node = self.nodes.get(id)?;
        let content = match self.business_info.get(id) {
            Some(info) if self.business.contains(id) => DisplayContent::business(node, info),
            _ => DisplayContent::technical(node),
        };
        Some(content)
    }

    /// Topmost node whose box contains `point`, in surface coordinates.
    ///
    /// The dragged node wins over outstanding nodes, which win over the rest;
    /// among equals the later node in the set is on top.
    pub fn hit_test(&self, point: Point, is_outstanding: impl Fn(&str) -> bool) -> Option<&str> {
        self.nodes
            .values()
            .enumerate()
            .filter(|(_, node)| node.bounds().contains(point))
            .max_by_key(|(idx, node)| {
                let rank = if self.dragging() == Some(node.id()) {
                    2
                } else if is_outstanding(node.id()) {
                    1
                } else {
                    0
                };
                (rank, *idx)
            })
            .map(|(_, node)| node.id())
    }

    /// Starts dragging `id`, recording the press for click detection.
    ///
    /// Dragging the node that is already being dragged restarts the offset.
    pub fn begin_drag(&mut self, id: &str, pointer: Point, origin: Point) -> Effect {
        let Some(node) = self.nodes.get(id) else {
            debug!(node_id = id, reason = "unknown node"; "Ignoring drag start");
            return Effect::Noop(NoopReason::UnknownNode);
        };

        let offset = pointer.sub_point(origin).sub_point(node.position());
        self.last_offset = offset;
        self.state = DragState::Dragging(DragRecord {
            node: id.to_string(),
            offset,
        });
        self.press = Some(Press {
            node: id.to_string(),
            start: pointer,
        });

        debug!(node_id = id, offset_x = offset.x(), offset_y = offset.y(); "Drag started");
        Effect::DragStarted(id.to_string())
    }

    /// Moves the dragged node so that it stays under the pointer.
    ///
    /// Positions are not clamped and may leave the visible surface.
    pub fn update_drag(&mut self, pointer: Point, origin: Point) -> Effect {
        let DragState::Dragging(record) = &self.state else {
            trace!("Ignoring pointer move without active drag");
            return Effect::Noop(NoopReason::NoActiveDrag);
        };

        let Some(node) = self.nodes.get_mut(&record.node) else {
            debug!(node_id = record.node, reason = "unknown node"; "Ignoring pointer move");
            return Effect::Noop(NoopReason::UnknownNode);
        };

        let position = pointer.sub_point(origin).sub_point(record.offset);
        node.set_position(position);

        trace!(node_id = record.node, x = position.x(), y = position.y(); "Node moved");
        Effect::Moved {
            node: record.node.clone(),
            position,
        }
    }

    /// Clears the active drag. Idempotent.
    pub fn end_drag(&mut self) -> Effect {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(record) => {
                debug!(node_id = record.node; "Drag ended");
                Effect::DragEnded(record.node)
            }
            DragState::Idle => {
                trace!("End drag without active drag");
                Effect::Noop(NoopReason::NoActiveDrag)
            }
        }
    }

    /// Decides whether a release over `id` was a click and toggles the node's
    /// display mode if so.
    ///
    /// The release counts as a click when the pointer travelled less than the
    /// configured threshold since the press on the same node. The press record
    /// is consumed either way.
    pub fn resolve_click(&mut self, id: &str, pointer: Point) -> Effect {
        let Some(press) = self.press.take() else {
            debug!(node_id = id, reason = "no press recorded"; "Ignoring release");
            return Effect::Noop(NoopReason::NoPressRecorded);
        };

        if press.node != id {
            debug!(
                node_id = id,
                pressed = press.node,
                reason = "pressed other node";
                "Ignoring release"
            );
            return Effect::Noop(NoopReason::PressedOtherNode);
        }

        // Comparisons with NaN are false, so a NaN threshold never clicks.
        let distance = press.start.distance(pointer);
        let within_threshold = distance < self.config.click_threshold();
        if !within_threshold {
            trace!(node_id = id, distance; "Release after drag, not a click");
            return Effect::Noop(NoopReason::BeyondClickThreshold);
        }

        if !self.business_info.contains_key(id) {
            debug!(node_id = id, reason = "no business info"; "Ignoring click");
            return Effect::Noop(NoopReason::NoBusinessInfo);
        }

        let business = if self.business.remove(id) {
            false
        } else {
            self.business.insert(id.to_string());
            true
        };

        debug!(node_id = id, business; "Display mode toggled");
        Effect::ModeToggled {
            node: id.to_string(),
            business,
        }
    }

    /// Dispatches one pointer event, querying the surface origin once.
    ///
    /// A release first resolves the click on the node under the pointer and
    /// then ends the drag; its effects are returned in that order. Leaving the
    /// surface ends the drag and forgets the press.
    pub fn handle_event(&mut self, event: PointerEvent, surface: &dyn Surface) -> Vec<Effect> {
        match event {
            PointerEvent::Down { node, position } => {
                vec![self.begin_drag(&node, position, surface.origin())]
            }
            PointerEvent::Move { position } => vec![self.update_drag(position, surface.origin())],
            PointerEvent::Up { node, position } => {
                let click = match node {
                    Some(node) => self.resolve_click(&node, position),
                    None => {
                        self.press = None;
                        Effect::Noop(NoopReason::ReleasedOffNode)
                    }
                };
                vec![click, self.end_drag()]
            }
            PointerEvent::Leave => {
                self.press = None;
                vec![self.end_drag()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use pipeviz_core::geometry::Size;

    use super::*;
    use crate::model::Category;

    fn controller() -> DiagramController {
        let diagram = Diagram::new(
            vec![
                Node::new("a", "📊 Alpha", Category::Process)
                    .with_position(Point::new(0.0, 0.0))
                    .with_size(Size::new(100.0, 50.0))
                    .with_description(["first"]),
                Node::new("b", "Beta", Category::Output)
                    .with_position(Point::new(300.0, 0.0))
                    .with_size(Size::new(100.0, 50.0)),
            ],
            vec![Edge::new("a", "b")],
        )
        .with_business_info("a", BusinessInfo::new("Friendly Alpha", "Explains alpha."));

        DiagramController::new(diagram, InteractionConfig::default())
    }

    #[test]
    fn test_begin_drag_records_offset() {
        let mut ctl = controller();
        let origin = Point::new(10.0, 20.0);

        let effect = ctl.begin_drag("a", Point::new(40.0, 45.0), origin);

        assert_eq!(effect, Effect::DragStarted("a".to_string()));
        assert_eq!(ctl.dragging(), Some("a"));
        assert_eq!(ctl.last_offset(), Point::new(30.0, 25.0));
    }

    #[test]
    fn test_begin_drag_unknown_node() {
        let mut ctl = controller();
        let effect = ctl.begin_drag("ghost", Point::default(), Point::default());
        assert_eq!(effect, Effect::Noop(NoopReason::UnknownNode));
        assert_eq!(*ctl.state(), DragState::Idle);
    }

    #[test]
    fn test_begin_drag_twice_restarts_offset() {
        let mut ctl = controller();
        ctl.begin_drag("a", Point::new(10.0, 10.0), Point::default());
        ctl.begin_drag("a", Point::new(20.0, 5.0), Point::default());
        assert_eq!(ctl.last_offset(), Point::new(20.0, 5.0));
    }

    #[test]
    fn test_update_drag_moves_without_clamping() {
        let mut ctl = controller();
        let origin = Point::new(10.0, 20.0);
        ctl.begin_drag("a", Point::new(40.0, 45.0), origin);

        let effect = ctl.update_drag(Point::new(-100.0, 2000.0), origin);

        let expected = Point::new(-140.0, 1955.0);
        assert_eq!(
            effect,
            Effect::Moved {
                node: "a".to_string(),
                position: expected
            }
        );
        assert_eq!(ctl.node("a").unwrap().position(), expected);
    }

    #[test]
    fn test_update_drag_without_drag_is_ignored() {
        let mut ctl = controller();
        let effect = ctl.update_drag(Point::new(5.0, 5.0), Point::default());
        assert_eq!(effect, Effect::Noop(NoopReason::NoActiveDrag));
        assert_eq!(ctl.node("a").unwrap().position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_end_drag_is_idempotent() {
        let mut ctl = controller();
        ctl.begin_drag("a", Point::new(1.0, 1.0), Point::default());

        assert_eq!(ctl.end_drag(), Effect::DragEnded("a".to_string()));
        assert_eq!(ctl.end_drag(), Effect::Noop(NoopReason::NoActiveDrag));
        assert_eq!(*ctl.state(), DragState::Idle);
    }

    #[test]
    fn test_click_toggles_business_mode() {
        let mut ctl = controller();
        ctl.begin_drag("a", Point::new(50.0, 25.0), Point::default());
        ctl.end_drag();

        let effect = ctl.resolve_click("a", Point::new(52.0, 27.0));

        assert_eq!(
            effect,
            Effect::ModeToggled {
                node: "a".to_string(),
                business: true
            }
        );
        let content = ctl.display("a").unwrap();
        assert_eq!(content.label, "📊 Friendly Alpha");
        assert_eq!(content.description, vec!["Explains alpha.".to_string()]);
    }

    #[test]
    fn test_drag_beyond_threshold_does_not_toggle() {
        let mut ctl = controller();
        ctl.begin_drag("a", Point::new(50.0, 25.0), Point::default());

        let effect = ctl.resolve_click("a", Point::new(53.0, 29.0));

        assert_eq!(effect, Effect::Noop(NoopReason::BeyondClickThreshold));
        assert!(!ctl.is_business("a"));
    }

    #[test]
    fn test_nan_threshold_never_clicks() {
        let node = Node::new("a", "Alpha", Category::Process).with_size(Size::new(100.0, 50.0));
        let diagram = Diagram::new(vec![node], Vec::new())
            .with_business_info("a", BusinessInfo::new("Friendly Alpha", "Explains alpha."));
        let mut ctl = DiagramController::new(diagram, InteractionConfig::new(f32::NAN));

        ctl.begin_drag("a", Point::new(50.0, 25.0), Point::default());
        let effect = ctl.resolve_click("a", Point::new(350.0, 325.0));

        assert_eq!(effect, Effect::Noop(NoopReason::BeyondClickThreshold));
        assert!(!ctl.is_business("a"));
    }

    #[test]
    fn test_click_without_business_info() {
        let mut ctl = controller();
        ctl.begin_drag("b", Point::new(310.0, 10.0), Point::default());

        let effect = ctl.resolve_click("b", Point::new(310.0, 10.0));

        assert_eq!(effect, Effect::Noop(NoopReason::NoBusinessInfo));
        assert!(!ctl.is_business("b"));
        assert_eq!(ctl.display("b").unwrap().label, "Beta");
    }

    #[test]
    fn test_click_without_press_is_ignored() {
        let mut ctl = controller();
        assert_eq!(
            ctl.resolve_click("a", Point::default()),
            Effect::Noop(NoopReason::NoPressRecorded)
        );

        ctl.begin_drag("a", Point::default(), Point::default());
        ctl.resolve_click("a", Point::default());
        assert_eq!(
            ctl.resolve_click("a", Point::default()),
            Effect::Noop(NoopReason::NoPressRecorded)
        );
    }

    #[test]
    fn test_release_over_other_node() {
        let mut ctl = controller();
        ctl.begin_drag("b", Point::new(310.0, 10.0), Point::default());
        assert_eq!(
            ctl.resolve_click("a", Point::new(310.0, 10.0)),
            Effect::Noop(NoopReason::PressedOtherNode)
        );
        assert!(!ctl.is_business("a"));
    }

    #[test]
    fn test_handle_event_click_sequence() {
        let mut ctl = controller();
        let surface = FixedSurface(Point::new(100.0, 100.0));

        ctl.handle_event(
            PointerEvent::Down {
                node: "a".to_string(),
                position: Point::new(150.0, 125.0),
            },
            &surface,
        );
        let effects = ctl.handle_event(
            PointerEvent::Up {
                node: Some("a".to_string()),
                position: Point::new(150.0, 125.0),
            },
            &surface,
        );

        assert_eq!(
            effects,
            vec![
                Effect::ModeToggled {
                    node: "a".to_string(),
                    business: true
                },
                Effect::DragEnded("a".to_string()),
            ]
        );
        assert_eq!(ctl.node("a").unwrap().position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_handle_event_drag_sequence() {
        let mut ctl = controller();
        let surface = FixedSurface(Point::new(100.0, 100.0));

        ctl.handle_event(
            PointerEvent::Down {
                node: "b".to_string(),
                position: Point::new(420.0, 120.0),
            },
            &surface,
        );
        ctl.handle_event(
            PointerEvent::Move {
                position: Point::new(520.0, 220.0),
            },
            &surface,
        );
        let effects = ctl.handle_event(
            PointerEvent::Up {
                node: Some("b".to_string()),
                position: Point::new(520.0, 220.0),
            },
            &surface,
        );

        assert_eq!(effects[0], Effect::Noop(NoopReason::BeyondClickThreshold));
        assert_eq!(effects[1], Effect::DragEnded("b".to_string()));
        let position = ctl.node("b").unwrap().position();
        assert_approx_eq!(f32, position.x(), 400.0);
        assert_approx_eq!(f32, position.y(), 100.0);
    }

    #[test]
    fn test_leave_ends_drag_and_forgets_press() {
        let mut ctl = controller();
        let surface = FixedSurface::default();

        ctl.handle_event(
            PointerEvent::Down {
                node: "a".to_string(),
                position: Point::new(10.0, 10.0),
            },
            &surface,
        );
        let effects = ctl.handle_event(PointerEvent::Leave, &surface);
        assert_eq!(effects, vec![Effect::DragEnded("a".to_string())]);

        let effects = ctl.handle_event(
            PointerEvent::Up {
                node: Some("a".to_string()),
                position: Point::new(10.0, 10.0),
            },
            &surface,
        );
        assert_eq!(
            effects,
            vec![
                Effect::Noop(NoopReason::NoPressRecorded),
                Effect::Noop(NoopReason::NoActiveDrag),
            ]
        );
        assert!(!ctl.is_business("a"));
    }

    #[test]
    fn test_release_off_node_forgets_press() {
        let mut ctl = controller();
        let surface = FixedSurface::default();
        ctl.handle_event(
            PointerEvent::Down {
                node: "a".to_string(),
                position: Point::new(10.0, 10.0),
            },
            &surface,
        );

        let effects = ctl.handle_event(
            PointerEvent::Up {
                node: None,
                position: Point::new(10.0, 10.0),
            },
            &surface,
        );
        assert_eq!(effects[0], Effect::Noop(NoopReason::ReleasedOffNode));
        assert_eq!(
            ctl.resolve_click("a", Point::new(10.0, 10.0)),
            Effect::Noop(NoopReason::NoPressRecorded)
        );
    }

    #[test]
    fn test_hit_test_prefers_dragged_node() {
        let mut ctl = controller();
        assert_eq!(ctl.hit_test(Point::new(50.0, 25.0), |_| false), Some("a"));
        assert_eq!(ctl.hit_test(Point::new(200.0, 25.0), |_| false), None);

        // Stack b on top of a, then grab a.
        ctl.begin_drag("b", Point::new(300.0, 0.0), Point::default());
        ctl.update_drag(Point::new(0.0, 0.0), Point::default());
        ctl.end_drag();
        assert_eq!(ctl.hit_test(Point::new(50.0, 25.0), |_| false), Some("b"));
        assert_eq!(
            ctl.hit_test(Point::new(50.0, 25.0), |id| id == "a"),
            Some("a")
        );

        ctl.begin_drag("a", Point::new(50.0, 25.0), Point::default());
        assert_eq!(
            ctl.hit_test(Point::new(50.0, 25.0), |id| id == "b"),
            Some("a")
        );
    }
}
