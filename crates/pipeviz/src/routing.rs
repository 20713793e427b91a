//! Edge routing.
//!
//! Routes are derived from current node positions and never cached. Each
//! edge falls into one of three shapes:
//!
//! - **Fan-in**: node to the convergence point. A straight segment from the
//!   right-center of the source box.
//! - **Fan-out**: convergence point to node. A straight segment into the
//!   left-center of the target box, with an arrowhead.
//! - **Direct**: node to node. Endpoints sit on the facing sides of the two
//!   boxes and are joined by a gently bowed quadratic curve.
//!
//! An edge that references a node that does not exist has no route.

use log::trace;

use pipeviz_core::geometry::{Bounds, Point};

use crate::{
    config::RoutingConfig,
    model::{Edge, EdgeStyle, Endpoint, Node},
};

/// Which of the three routing rules produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    FanIn,
    FanOut,
    Direct,
}

/// Geometry of the stroke between the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathShape {
    Line,
    Quadratic { control: Point },
}

/// Computed geometry of one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    kind: RouteKind,
    start: Point,
    end: Point,
    shape: PathShape,
    label_position: Option<Point>,
    dashed: bool,
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn shape(&self) -> PathShape {
        self.shape
    }

    /// Anchor of the edge label, present only for labeled edges.
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }

    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// Fan-in segments end at the convergence point without an arrowhead.
    pub fn has_arrowhead(&self) -> bool {
        self.kind != RouteKind::FanIn
    }

    /// Perpendicular distance between the curve's control point and the chord midpoint.
    pub fn bow(&self) -> f32 {
        match self.shape {
            PathShape::Line => 0.0,
            PathShape::Quadratic { control } => control.distance(self.start.midpoint(self.end)),
        }
    }

    /// SVG path data for the route.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pipeviz::{config::RoutingConfig, model::{Category, Edge, Node}, routing};
    /// # use pipeviz::geometry::{Point, Size};
    /// let source = Node::new("src1", "Source", Category::Source)
    ///     .with_position(Point::new(30.0, 80.0))
    ///     .with_size(Size::new(130.0, 55.0));
    /// let edge = Edge::new("src1", "convergence");
    ///
    /// let route = routing::route(&edge, |_| Some(&source), &RoutingConfig::default()).unwrap();
    /// assert_eq!(route.path_data(), "M 160 107.5 L 205 300");
    /// ```
    pub fn path_data(&self) -> String {
        match self.shape {
            PathShape::Line => format!(
                "M {} {} L {} {}",
                self.start.x(),
                self.start.y(),
                self.end.x(),
                self.end.y()
            ),
            PathShape::Quadratic { control } => format!(
                "M {} {} Q {} {} {} {}",
                self.start.x(),
                self.start.y(),
                control.x(),
                control.y(),
                self.end.x(),
                self.end.y()
            ),
        }
    }

    /// Point on the path at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        match self.shape {
            PathShape::Line => {
                let along = self.end.sub_point(self.start).scale(t);
                self.start.add_point(along)
            }
            PathShape::Quadratic { control } => quadratic_point(self.start, control, self.end, t),
        }
    }
}

/// Routes `edge` using `lookup` to resolve node identifiers.
///
/// Returns `None` when an endpoint names an unknown node, or when both
/// endpoints are the convergence point.
pub fn route<'a, F>(edge: &Edge, lookup: F, config: &RoutingConfig) -> Option<Route>
where
    F: Fn(&str) -> Option<&'a Node>,
{
    let resolve = |endpoint: &Endpoint| -> Option<&'a Node> {
        let node = lookup(endpoint.id());
        if node.is_none() {
            trace!(node_id = endpoint.id(); "Edge endpoint does not resolve");
        }
        node
    };

    match (edge.from(), edge.to()) {
        (Endpoint::Convergence, Endpoint::Convergence) => None,
        (from, Endpoint::Convergence) => Some(fan_in(resolve(from)?, config)),
        (Endpoint::Convergence, to) => Some(fan_out(edge, resolve(to)?, config)),
        (from, to) => Some(direct(edge, resolve(from)?, resolve(to)?, config)),
    }
}

fn fan_in(source: &Node, config: &RoutingConfig) -> Route {
    Route {
        kind: RouteKind::FanIn,
        start: source.bounds().right_center(),
        end: config.convergence(),
        shape: PathShape::Line,
        label_position: None,
        dashed: true,
    }
}

fn fan_out(edge: &Edge, target: &Node, config: &RoutingConfig) -> Route {
    let start = config.convergence();
    let end = target.bounds().left_center();
    let label_position = edge.label().map(|_| {
        let mid = start.midpoint(end);
        Point::new(mid.x(), mid.y() - config.label_lift())
    });

    Route {
        kind: RouteKind::FanOut,
        start,
        end,
        shape: PathShape::Line,
        label_position,
        dashed: true,
    }
}

fn direct(edge: &Edge, source: &Node, target: &Node, config: &RoutingConfig) -> Route {
    let (start, end) = facing_sides(source.bounds(), target.bounds());

    let delta = end.sub_point(start);
    let distance = delta.hypot();
    let control = if distance > 0.0 {
        let curvature = (distance * config.curvature_ratio()).min(config.curvature_cap());
        let perpendicular = Point::new(-delta.y() / distance, delta.x() / distance)
            .scale(curvature * config.bow_scale());
        start.midpoint(end).add_point(perpendicular)
    } else {
        start
    };

    let label_position = edge.label().map(|_| {
        let on_curve = quadratic_point(start, control, end, 0.5);
        let angle = delta.y().atan2(delta.x());
        let offset = config.label_offset();
        Point::new(
            on_curve.x() - angle.sin() * offset,
            on_curve.y() + angle.cos() * offset - config.label_lift(),
        )
    });

    Route {
        kind: RouteKind::Direct,
        start,
        end,
        shape: PathShape::Quadratic { control },
        label_position,
        dashed: edge.style() == EdgeStyle::Dashed,
    }
}

/// Exit point on `source` and entry point on `target`, on the sides that face
/// each other.
///
/// The dominant axis of the center-to-center direction decides between the
/// left/right and the top/bottom edge midpoints.
pub fn facing_sides(source: Bounds, target: Bounds) -> (Point, Point) {
    let delta = target.center().sub_point(source.center());
    let angle = delta.y().atan2(delta.x());

    if angle.cos().abs() > angle.sin().abs() {
        if delta.x() > 0.0 {
            (source.right_center(), target.left_center())
        } else {
            (source.left_center(), target.right_center())
        }
    } else if delta.y() > 0.0 {
        (source.bottom_center(), target.top_center())
    } else {
        (source.top_center(), target.bottom_center())
    }
}

fn quadratic_point(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let u = 1.0 - t;
    p0.scale(u * u)
        .add_point(p1.scale(2.0 * u * t))
        .add_point(p2.scale(t * t))
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use pipeviz_core::geometry::Size;

    use super::*;
    use crate::model::Category;

    fn boxed(id: &str, x: f32, y: f32, size: Size) -> Node {
        Node::new(id, id, Category::Process)
            .with_position(Point::new(x, y))
            .with_size(size)
    }

    fn size() -> impl Strategy<Value = Size> {
        (20.0f32..300.0, 20.0f32..300.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn route_pair(a: &Node, b: &Node) -> Route {
        let nodes = [a, b];
        route(
            &Edge::new(a.id(), b.id()),
            |id| nodes.iter().copied().find(|node| node.id() == id),
            &RoutingConfig::default(),
        )
        .expect("both endpoints exist")
    }

    fn check_horizontal_offset_uses_side_midpoints(
        x: f32,
        y: f32,
        size: Size,
        gap: f32,
        leftward: bool,
    ) -> Result<(), TestCaseError> {
        let dx = if leftward { -gap } else { gap };
        let a = boxed("a", x, y, size);
        let b = boxed("b", x + dx, y, size);

        for (source, target) in [(&a, &b), (&b, &a)] {
            let route = route_pair(source, target);
            let (s, t) = (source.bounds(), target.bounds());
            prop_assert!(route.start() == s.left_center() || route.start() == s.right_center());
            prop_assert!(route.end() == t.left_center() || route.end() == t.right_center());
        }
        Ok(())
    }

    fn check_vertical_offset_uses_top_bottom_midpoints(
        x: f32,
        y: f32,
        size: Size,
        gap: f32,
        upward: bool,
    ) -> Result<(), TestCaseError> {
        let dy = if upward { -gap } else { gap };
        let a = boxed("a", x, y, size);
        let b = boxed("b", x, y + dy, size);

        for (source, target) in [(&a, &b), (&b, &a)] {
            let route = route_pair(source, target);
            let (s, t) = (source.bounds(), target.bounds());
            prop_assert!(route.start() == s.top_center() || route.start() == s.bottom_center());
            prop_assert!(route.end() == t.top_center() || route.end() == t.bottom_center());
        }
        Ok(())
    }

    fn check_bow_is_capped(
        ax: f32,
        ay: f32,
        bx: f32,
        by: f32,
        size: Size,
    ) -> Result<(), TestCaseError> {
        let a = boxed("a", ax, ay, size);
        let b = boxed("b", bx, by, size);
        let route = route_pair(&a, &b);

        let config = RoutingConfig::default();
        let limit = config.curvature_cap() * config.bow_scale();
        let bow = route.bow();
        prop_assert!(bow <= limit + 1e-3, "bow {bow} exceeds {limit}");
        Ok(())
    }

    proptest! {
        #[test]
        fn horizontal_offset_uses_side_midpoints(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            size in size(),
            gap in 1.0f32..1000.0,
            leftward in any::<bool>(),
        ) {
            check_horizontal_offset_uses_side_midpoints(x, y, size, gap, leftward)?;
        }

        #[test]
        fn vertical_offset_uses_top_bottom_midpoints(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            size in size(),
            gap in 1.0f32..1000.0,
            upward in any::<bool>(),
        ) {
            check_vertical_offset_uses_top_bottom_midpoints(x, y, size, gap, upward)?;
        }

        #[test]
        fn bow_is_capped(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
            size in size(),
        ) {
            check_bow_is_capped(ax, ay, bx, by, size)?;
        }
    }
}
