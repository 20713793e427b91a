//! Integration tests for the public rendering and interaction API.

use pipeviz::{
    config::{AppConfig, InteractionConfig},
    controller::{DiagramController, Effect, FixedSurface, PointerEvent},
    dataset,
    geometry::Point,
    model::{Category, Diagram, Edge, Node},
    routing::{self, RouteKind},
};

fn pipeline() -> DiagramController {
    DiagramController::new(dataset::pipeline(), InteractionConfig::default())
}

fn click(controller: &mut DiagramController, node: &str, at: Point) -> Vec<Effect> {
    let surface = FixedSurface(Point::default());
    controller.handle_event(
        PointerEvent::Down {
            node: node.to_string(),
            position: at,
        },
        &surface,
    );
    controller.handle_event(
        PointerEvent::Up {
            node: Some(node.to_string()),
            position: at,
        },
        &surface,
    )
}

#[test]
fn test_render_default_pipeline() {
    let svg = pipeviz::render_svg(&pipeline(), &AppConfig::default()).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Knowledge"));
    assert!(svg.contains("extract/ELT"));
}

#[test]
fn test_business_mode_changes_rendered_text() {
    let mut controller = pipeline();
    click(&mut controller, "ingestion", Point::new(300.0, 120.0));

    let svg = pipeviz::render_svg(&controller, &AppConfig::default()).expect("Failed to render");
    // Labels wrap inside the box, so look for single words.
    assert!(svg.contains("Smart"));
    assert!(svg.contains("Automatically"));
    assert!(!svg.contains("schema mapping"));
}

#[test]
fn test_toggle_round_trip_restores_content() {
    let mut controller = pipeline();
    let before = controller.display("kb");

    click(&mut controller, "kb", Point::new(600.0, 150.0));
    assert_ne!(controller.display("kb"), before);
    assert_eq!(
        controller.display("kb").unwrap().label,
        "🗄️ Enterprise Knowledge Graph"
    );

    click(&mut controller, "kb", Point::new(600.0, 150.0));
    assert_eq!(controller.display("kb"), before);
}

#[test]
fn test_node_without_business_info_stays_technical() {
    let mut controller = pipeline();
    let effects = click(&mut controller, "raw", Point::new(40.0, 570.0));

    assert!(!controller.is_business("raw"));
    assert!(matches!(effects[0], Effect::Noop(_)));
    assert_eq!(controller.display("raw").unwrap().label, "Raw Data Lake");
}

#[test]
fn test_convergence_edges_ignore_source_position() {
    let mut controller = pipeline();
    let config = AppConfig::default();
    let surface = FixedSurface(Point::new(15.0, 40.0));

    controller.handle_event(
        PointerEvent::Down {
            node: "src4".to_string(),
            position: Point::new(60.0, 330.0),
        },
        &surface,
    );
    controller.handle_event(
        PointerEvent::Move {
            position: Point::new(-400.0, 900.0),
        },
        &surface,
    );
    controller.handle_event(PointerEvent::Leave, &surface);

    let fan_in: Vec<_> = controller
        .edges()
        .iter()
        .filter_map(|edge| routing::route(edge, |id| controller.node(id), config.routing()))
        .filter(|route| route.kind() == RouteKind::FanIn)
        .collect();

    assert_eq!(fan_in.len(), 7);
    for route in &fan_in {
        assert_eq!(route.end(), Point::new(205.0, 300.0));
        assert!(route.is_dashed());
    }

    let moved = controller.node("src4").unwrap();
    assert!(
        fan_in
            .iter()
            .any(|route| route.start() == moved.bounds().right_center())
    );
}

#[test]
fn test_custom_diagram_with_dangling_edge() {
    let diagram = Diagram::new(
        vec![Node::new("only", "Only", Category::Output)],
        vec![Edge::new("only", "missing"), Edge::new("missing", "only")],
    );
    let controller = DiagramController::new(diagram, InteractionConfig::default());

    let svg = pipeviz::render_svg(&controller, &AppConfig::default()).expect("Failed to render");
    assert!(!svg.contains("data-from="));
    assert!(svg.contains("data-node-id=\"only\""));
}
