//! The built-in data/AI reporting pipeline.
//!
//! Sources feed a convergence point that continues into ingestion, which
//! fills the knowledge base. The agent retrieves from the knowledge base to
//! populate reports for operators, and reviewed reports flow back into the
//! knowledge base through the learning loop.

use pipeviz_core::geometry::{Bounds, Point, Size};

use crate::{
    model::{BusinessInfo, Category, Diagram, Edge, Node, Region},
    render::css,
};

/// Width and height of the surface the pipeline is laid out on.
pub const SURFACE_SIZE: Size = Size::new(1200.0, 700.0);

const SOURCES: [&str; 7] = [
    "🎮 Game Key Metrics",
    "💳 Payment / Billing",
    "🎫 CS Tickets",
    "📱 Social Performance",
    "📰 News & Events",
    "📈 Promotion / Growth",
    "📣 Marketing / Campaign",
];

/// Builds the complete pipeline diagram.
///
/// # Examples
///
/// ```
/// let diagram = pipeviz::dataset::pipeline();
/// assert_eq!(diagram.nodes().len(), 17);
/// assert!(diagram.business().contains_key("kb"));
/// ```
pub fn pipeline() -> Diagram {
    let diagram = Diagram::new(nodes(), edges());

    business_table()
        .into_iter()
        .fold(diagram, |diagram, (id, info)| {
            diagram.with_business_info(id, info)
        })
        .with_region(
            Region::new(
                "Data Sources",
                Bounds::new_from_top_left(Point::new(20.0, 75.0), Size::new(150.0, 585.0)),
                css("#f59e0b"),
            )
            .dashed(),
        )
        .with_region(Region::new(
            "Intelligent Automation",
            Bounds::new_from_top_left(Point::new(210.0, 75.0), Size::new(630.0, 563.0)),
            css("#a855f7"),
        ))
}

fn node(id: &str, label: &str, category: Category, (x, y, w, h): (f32, f32, f32, f32)) -> Node {
    Node::new(id, label, category)
        .with_position(Point::new(x, y))
        .with_size(Size::new(w, h))
}

fn nodes() -> Vec<Node> {
    let sources = SOURCES.iter().enumerate().map(|(idx, label)| {
        let y = 80.0 + 65.0 * idx as f32;
        node(
            &format!("src{}", idx + 1),
            label,
            Category::Source,
            (30.0, y, 130.0, 55.0),
        )
    });

    let rest = [
        node(
            "raw",
            "Raw Data Lake",
            Category::Storage,
            (30.0, 560.0, 130.0, 60.0),
        )
        .with_description(["(immutable, auditable)"]),
        node(
            "ingestion",
            "📊 LLM Ingestion & Normalization",
            Category::Process,
            (260.0, 90.0, 160.0, 100.0),
        )
        .with_description([
            "- schema mapping",
            "- entity linking (Game, Player, Campaign)",
            "- quality checks",
        ]),
        node(
            "observability",
            "🔍 Observability & Lineage",
            Category::Observability,
            (330.0, 245.0, 150.0, 75.0),
        )
        .with_description(["(validations, freshness, drift)"]),
        node(
            "kb",
            "🗄️ Central Knowledge Base",
            Category::Storage,
            (580.0, 130.0, 200.0, 130.0),
        )
        .with_description([
            "(vector + relational store)",
            "- facts, metrics, events",
            "- embeddings + citations",
        ]),
        node(
            "trigger",
            "📋 Orchestrator Trigger",
            Category::Process,
            (280.0, 380.0, 155.0, 85.0),
        )
        .with_description(["(Report Template + Game ID + Period)"]),
        node(
            "agent",
            "🤖 AI Agent (LLM)",
            Category::Ai,
            (580.0, 375.0, 190.0, 110.0),
        )
        .with_description([
            "retrieves context from KB",
            "fills template, writes narrative",
        ]),
        node(
            "guardrails",
            "🛡️ Guardrails & Governance",
            Category::Observability,
            (590.0, 530.0, 160.0, 80.0),
        )
        .with_description(["(PII handling, approvals, prompts)"]),
        node(
            "report",
            "📄 Generated Report",
            Category::Output,
            (880.0, 380.0, 140.0, 75.0),
        )
        .with_description(["(Charts, tables, narrative)"]),
        node(
            "operators",
            "👥 Game Ops/PM/Marketing",
            Category::Consumer,
            (1180.0, 380.0, 140.0, 80.0),
        )
        .with_description(["making decision"]),
        node(
            "summaries",
            "📈 KB Ingestion Hub (auto + human-in-the-loop)",
            Category::Consumer,
            (930.0, 90.0, 165.0, 105.0),
        )
        .with_description(["(change logs, highlights, annotations)"]),
    ];

    sources.chain(rest).collect()
}

fn edges() -> Vec<Edge> {
    let fan_in =
        (1..=SOURCES.len()).map(|idx| Edge::new(&format!("src{idx}"), "convergence").dashed());

    let rest = [
        Edge::new("convergence", "ingestion")
            .with_label("extract/ELT")
            .dashed(),
        Edge::new("raw", "ingestion")
            .with_label("batch/stream")
            .dashed(),
        Edge::new("ingestion", "kb").with_label("structured facts + embeddings"),
        Edge::new("ingestion", "observability").dashed(),
        Edge::new("kb", "agent").with_label("RAG retrieval"),
        Edge::new("trigger", "agent").with_label("flow starts"),
        Edge::new("agent", "report").with_label("populate template"),
        Edge::new("agent", "guardrails").dashed(),
        Edge::new("report", "operators").with_label("consume"),
        Edge::new("report", "summaries")
            .with_label("review")
            .dashed(),
        Edge::new("summaries", "kb")
            .with_label("store as knowledge")
            .dashed(),
    ];

    fan_in.chain(rest).collect()
}

fn business_table() -> Vec<(&'static str, BusinessInfo)> {
    vec![
        (
            "ingestion",
            BusinessInfo::new(
                "Smart Data Ingestion",
                "📥 Automatically structures and validates data across systems.",
            ),
        ),
        (
            "kb",
            BusinessInfo::new(
                "Enterprise Knowledge Graph",
                "🧠 Consolidates all company intelligence: metrics, history, and learnings.",
            ),
        ),
        (
            "agent",
            BusinessInfo::new(
                "AI Report Assistant",
                "🟢 Understands goals, pulls data, and generates reports.",
            ),
        ),
        (
            "trigger",
            BusinessInfo::new(
                "Automated Workflow (RPA)",
                "⚙️ Kicks off report generation based on templates or schedules.",
            ),
        ),
        (
            "summaries",
            BusinessInfo::new(
                "Learning Loop",
                "🔁 Feedback enriches the knowledge base, so the AI gets smarter over time.",
            ),
        ),
        (
            "observability",
            BusinessInfo::new(
                "Trust & Quality Layer",
                "✅ Ensures every report is accurate, timely, and traceable.",
            ),
        ),
    ]
}
