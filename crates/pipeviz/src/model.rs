//! Diagram data model.
//!
//! A [`Diagram`] is the immutable input of the system: the node set, the
//! edge list, the business-mode side table and the background regions. Only
//! node positions change at runtime, and those live in the
//! [`DiagramController`](crate::controller::DiagramController).

use std::{collections::HashMap, fmt};

use pipeviz_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

/// Reserved identifier of the synthetic merge point that source edges fan into.
pub const CONVERGENCE_ID: &str = "convergence";

/// Presentational category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Source,
    Process,
    Storage,
    Ai,
    Output,
    Consumer,
    Feedback,
    Observability,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Process => "process",
            Self::Storage => "storage",
            Self::Ai => "ai",
            Self::Output => "output",
            Self::Consumer => "consumer",
            Self::Feedback => "feedback",
            Self::Observability => "observability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A box on the diagram.
///
/// The size is fixed at construction. The position is the top-left corner
/// and is the only field that changes while the diagram is in use.
///
/// # Examples
///
/// ```
/// # use pipeviz::model::{Category, Node};
/// # use pipeviz::geometry::{Point, Size};
/// let node = Node::new("kb", "Central Knowledge Base", Category::Storage)
///     .with_position(Point::new(580.0, 130.0))
///     .with_size(Size::new(200.0, 130.0))
///     .with_description(["(vector + relational store)"]);
///
/// assert_eq!(node.bounds().center(), Point::new(680.0, 195.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    label: String,
    description: Vec<String>,
    position: Point,
    size: Size,
    category: Category,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: Vec::new(),
            position: Point::default(),
            size: Size::default(),
            category,
        }
    }

    pub fn with_description<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The technical label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The technical description lines, in display order.
    pub fn description(&self) -> &[String] {
        &self.description
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Box occupied by the node at its current position.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// One end of an [`Edge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// A node, referenced by identifier. The node may not exist.
    Node(String),
    /// The fixed convergence point.
    Convergence,
}

impl Endpoint {
    /// Interprets an identifier, mapping [`CONVERGENCE_ID`] to [`Endpoint::Convergence`].
    pub fn from_id(id: &str) -> Self {
        if id == CONVERGENCE_ID {
            Self::Convergence
        } else {
            Self::Node(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Node(id) => id,
            Self::Convergence => CONVERGENCE_ID,
        }
    }

    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Line style tag of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

/// A directed connection between two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Endpoint,
    to: Endpoint,
    label: Option<String>,
    style: EdgeStyle,
}

impl Edge {
    /// Creates a solid, unlabeled edge. Either id may be [`CONVERGENCE_ID`].
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Endpoint::from_id(from),
            to: Endpoint::from_id(to),
            label: None,
            style: EdgeStyle::Solid,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self) -> Self {
        self.style = EdgeStyle::Dashed;
        self
    }

    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }
}

/// Plain-language alternate content shown when a node is in business mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessInfo {
    label: String,
    explanation: String,
}

impl BusinessInfo {
    pub fn new(label: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            explanation: explanation.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// The label and description lines a node currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    pub label: String,
    pub description: Vec<String>,
}

impl DisplayContent {
    /// Technical content of a node.
    pub fn technical(node: &Node) -> Self {
        Self {
            label: node.label().to_string(),
            description: node.description().to_vec(),
        }
    }

    /// Business content of a node.
    ///
    /// A leading icon token of the technical label (a first word with no
    /// alphanumeric characters, typically an emoji) is kept in front of the
    /// business label. The description becomes the single explanation line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pipeviz::model::{BusinessInfo, Category, DisplayContent, Node};
    /// let node = Node::new("kb", "🗄️ Central Knowledge Base", Category::Storage);
    /// let info = BusinessInfo::new("Enterprise Knowledge Graph", "Consolidates intelligence.");
    ///
    /// let content = DisplayContent::business(&node, &info);
    /// assert_eq!(content.label, "🗄️ Enterprise Knowledge Graph");
    /// assert_eq!(content.description, vec!["Consolidates intelligence.".to_string()]);
    /// ```
    pub fn business(node: &Node, info: &BusinessInfo) -> Self {
        let label = match leading_icon(node.label()) {
            Some(icon) => format!("{icon} {}", info.label()),
            None => info.label().to_string(),
        };

        Self {
            label,
            description: vec![info.explanation().to_string()],
        }
    }
}

fn leading_icon(label: &str) -> Option<&str> {
    let first = label.split_whitespace().next()?;
    let is_icon = first
        .chars()
        .all(|c| !c.is_alphanumeric() && !c.is_ascii_punctuation());
    (is_icon && first != label.trim()).then_some(first)
}

/// A translucent background area grouping related nodes.
#[derive(Debug, Clone)]
pub struct Region {
    label: String,
    bounds: Bounds,
    color: Color,
    dashed: bool,
}

impl Region {
    pub fn new(label: impl Into<String>, bounds: Bounds, color: Color) -> Self {
        Self {
            label: label.into(),
            bounds,
            color,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_dashed(&self) -> bool {
        self.dashed
    }
}

/// Complete static input of a diagram.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    business: HashMap<String, BusinessInfo>,
    regions: Vec<Region>,
}

impl Diagram {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            business: HashMap::new(),
            regions: Vec::new(),
        }
    }

    pub fn with_business_info(mut self, id: impl Into<String>, info: BusinessInfo) -> Self {
        self.business.insert(id.into(), info);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn business(&self) -> &HashMap<String, BusinessInfo> {
        &self.business
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<Node>,
        Vec<Edge>,
        HashMap<String, BusinessInfo>,
        Vec<Region>,
    ) {
        (self.nodes, self.edges, self.business, self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str) -> Node {
        Node::new("n", label, Category::Process).with_description(["line one", "line two"])
    }

    #[test]
    fn test_endpoint_from_id() {
        assert_eq!(Endpoint::from_id("convergence"), Endpoint::Convergence);
        assert_eq!(Endpoint::from_id("kb"), Endpoint::Node("kb".to_string()));
        assert_eq!(Endpoint::Convergence.id(), CONVERGENCE_ID);
        assert!(Edge::new("src1", "convergence").to().is_convergence());
    }

    #[test]
    fn test_edge_builder() {
        let edge = Edge::new("report", "summaries")
            .with_label("review")
            .dashed();
        assert_eq!(edge.from().id(), "report");
        assert_eq!(edge.label(), Some("review"));
        assert_eq!(edge.style(), EdgeStyle::Dashed);
        assert_eq!(Edge::new("a", "b").style(), EdgeStyle::Solid);
    }

    #[test]
    fn test_node_bounds_follow_position() {
        let mut node = node("box").with_size(Size::new(100.0, 50.0));
        node.set_position(Point::new(-20.0, 10.0));
        assert_eq!(node.bounds().min_point(), Point::new(-20.0, 10.0));
        assert_eq!(node.bounds().to_size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_technical_content() {
        let content = DisplayContent::technical(&node("📊 LLM Ingestion"));
        assert_eq!(content.label, "📊 LLM Ingestion");
        assert_eq!(content.description.len(), 2);
    }

    #[test]
    fn test_business_content_keeps_icon() {
        let info = BusinessInfo::new("Smart Data Ingestion", "Structures data.");
        let content = DisplayContent::business(&node("📊 LLM Ingestion"), &info);
        assert_eq!(content.label, "📊 Smart Data Ingestion");
        assert_eq!(content.description, vec!["Structures data.".to_string()]);
    }

    #[test]
    fn test_business_content_without_icon() {
        let info = BusinessInfo::new("Trust Layer", "Ensures quality.");

        let plain = DisplayContent::business(&node("Raw Data Lake"), &info);
        assert_eq!(plain.label, "Trust Layer");

        let punctuated = DisplayContent::business(&node("(draft) notes"), &info);
        assert_eq!(punctuated.label, "Trust Layer");

        let icon_only = DisplayContent::business(&node("📊"), &info);
        assert_eq!(icon_only.label, "Trust Layer");
    }
}
