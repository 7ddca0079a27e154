//! In-memory dependency graph model adapted from the DOT abstract syntax.
//!
//! [`DepGraph`] owns the nodes and edges of one parsed DOT graph and is the
//! single mutable value threaded through trimming and styling. Parsing and
//! serialization are delegated to [`graphviz_rust`] and [`dot_structures`];
//! this module only converts between their statement list and a model with
//! string identifiers and ordered attribute maps.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph as DotGraph, Id, Node as DotNode, NodeId, Stmt,
    Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use indexmap::IndexMap;
use log::warn;

/// A directed dependency graph with nodes, edges, and pass-through statements.
///
/// Node and edge statement order from the input is preserved. Graph-level
/// statements that the model does not interpret (subgraphs, global attribute
/// statements) are carried through serialization untouched.
#[derive(Debug, Clone)]
pub struct DepGraph {
    id: Id,
    strict: bool,
    directed: bool,
    globals: Vec<Stmt>,
    nodes: IndexMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
}

/// A declared node: identifier plus an ordered attribute map.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: String,
    attributes: IndexMap<String, String>,
}

/// A directed edge between two node identifiers, with its own attributes.
///
/// Multiple edges may share the same endpoint pair; they are not deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    source: String,
    destination: String,
    attributes: IndexMap<String, String>,
}

impl DepGraph {
    /// Parse DOT source text into a graph model.
    ///
    /// Edge chains (`a -> b -> c`) are expanded into their constituent pairs.
    /// Duplicate node declarations are merged, later attributes winning per
    /// key. Edges with subgraph endpoints cannot be represented and are
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the parser's error message when the source is not valid DOT.
    pub fn from_dot_source(source: &str) -> Result<Self, String> {
        let parsed = graphviz_rust::parse(source)?;

        let (id, strict, directed, stmts) = match parsed {
            DotGraph::DiGraph { id, strict, stmts } => (id, strict, true, stmts),
            DotGraph::Graph { id, strict, stmts } => (id, strict, false, stmts),
        };

        let mut graph = Self {
            id,
            strict,
            directed,
            globals: Vec::new(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        };

        for stmt in stmts {
            match stmt {
                Stmt::Node(node) => graph.insert_node(node),
                Stmt::Edge(edge) => graph.insert_edge(edge),
                other => graph.globals.push(other),
            }
        }

        Ok(graph)
    }

    /// Serialize the model back to DOT text.
    pub fn to_dot_string(&self) -> String {
        self.to_dot_graph().print(&mut PrinterContext::default())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GraphNode> {
        self.nodes.values_mut()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut GraphEdge> {
        self.edges.iter_mut()
    }

    /// Keep only nodes satisfying the predicate; returns how many were removed.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&GraphNode) -> bool) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| keep(node));
        before - self.nodes.len()
    }

    /// Keep only edges satisfying the predicate; returns how many were removed.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(&GraphEdge) -> bool) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| keep(edge));
        before - self.edges.len()
    }

    fn insert_node(&mut self, node: DotNode) {
        let id = id_text(&node.id.0);
        let entry = self
            .nodes
            .entry(id.clone())
            .or_insert_with(|| GraphNode::new(id));
        for Attribute(key, value) in node.attributes {
            entry.attributes.insert(id_text(&key), id_text(&value));
        }
    }

    fn insert_edge(&mut self, edge: DotEdge) {
        let attributes: IndexMap<String, String> = edge
            .attributes
            .iter()
            .map(|Attribute(key, value)| (id_text(key), id_text(value)))
            .collect();

        let vertices = match edge.ty {
            EdgeTy::Pair(a, b) => vec![a, b],
            EdgeTy::Chain(chain) => chain,
        };

        let mut endpoints = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            match vertex {
                Vertex::N(node_id) => endpoints.push(id_text(&node_id.0)),
                Vertex::S(_) => {
                    warn!("Dropping edge with subgraph endpoint");
                    return;
                }
            }
        }

        for pair in endpoints.windows(2) {
            self.edges.push(GraphEdge {
                source: pair[0].clone(),
                destination: pair[1].clone(),
                attributes: attributes.clone(),
            });
        }
    }

    fn to_dot_graph(&self) -> DotGraph {
        let mut stmts = self.globals.clone();

        for node in self.nodes.values() {
            stmts.push(Stmt::Node(DotNode {
                id: NodeId(to_id(&node.id), None),
                attributes: to_attributes(&node.attributes),
            }));
        }

        for edge in &self.edges {
            stmts.push(Stmt::Edge(DotEdge {
                ty: EdgeTy::Pair(
                    Vertex::N(NodeId(to_id(&edge.source), None)),
                    Vertex::N(NodeId(to_id(&edge.destination), None)),
                ),
                attributes: to_attributes(&edge.attributes),
            }));
        }

        if self.directed {
            DotGraph::DiGraph {
                id: self.id.clone(),
                strict: self.strict,
                stmts,
            }
        } else {
            DotGraph::Graph {
                id: self.id.clone(),
                strict: self.strict,
                stmts,
            }
        }
    }
}

impl GraphNode {
    fn new(id: String) -> Self {
        Self {
            id,
            attributes: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `label` attribute, or `""` when the node has none.
    ///
    /// Matching always operates on the attribute; Graphviz itself falls back
    /// to the node id for display, so the model does not duplicate that.
    pub fn label(&self) -> &str {
        self.attribute("label").unwrap_or("")
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Append a flag to the comma-separated `style` attribute if not present.
    pub fn add_style(&mut self, flag: &str) {
        let styles = self.attributes.entry("style".to_string()).or_default();
        if styles.split(',').any(|existing| existing.trim() == flag) {
            return;
        }
        if !styles.is_empty() {
            styles.push(',');
        }
        styles.push_str(flag);
    }
}

impl GraphEdge {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }
}

/// Unquote and unescape a DOT identifier into plain text.
fn id_text(id: &Id) -> String {
    match id {
        Id::Plain(text) | Id::Anonymous(text) | Id::Html(text) => text.clone(),
        Id::Escaped(quoted) => {
            let inner = quoted
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(quoted);
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}

/// Quote a text value back into a DOT identifier when required.
fn to_id(text: &str) -> Id {
    if is_plain_identifier(text) || is_numeral(text) {
        Id::Plain(text.to_string())
    } else {
        let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
        Id::Escaped(format!("\"{escaped}\""))
    }
}

fn to_attributes(attributes: &IndexMap<String, String>) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|(key, value)| Attribute(to_id(key), to_id(value)))
        .collect()
}

fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || digits == "." {
        return false;
    }
    let mut seen_dot = false;
    digits.chars().all(|c| {
        if c == '.' && !seen_dot {
            seen_dot = true;
            true
        } else {
            c.is_ascii_digit()
        }
    })
}
