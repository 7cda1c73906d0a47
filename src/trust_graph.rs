use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use tracing::{debug, warn};

use crate::classification::{classify, Orientation, TrustColor};
use crate::error::Result;
use crate::graphml::export_to_graphml;
use crate::trust_records::{TrustRecord, TrustRecords};

const NODE_FILL: &str = "#FFCC00";
const FALLBACK_STEM: &str = "trust";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainNode {
    pub label: String,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustEdge {
    pub color: TrustColor,
    pub bidirectional: bool,
}

pub type TrustGraph = Graph<DomainNode, TrustEdge, Directed>;

/// Non-fatal problems found while building the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustWarning {
    UnrecognizedAttributes {
        source: String,
        target: String,
        attributes: String,
    },
    UnrecognizedDirection {
        source: String,
        target: String,
        direction: String,
    },
}

impl fmt::Display for TrustWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustWarning::UnrecognizedAttributes { source, target, attributes } => write!(
                f,
                "Unrecognized trust attributes between {} and {} : {}",
                source, target, attributes
            ),
            TrustWarning::UnrecognizedDirection { source, target, direction } => write!(
                f,
                "Unrecognized relationship direction between {} and {} : {}",
                source, target, direction
            ),
        }
    }
}

/// Domain graph with one node per distinct name.
#[derive(Debug, Default)]
pub struct TrustGraphBuilder {
    graph: TrustGraph,
    nodes: HashMap<String, NodeIndex>,
    warnings: Vec<TrustWarning>,
}

impl TrustGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.node_index(name) {
            return index;
        }

        debug!(domain = name, "adding node");
        let index = self.graph.add_node(DomainNode {
            label: name.to_string(),
            fill: NODE_FILL,
        });
        self.nodes.insert(name.to_string(), index);
        index
    }

    /// Appends an edge between two names. Missing endpoints are created
    /// first so the graph never holds a dangling edge.
    pub fn add_edge(&mut self, from: &str, to: &str, color: TrustColor, bidirectional: bool) {
        debug!(from, to, %color, bidirectional, "adding edge");
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        self.graph.add_edge(from, to, TrustEdge { color, bidirectional });
    }

    pub fn add_record(&mut self, record: &TrustRecord) {
        if record.is_self_trust() {
            debug!(domain = %record.source_name, "skipping self trust");
            return;
        }

        let source = record.source_name.as_str();
        let target = record.target_name.as_str();
        debug!(
            source,
            destination = target,
            created = ?record.when_created,
            changed = ?record.when_changed,
            "trust record"
        );
        let classification = classify(
            &record.trust_type,
            &record.trust_attributes,
            &record.trust_direction,
        );

        if classification.color == TrustColor::Violet {
            warn!(source, destination = target, attributes = %record.trust_attributes, "unrecognized trust attributes");
            self.warnings.push(TrustWarning::UnrecognizedAttributes {
                source: source.to_string(),
                target: target.to_string(),
                attributes: record.trust_attributes.clone(),
            });
        }

        self.ensure_node(source);
        self.ensure_node(target);

        let bidirectional = classification.orientation == Orientation::Bidirectional;
        match classification.orientation.endpoints(source, target) {
            Some((from, to)) => self.add_edge(from, to, classification.color, bidirectional),
            None => {
                warn!(source, destination = target, direction = %record.trust_direction, "unrecognized trust direction");
                self.warnings.push(TrustWarning::UnrecognizedDirection {
                    source: source.to_string(),
                    target: target.to_string(),
                    direction: record.trust_direction.clone(),
                });
            }
        }
    }

    pub fn graph(&self) -> &TrustGraph {
        &self.graph
    }

    pub fn warnings(&self) -> &[TrustWarning] {
        &self.warnings
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }
}

/// Builds the graph from a stream of records, stopping at the first
/// read error.
pub fn build_graph<I>(records: I) -> Result<TrustGraphBuilder>
where
    I: IntoIterator<Item = Result<TrustRecord>>,
{
    let mut builder = TrustGraphBuilder::new();
    let mut rows = 0usize;
    for record in records {
        builder.add_record(&record?);
        rows += 1;
    }

    debug!(
        rows,
        nodes = builder.graph.node_count(),
        edges = builder.graph.edge_count(),
        "trust graph built"
    );
    Ok(builder)
}

/// `<stem>.graphml`, ignoring the directory the input lives in.
pub fn output_file_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    PathBuf::from(format!("{}.graphml", stem))
}

#[derive(Debug)]
pub struct Summary {
    pub output: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub warnings: Vec<TrustWarning>,
}

/// Converts `input` into a GraphML file in the working directory.
pub fn run(input: &Path) -> Result<Summary> {
    run_in(input, Path::new(""))
}

pub fn run_in(input: &Path, output_dir: &Path) -> Result<Summary> {
    let builder = build_graph(TrustRecords::open(input)?)?;

    let output = output_dir.join(output_file_name(input));
    export_to_graphml(builder.graph(), &output)?;

    Ok(Summary {
        output,
        nodes: builder.graph.node_count(),
        edges: builder.graph.edge_count(),
        warnings: builder.warnings,
    })
}
