//! GraphML output with the yFiles extensions understood by yEd.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use petgraph::visit::EdgeRef;

use crate::error::Result;
use crate::trust_graph::TrustGraph;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:y="http://www.yworks.com/xml/graphml" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd">
  <key for="node" id="d0" yfiles.type="nodegraphics"/>
  <key for="edge" id="d1" yfiles.type="edgegraphics"/>
  <graph edgedefault="directed" id="G">
"#;

const FOOTER: &str = "  </graph>\n</graphml>\n";

pub fn export_to_graphml(graph: &TrustGraph, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_graphml(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_graphml<W: Write>(graph: &TrustGraph, out: &mut W) -> Result<()> {
    out.write_all(HEADER.as_bytes())?;

    for index in graph.node_indices() {
        let node = &graph[index];
        writeln!(out, "    <node id=\"n{}\">", index.index())?;
        writeln!(out, "      <data key=\"d0\">")?;
        writeln!(out, "        <y:ShapeNode>")?;
        writeln!(out, "          <y:Fill color=\"{}\" transparent=\"false\"/>", node.fill)?;
        writeln!(
            out,
            "          <y:NodeLabel alignment=\"center\" autoSizePolicy=\"content\" modelName=\"internal\" modelPosition=\"c\">{}</y:NodeLabel>",
            escape(&node.label)
        )?;
        writeln!(out, "          <y:Shape type=\"rectangle\"/>")?;
        writeln!(out, "        </y:ShapeNode>")?;
        writeln!(out, "      </data>")?;
        writeln!(out, "    </node>")?;
    }

    for edge in graph.edge_references() {
        let trust = edge.weight();
        let source_arrow = if trust.bidirectional { "standard" } else { "none" };
        writeln!(
            out,
            "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\">",
            edge.id().index(),
            edge.source().index(),
            edge.target().index()
        )?;
        writeln!(out, "      <data key=\"d1\">")?;
        writeln!(out, "        <y:PolyLineEdge>")?;
        writeln!(
            out,
            "          <y:LineStyle color=\"{}\" type=\"line\" width=\"1.0\"/>",
            trust.color.hex()
        )?;
        writeln!(out, "          <y:Arrows source=\"{}\" target=\"standard\"/>", source_arrow)?;
        writeln!(out, "        </y:PolyLineEdge>")?;
        writeln!(out, "      </data>")?;
        writeln!(out, "    </edge>")?;
    }

    out.write_all(FOOTER.as_bytes())?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
