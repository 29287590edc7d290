//! Mermaid rendering of control-flow graphs, for debugging and snapshot tests.
use std::fmt::{self, Display};

use ecma_ast::Ranged;
use ecma_index::Idx;

use super::block::Node;
use super::graph::{Cfg, ControlFlowGraph, Edge};

/// The node shapes a control-flow graph is drawn with.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum MermaidNodeShape {
    /// A basic block.
    #[default]
    Rectangle,
    /// The end node.
    Circle,
}

impl MermaidNodeShape {
    fn open_close(self) -> (&'static str, &'static str) {
        match self {
            Self::Rectangle => ("[", "]"),
            Self::Circle => ("((", "))"),
        }
    }
}

pub struct MermaidNode {
    shape: MermaidNodeShape,
    content: String,
}

impl MermaidNode {
    pub fn with_content(content: String) -> Self {
        Self::new(MermaidNodeShape::default(), content)
    }

    pub fn new(shape: MermaidNodeShape, content: String) -> Self {
        Self { shape, content }
    }

    /// Writes `value` with the characters Mermaid treats specially replaced by
    /// entity codes.
    fn mermaid_write_quoted_str(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
        for c in value.chars() {
            match c {
                '"' => f.write_str("#quot;")?,
                '<' => f.write_str("#lt;")?,
                '>' => f.write_str("#gt;")?,
                '\n' => f.write_str("<br/>")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

impl Display for MermaidNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.shape.open_close();
        write!(f, "{open}\"")?;
        if self.content.is_empty() {
            write!(f, "empty")?;
        } else {
            MermaidNode::mermaid_write_quoted_str(f, &self.content)?;
        }
        write!(f, "\"{close}")
    }
}

/// An arrow, with an optional label.
#[derive(Debug, Default)]
pub struct MermaidEdge {
    label: String,
}

impl MermaidEdge {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Display for MermaidEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            f.write_str("-->")
        } else {
            write!(f, "-->|\"{}\"|", self.label)
        }
    }
}

pub trait MermaidGraph {
    type Node: Copy;

    /// All nodes, in drawing order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// The position of `node` in [`MermaidGraph::nodes`].
    fn node_index(&self, node: Self::Node) -> usize;

    fn draw_node(&self, node: Self::Node) -> MermaidNode;

    fn draw_edges(&self, node: Self::Node) -> Vec<(Self::Node, MermaidEdge)>;

    fn draw_graph(&self) -> String {
        let mut graph = Vec::new();

        // Begin mermaid graph.
        graph.push("flowchart TD".to_string());

        let nodes = self.nodes();
        for (idx, node) in nodes.iter().enumerate() {
            graph.push(format!("    node{idx}{}", self.draw_node(*node)));
        }

        for (idx, node) in nodes.iter().enumerate() {
            graph.extend(self.draw_edges(*node).into_iter().map(|(target, edge)| {
                format!("    node{idx}{edge}node{}", self.node_index(target))
            }));
        }
        graph.join("\n")
    }
}

/// A graph paired with the source it was built from, so blocks can show their code.
pub struct CfgWithSource<'a> {
    cfg: &'a Cfg<'a>,
    source: &'a str,
}

impl<'a> CfgWithSource<'a> {
    pub fn new(cfg: &'a Cfg<'a>, source: &'a str) -> Self {
        Self { cfg, source }
    }
}

impl MermaidGraph for CfgWithSource<'_> {
    type Node = Node;

    fn nodes(&self) -> Vec<Node> {
        self.cfg
            .block_ids()
            .map(Node::Block)
            .chain(std::iter::once(Node::End))
            .collect()
    }

    fn node_index(&self, node: Node) -> usize {
        match node {
            Node::Block(block) => block.index(),
            Node::End => self.cfg.num_blocks(),
        }
    }

    fn draw_node(&self, node: Node) -> MermaidNode {
        let Node::Block(block) = node else {
            return MermaidNode::new(MermaidNodeShape::Circle, "End".to_string());
        };
        let elements: Vec<&str> = self
            .cfg
            .elements(block)
            .iter()
            .map(|element| &self.source[element.range()])
            .collect();
        MermaidNode::with_content(elements.join("\n"))
    }

    fn draw_edges(&self, node: Node) -> Vec<(Node, MermaidEdge)> {
        let Node::Block(block) = node else {
            return Vec::new();
        };
        match self.cfg.edge(block) {
            Edge::Always(target) => vec![(target, MermaidEdge::default())],
            Edge::Branch { on_true, on_false } if on_true == on_false => {
                vec![(on_true, MermaidEdge::default())]
            }
            Edge::Branch { on_true, on_false } => vec![
                (on_true, MermaidEdge::labeled("true")),
                (on_false, MermaidEdge::labeled("false")),
            ],
        }
    }
}

impl Cfg<'_> {
    /// Renders the graph as a Mermaid flowchart, labeling blocks with their code.
    pub fn to_mermaid(&self, source: &str) -> String {
        CfgWithSource::new(self, source).draw_graph()
    }
}

#[cfg(test)]
mod tests {
    use ecma_parser::parse_script;

    use super::{MermaidEdge, MermaidNode, MermaidNodeShape};
    use crate::cfg::build_cfg;

    #[test]
    fn shapes_and_arrows() {
        assert_eq!(
            MermaidNode::with_content("a <b>".to_string()).to_string(),
            "[\"a #lt;b#gt;\"]"
        );
        assert_eq!(
            MermaidNode::new(MermaidNodeShape::Circle, "End".to_string()).to_string(),
            "((\"End\"))"
        );
        assert_eq!(MermaidEdge::default().to_string(), "-->");
        assert_eq!(MermaidEdge::labeled("true").to_string(), "-->|\"true\"|");
    }

    fn draw(source: &str) -> String {
        let script = parse_script(source).unwrap();
        let cfg = build_cfg(&script.body).unwrap();
        cfg.to_mermaid(source)
    }

    #[test]
    fn if_statement() {
        insta::assert_snapshot!(draw("if (a) { foo(); }"), @r#"
        flowchart TD
            node0["a"]
            node1["foo()"]
            node2(("End"))
            node0-->|"true"|node1
            node0-->|"false"|node2
            node1-->node2
        "#);
    }

    #[test]
    fn while_loop_with_escapes() {
        insta::assert_snapshot!(draw("i = 0; while (i < 10) { log(\"step\"); i++; }"), @r#"
        flowchart TD
            node0["i = 0"]
            node1["i #lt; 10"]
            node2["log(#quot;step#quot;)<br/>i++"]
            node3(("End"))
            node0-->node1
            node1-->|"true"|node2
            node1-->|"false"|node3
            node2-->node1
        "#);
    }

    #[test]
    fn branch_with_single_target() {
        insta::assert_snapshot!(draw("if (a) {} b();"), @r#"
        flowchart TD
            node0["a"]
            node1["b()"]
            node2(("End"))
            node0-->node1
            node1-->node2
        "#);
    }

    #[test]
    fn empty_body() {
        insta::assert_snapshot!(draw(""), @r#"
        flowchart TD
            node0(("End"))
        "#);
    }
}
