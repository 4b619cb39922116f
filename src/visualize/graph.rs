//! Structs and functions concerned with generating graphs with Graphviz and DOT language.

use std::fmt::{self, Display};

#[derive(Debug)]
pub struct Graph {
    name: String,
    pub is_directed: bool,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: &str, is_directed: bool) -> Self {
        Graph {
            name: name.to_string(),
            is_directed,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Look up a vertex by its id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Look up the first edge between two vertex ids.
    pub fn get_edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
    }

    /// All edges arriving at the given vertex id.
    pub fn edges_into(&self, to: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|edge| edge.to == to).collect()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn as_dot<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        write!(writer, "{}", self)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let graph_type = if self.is_directed {
            "digraph"
        } else {
            "graph"
        };
        writeln!(f, "{} {} {{", graph_type, &self.name)?;
        for node in self.nodes.iter() {
            writeln!(f, "\t{}", node)?;
        }
        for edge in self.edges.iter() {
            writeln!(f, "\t{}", edge)?;
        }
        write!(f, "}}")
    }
}

/// Escape a label for use inside a double-quoted DOT string.
fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[derive(Debug)]
pub struct Node {
    id: String,
    label: Option<String>,
}

impl Node {
    pub fn new(id: &str, label: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.map(str::to_string),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label {
            Some(ref l) => write!(f, "{} [ label=\"{}\" ];", self.id, escape_label(l)),
            None => write!(f, "{};", self.id),
        }
    }
}

/// Add new nodes to a given graph by passing a node name and an optional label.
#[macro_export]
macro_rules! add_nodes {
    ($graph:ident, $($id:literal : $label:literal),+) => {
        $(
            $graph.add_node($crate::visualize::graph::Node::new($id, Some($label)));
        )+
    };
    ($graph:ident, $($id:literal),+) => {
        $($graph.add_node($crate::visualize::graph::Node::new($id, None));)+
    }
}

/// Add new edges to a given graph by passing the endpoint names and an optional label.
#[macro_export]
macro_rules! add_edges {
    ($graph:ident, $($from:literal -> $to:literal $(: $label:literal)?),+) => {
        assert!($graph.is_directed);
        $(
            let edge = $crate::visualize::graph::Edge::new($from, $to, true);
            $(let edge = edge.with_label($label);)?
            $graph.add_edge(edge);
        )+
    };
    ($graph:ident, $($from:literal -- $to:literal),+) => {
        assert!(!$graph.is_directed);
        $(
            $graph.add_edge($crate::visualize::graph::Edge::new($from, $to, false));
        )+
    }
}

#[derive(Debug)]
pub struct Edge {
    from: String,
    to: String,
    label: Option<String>,
    is_directed: bool,
}

impl Edge {
    pub fn new(from: &str, to: &str, is_directed: bool) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: None,
            is_directed,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arrow = if self.is_directed { "->" } else { "--" };
        match self.label {
            Some(ref l) => write!(
                f,
                "{} {} {} [ label=\"{}\" ];",
                self.from,
                arrow,
                self.to,
                escape_label(l)
            ),
            None => write!(f, "{} {} {};", self.from, arrow, self.to),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Edge, Graph, Node};
    use crate::add_edges;
    use crate::add_nodes;

    #[test]
    fn test_empty_graph() {
        let empty_graph = Graph::new("empty", true);
        let mut buf = String::new();
        empty_graph.as_dot(&mut buf).unwrap();

        assert_eq!(buf, "digraph empty {\n}");
    }

    #[test]
    fn test_directed_graph() {
        let mut graph = Graph::new("g", true);
        let mut buf = String::new();
        add_nodes!(
            graph,
            "node1" : "a",
            "node2" : "b",
            "node3" : "c"
        );
        add_edges!(
            graph,
            "node1" -> "node1",
            "node1" -> "node2",
            "node3" -> "node1"
        );
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "digraph g {\n\tnode1 [ label=\"a\" ];\n\tnode2 [ label=\"b\" ];\n\tnode3 [ label=\"c\" ];\
            \n\tnode1 -> node1;\n\tnode1 -> node2;\n\tnode3 -> node1;\n}"
        );
    }

    #[test]
    fn test_undirected_graph() {
        let mut graph = Graph::new("g", false);
        let mut buf = String::new();
        add_nodes!(
            graph,
            "node1" : "a",
            "node2" : "b",
            "node3" : "c"
        );
        add_edges!(
            graph,
            "node1" -- "node1",
            "node1" -- "node2",
            "node3" -- "node1"
        );
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "graph g {\n\tnode1 [ label=\"a\" ];\n\tnode2 [ label=\"b\" ];\n\tnode3 [ label=\"c\" ];\
            \n\tnode1 -- node1;\n\tnode1 -- node2;\n\tnode3 -- node1;\n}"
        );
    }

    #[test]
    fn test_labeled_edge() {
        let mut graph = Graph::new("g", true);
        add_nodes!(graph, "node1", "node2");
        add_edges!(graph, "node1" -> "node2" : "body[0]");
        let mut buf = String::new();
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "digraph g {\n\tnode1;\n\tnode2;\n\tnode1 -> node2 [ label=\"body[0]\" ];\n}"
        );
    }

    #[test]
    fn test_lookup() {
        let mut graph = Graph::new("g", true);
        graph.add_node(Node::new("node1", Some("a")));
        graph.add_node(Node::new("node2", None));
        graph.add_edge(Edge::new("node1", "node2", true).with_label("value"));

        assert_eq!(graph.get_node("node1").unwrap().label(), Some("a"));
        assert!(graph.get_node("missing").is_none());
        let edge = graph.get_edge("node1", "node2").unwrap();
        assert_eq!(edge.label(), Some("value"));
        assert!(graph.get_edge("node2", "node1").is_none());
    }

    #[test]
    fn test_label_escaping() {
        let node = Node::new("n", Some("Str(s='a\"b')"));
        assert_eq!(node.to_string(), "n [ label=\"Str(s='a\\\"b')\" ];");
    }
}
