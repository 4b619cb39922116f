//! Rendering node trees as directed graphs.
//!
//! Every tree node becomes one vertex, labeled with the canonical rendering
//! of the node's own scalar fields; every parent link contributes one edge
//! labeled with its field descriptor. The tree must have been run through
//! `syntax::annotate::annotate_parents` first, otherwise no edges could be
//! labeled. The result can be queried by vertex/edge id or serialized to
//! Graphviz DOT and rendered to PDF for debugging a faulty tree.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::rc::Rc;

use crate::codegen::{bytes_repr, str_repr};
use crate::error::AstError;
use crate::syntax::ast::{Node as AstNode, NodeKind, NodeRef};
use crate::visualize::graph::{Edge, Graph, Node};

pub mod graph;

/// Build the labeled graph for an annotated tree.
pub fn build_graph(root: &NodeRef) -> Result<Graph, AstError> {
    let mut visualizer = Visualizer::new("ast");
    visualizer.visualize(root)?;
    Ok(visualizer.graph)
}

/// Stable vertex id derived from node identity. Two structurally equal
/// nodes are still two distinct vertices.
pub fn dot_id(node: &NodeRef) -> String {
    format!("node{:x}", Rc::as_ptr(node) as usize)
}

pub struct Visualizer {
    /// Graph that will be filled.
    pub graph: Graph,
    /// Identities already turned into vertices.
    seen: HashSet<*const RefCell<AstNode>>,
}

impl Visualizer {
    pub fn new(graph_name: &str) -> Self {
        Self {
            graph: Graph::new(graph_name, true),
            seen: HashSet::new(),
        }
    }

    /// Add vertices and edges for every node reachable from `root`.
    pub fn visualize(&mut self, root: &NodeRef) -> Result<(), AstError> {
        self.visit(root)
    }

    fn visit(&mut self, node: &NodeRef) -> Result<(), AstError> {
        if !self.seen.insert(Rc::as_ptr(node)) {
            return Ok(());
        }
        let id = dot_id(node);
        self.graph
            .add_node(Node::new(&id, Some(&node_label(node))));
        // One incoming edge per parent link; an aliased node gets several.
        for link in &node.borrow().parents {
            let parent = link.parent.upgrade().ok_or_else(|| {
                AstError::malformed("parent link points at a dropped node")
            })?;
            self.graph
                .add_edge(Edge::new(&dot_id(&parent), &id, true).with_label(&link.describe()));
        }
        let children = node.borrow().kind.children();
        for (_, _, child) in children {
            if child.borrow().parents.is_empty() {
                return Err(AstError::NotAnnotated {
                    construct: child.borrow().kind.kind_name(),
                });
            }
            self.visit(&child)?;
        }
        Ok(())
    }

    pub fn write_to_dot(&self, outfile: &str) -> io::Result<()> {
        let mut buf = String::new();
        self.graph.as_dot(&mut buf).unwrap();
        fs::write(outfile, buf)
    }

    /// Render the graph to PDF. Requires the Graphviz `dot` binary.
    pub fn write_to_pdf(&self, outfile: &str) -> io::Result<()> {
        let mut buf = String::new();
        self.graph.as_dot(&mut buf).unwrap();

        let mut dot = Command::new("dot")
            .arg("-Tpdf")
            .arg("-o")
            .arg(outfile)
            .stdin(Stdio::piped())
            .spawn()?;
        let mut stdin = dot.stdin.take().expect("stdin was configured as piped");
        stdin.write_all(buf.as_bytes())?;
        drop(stdin);
        let status = dot.wait()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("dot exited with {}", status),
            ));
        }
        Ok(())
    }
}

fn opt_repr(value: &Option<String>) -> String {
    match value {
        Some(value) => str_repr(value),
        None => "None".to_string(),
    }
}

fn list_repr(values: &[String]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| str_repr(v)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Canonical `Kind(field=value, ...)` rendering of a node's own scalar
/// fields. Child nodes never appear here; they become vertices of their
/// own. Enum-like tags render as `Tag()`.
pub fn node_label(node: &NodeRef) -> String {
    let borrowed = node.borrow();
    match &borrowed.kind {
        NodeKind::FunctionDef { name, .. } => format!("FunctionDef(name={})", str_repr(name)),
        NodeKind::ClassDef { name, .. } => format!("ClassDef(name={})", str_repr(name)),
        NodeKind::AugAssign { op, .. } => format!("AugAssign(op={:?}())", op),
        NodeKind::ImportFrom { module, level, .. } => {
            format!("ImportFrom(module={}, level={})", opt_repr(module), level)
        }
        NodeKind::Global { names } => format!("Global(names={})", list_repr(names)),
        NodeKind::Nonlocal { names } => format!("Nonlocal(names={})", list_repr(names)),
        NodeKind::BoolOp { op, .. } => format!("BoolOp(op={:?}())", op),
        NodeKind::BinOp { op, .. } => format!("BinOp(op={:?}())", op),
        NodeKind::UnaryOp { op, .. } => format!("UnaryOp(op={:?}())", op),
        NodeKind::Compare { ops, .. } => {
            let rendered: Vec<String> = ops.iter().map(|op| format!("{:?}()", op)).collect();
            format!("Compare(ops=[{}])", rendered.join(", "))
        }
        NodeKind::Num { n } => format!("Num(n={})", n),
        NodeKind::Str { s } => format!("Str(s={})", str_repr(s)),
        NodeKind::Bytes { s } => format!("Bytes(s={})", bytes_repr(s)),
        NodeKind::NameConstant { value } => format!("NameConstant(value={})", value),
        NodeKind::Attribute { attr, ctx, .. } => {
            format!("Attribute(attr={}, ctx={:?}())", str_repr(attr), ctx)
        }
        NodeKind::Subscript { ctx, .. } => format!("Subscript(ctx={:?}())", ctx),
        NodeKind::Starred { ctx, .. } => format!("Starred(ctx={:?}())", ctx),
        NodeKind::Name { id, ctx } => format!("Name(id={}, ctx={:?}())", str_repr(id), ctx),
        NodeKind::List { ctx, .. } => format!("List(ctx={:?}())", ctx),
        NodeKind::Tuple { ctx, .. } => format!("Tuple(ctx={:?}())", ctx),
        NodeKind::Arguments { vararg, kwarg, .. } => format!(
            "Arguments(vararg={}, kwarg={})",
            opt_repr(vararg),
            opt_repr(kwarg)
        ),
        NodeKind::Keyword { arg, .. } => format!("Keyword(arg={})", str_repr(arg)),
        NodeKind::Alias { name, asname } => {
            format!("Alias(name={}, asname={})", str_repr(name), opt_repr(asname))
        }
        NodeKind::ExceptHandler { name, .. } => format!("ExceptHandler(name={})", opt_repr(name)),
        kind => format!("{}()", kind.kind_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::syntax::annotate::annotate_parents;
    use crate::syntax::builder::{assign, expr, int, module, name, store};

    #[test]
    fn test_has_edge() {
        let stmt = assign(vec![store("x")], int(1));
        let root = annotate_parents(&module(vec![Rc::clone(&stmt)]));

        let graph = build_graph(&root).unwrap();

        assert!(graph.get_edge(&dot_id(&root), &dot_id(&stmt)).is_some());
    }

    #[test]
    fn test_does_not_have_edge() {
        let value = int(1);
        let stmt = assign(vec![store("x")], Rc::clone(&value));
        let root = annotate_parents(&module(vec![stmt]));

        let graph = build_graph(&root).unwrap();

        assert!(graph.get_edge(&dot_id(&root), &dot_id(&value)).is_none());
    }

    #[test]
    fn test_edge_label() {
        let stmt = assign(vec![store("x")], int(1));
        let root = annotate_parents(&module(vec![Rc::clone(&stmt)]));

        let graph = build_graph(&root).unwrap();

        let edge = graph.get_edge(&dot_id(&root), &dot_id(&stmt)).unwrap();
        assert_eq!(edge.label(), Some("body[0]"));
    }

    #[test]
    fn test_node_label() {
        let value = int(1);
        let stmt = assign(vec![store("x")], Rc::clone(&value));
        let root = annotate_parents(&module(vec![stmt]));

        let graph = build_graph(&root).unwrap();

        let vertex = graph.get_node(&dot_id(&value)).unwrap();
        assert_eq!(vertex.label(), Some("Num(n=1)"));
    }

    #[test]
    fn test_multi_parents_node_label() {
        let first_target = store("x");
        let root = annotate_parents(&module(vec![
            assign(vec![Rc::clone(&first_target)], int(1)),
            assign(vec![store("x")], int(2)),
        ]));

        let graph = build_graph(&root).unwrap();

        let vertex = graph.get_node(&dot_id(&first_target)).unwrap();
        assert_eq!(vertex.label(), Some("Name(id='x', ctx=Store())"));
        // Each assignment owns its own target node, so identical labels
        // still mean two distinct vertices.
        let stores = graph
            .nodes()
            .iter()
            .filter(|node| node.label() == Some("Name(id='x', ctx=Store())"))
            .count();
        assert_eq!(stores, 2);
    }

    #[test]
    fn test_aliased_subtree_is_one_vertex_with_two_edges() {
        let shared = name("y");
        let root = annotate_parents(&module(vec![
            assign(vec![store("x")], Rc::clone(&shared)),
            expr(Rc::clone(&shared)),
        ]));

        let graph = build_graph(&root).unwrap();

        let vertices = graph
            .nodes()
            .iter()
            .filter(|node| node.label() == Some("Name(id='y', ctx=Load())"))
            .count();
        assert_eq!(vertices, 1);
        assert_eq!(graph.edges_into(&dot_id(&shared)).len(), 2);
    }

    #[test]
    fn test_unannotated_tree_is_rejected() {
        let root = module(vec![assign(vec![store("x")], int(1))]);
        let err = build_graph(&root).unwrap_err();
        assert!(matches!(err, AstError::NotAnnotated { .. }));
    }

    #[test]
    fn test_dot_output() {
        let root = annotate_parents(&module(vec![assign(vec![store("x")], int(1))]));
        let mut visualizer = Visualizer::new("g");
        visualizer.visualize(&root).unwrap();

        let mut buf = String::new();
        visualizer.graph.as_dot(&mut buf).unwrap();
        assert!(buf.starts_with("digraph g {"));
        assert!(buf.contains("label=\"Module()\""));
        assert!(buf.contains("label=\"body[0]\""));
    }
}
