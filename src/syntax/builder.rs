//! Construction helpers for assembling node trees by hand.
//!
//! The upstream parser usually delivers trees in serialized form, but tests,
//! demos and embedders frequently need to put small trees together directly;
//! these shorthands keep that from drowning in `Rc::new(RefCell::new(..))`
//! boilerplate.

use super::ast::{ExprContext, NodeKind, NodeRef, Number};
use crate::ptr;

/// Wrap a kind into a fresh, line-less node handle.
pub fn node(kind: NodeKind) -> NodeRef {
    ptr!(kind)
}

/// Wrap a kind into a node that remembers the source line it started on.
pub fn node_at(kind: NodeKind, line: u32) -> NodeRef {
    let node = ptr!(kind);
    node.borrow_mut().line = Some(line);
    node
}

pub fn module(body: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Module { body })
}

/// A name in load context.
pub fn name(id: &str) -> NodeRef {
    node(NodeKind::Name {
        id: id.to_string(),
        ctx: ExprContext::Load,
    })
}

/// A name in store context, for assignment and loop targets.
pub fn store(id: &str) -> NodeRef {
    node(NodeKind::Name {
        id: id.to_string(),
        ctx: ExprContext::Store,
    })
}

pub fn int(n: i64) -> NodeRef {
    node(NodeKind::Num {
        n: Number::Int(n),
    })
}

pub fn string(s: &str) -> NodeRef {
    node(NodeKind::Str { s: s.to_string() })
}

/// An expression statement.
pub fn expr(value: NodeRef) -> NodeRef {
    node(NodeKind::Expr { value })
}

pub fn assign(targets: Vec<NodeRef>, value: NodeRef) -> NodeRef {
    node(NodeKind::Assign { targets, value })
}

pub fn pass() -> NodeRef {
    node(NodeKind::Pass)
}

/// A call with positional arguments only.
pub fn call(func: NodeRef, args: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Call {
        func,
        args,
        keywords: Vec::new(),
        starargs: None,
        kwargs: None,
    })
}

pub fn alias(name: &str, asname: Option<&str>) -> NodeRef {
    node(NodeKind::Alias {
        name: name.to_string(),
        asname: asname.map(str::to_string),
    })
}

/// A parameter list without keyword-only parameters.
pub fn arguments(
    args: Vec<NodeRef>,
    defaults: Vec<NodeRef>,
    vararg: Option<&str>,
    kwarg: Option<&str>,
) -> NodeRef {
    node(NodeKind::Arguments {
        args,
        defaults,
        vararg: vararg.map(str::to_string),
        kwonlyargs: Vec::new(),
        kw_defaults: Vec::new(),
        kwarg: kwarg.map(str::to_string),
    })
}

/// An empty parameter list.
pub fn no_arguments() -> NodeRef {
    arguments(Vec::new(), Vec::new(), None, None)
}

/// A single `for .. in .. [if ..]` comprehension clause.
pub fn comprehension(target: NodeRef, iter: NodeRef, ifs: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Comprehension { target, iter, ifs })
}
