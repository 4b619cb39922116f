//! Abstract syntax tree datastructures.
//! In here are all datastructures needed for representing Python programs
//! as node trees, as handed over by an external parser.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Shared handle to a tree node. Sharing is deliberate: the same subtree
/// object may sit under two parents at once (e.g. a value aliased by a
/// multi-target assignment), and the annotator mutates nodes in place.
pub type NodeRef = Rc<RefCell<Node>>;

/// A single tree node: its construct kind, optional source-line
/// provenance, and the parent links attached by the annotation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Line the construct started on in the original source, when the
    /// upstream parser retained it. Drives blank-line reproduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Filled in by `annotate::annotate_parents`; more than one entry
    /// means the node is aliased under several parents.
    #[serde(skip)]
    pub parents: Vec<ParentLink>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            line: None,
            parents: Vec::new(),
        }
    }
}

/// Where a node sits within its parent: the owning node, the field name
/// and, for sequence-valued fields, the index within the sequence.
#[derive(Debug, Clone)]
pub struct ParentLink {
    pub parent: Weak<RefCell<Node>>,
    pub field: &'static str,
    pub index: Option<usize>,
}

impl ParentLink {
    /// Render the field descriptor, e.g. `value` or `body[0]`.
    pub fn describe(&self) -> String {
        match self.index {
            Some(i) => format!("{}[{}]", self.field, i),
            None => self.field.to_string(),
        }
    }
}

/// Basic nodes of which the AST consists, one variant per syntactic
/// construct. The field set of every kind is fixed; a field is either a
/// scalar (identifier, operator tag, literal value), a child node, an
/// optional child or an ordered sequence of children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    // Module level
    Module {
        body: Vec<NodeRef>,
    },

    // Statements
    FunctionDef {
        name: String,
        args: NodeRef,
        body: Vec<NodeRef>,
        decorator_list: Vec<NodeRef>,
    },
    ClassDef {
        name: String,
        bases: Vec<NodeRef>,
        keywords: Vec<NodeRef>,
        starargs: Option<NodeRef>,
        kwargs: Option<NodeRef>,
        body: Vec<NodeRef>,
        decorator_list: Vec<NodeRef>,
    },
    Return {
        value: Option<NodeRef>,
    },
    Delete {
        targets: Vec<NodeRef>,
    },
    Assign {
        targets: Vec<NodeRef>,
        value: NodeRef,
    },
    AugAssign {
        target: NodeRef,
        op: BinOpKind,
        value: NodeRef,
    },
    For {
        target: NodeRef,
        iter: NodeRef,
        body: Vec<NodeRef>,
        orelse: Vec<NodeRef>,
    },
    While {
        test: NodeRef,
        body: Vec<NodeRef>,
        orelse: Vec<NodeRef>,
    },
    If {
        test: NodeRef,
        body: Vec<NodeRef>,
        orelse: Vec<NodeRef>,
    },
    With {
        items: Vec<NodeRef>,
        body: Vec<NodeRef>,
    },
    Raise {
        exc: Option<NodeRef>,
        cause: Option<NodeRef>,
        value: Option<NodeRef>,
        traceback: Option<NodeRef>,
    },
    Try {
        body: Vec<NodeRef>,
        handlers: Vec<NodeRef>,
        orelse: Vec<NodeRef>,
        finalbody: Vec<NodeRef>,
    },
    Assert {
        test: NodeRef,
        msg: Option<NodeRef>,
    },
    Import {
        names: Vec<NodeRef>,
    },
    ImportFrom {
        module: Option<String>,
        names: Vec<NodeRef>,
        /// Count of leading dots; 0 means an absolute import.
        level: u32,
    },
    Global {
        names: Vec<String>,
    },
    Nonlocal {
        names: Vec<String>,
    },
    Expr {
        value: NodeRef,
    },
    Pass,
    Break,
    Continue,

    // Expressions
    BoolOp {
        op: BoolOpKind,
        values: Vec<NodeRef>,
    },
    BinOp {
        left: NodeRef,
        op: BinOpKind,
        right: NodeRef,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: NodeRef,
    },
    Lambda {
        args: NodeRef,
        body: NodeRef,
    },
    IfExp {
        test: NodeRef,
        body: NodeRef,
        orelse: NodeRef,
    },
    Dict {
        keys: Vec<NodeRef>,
        values: Vec<NodeRef>,
    },
    Set {
        elts: Vec<NodeRef>,
    },
    ListComp {
        elt: NodeRef,
        generators: Vec<NodeRef>,
    },
    SetComp {
        elt: NodeRef,
        generators: Vec<NodeRef>,
    },
    DictComp {
        key: NodeRef,
        value: NodeRef,
        generators: Vec<NodeRef>,
    },
    GeneratorExp {
        elt: NodeRef,
        generators: Vec<NodeRef>,
    },
    Yield {
        value: Option<NodeRef>,
    },
    YieldFrom {
        value: NodeRef,
    },
    Compare {
        left: NodeRef,
        ops: Vec<CmpOpKind>,
        comparators: Vec<NodeRef>,
    },
    Call {
        func: NodeRef,
        args: Vec<NodeRef>,
        keywords: Vec<NodeRef>,
        starargs: Option<NodeRef>,
        kwargs: Option<NodeRef>,
    },
    Num {
        n: Number,
    },
    Str {
        s: String,
    },
    Bytes {
        s: Vec<u8>,
    },
    NameConstant {
        value: Singleton,
    },
    Ellipsis,
    Attribute {
        value: NodeRef,
        attr: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    Subscript {
        value: NodeRef,
        slice: NodeRef,
        #[serde(default)]
        ctx: ExprContext,
    },
    Starred {
        value: NodeRef,
        #[serde(default)]
        ctx: ExprContext,
    },
    Name {
        id: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    List {
        elts: Vec<NodeRef>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Tuple {
        elts: Vec<NodeRef>,
        #[serde(default)]
        ctx: ExprContext,
    },

    // Subscript slices
    Index {
        value: NodeRef,
    },
    Slice {
        lower: Option<NodeRef>,
        upper: Option<NodeRef>,
        step: Option<NodeRef>,
    },
    ExtSlice {
        dims: Vec<NodeRef>,
    },

    // Auxiliary kinds that only occur inside their host construct
    Arguments {
        args: Vec<NodeRef>,
        defaults: Vec<NodeRef>,
        vararg: Option<String>,
        kwonlyargs: Vec<NodeRef>,
        kw_defaults: Vec<Option<NodeRef>>,
        kwarg: Option<String>,
    },
    Keyword {
        arg: String,
        value: NodeRef,
    },
    Alias {
        name: String,
        asname: Option<String>,
    },
    Comprehension {
        target: NodeRef,
        iter: NodeRef,
        ifs: Vec<NodeRef>,
    },
    ExceptHandler {
        typ: Option<NodeRef>,
        name: Option<String>,
        body: Vec<NodeRef>,
    },
    WithItem {
        context_expr: NodeRef,
        optional_vars: Option<NodeRef>,
    },
}

fn one(out: &mut Vec<(&'static str, Option<usize>, NodeRef)>, field: &'static str, node: &NodeRef) {
    out.push((field, None, Rc::clone(node)));
}

fn opt(
    out: &mut Vec<(&'static str, Option<usize>, NodeRef)>,
    field: &'static str,
    node: &Option<NodeRef>,
) {
    if let Some(node) = node {
        out.push((field, None, Rc::clone(node)));
    }
}

fn seq(out: &mut Vec<(&'static str, Option<usize>, NodeRef)>, field: &'static str, nodes: &[NodeRef]) {
    for (i, node) in nodes.iter().enumerate() {
        out.push((field, Some(i), Rc::clone(node)));
    }
}

impl NodeKind {
    /// Enumerate the child nodes together with the field descriptor by
    /// which each one is reached, in declared field order. Scalar fields
    /// do not appear; optional fields appear only when present.
    pub fn children(&self) -> Vec<(&'static str, Option<usize>, NodeRef)> {
        let mut out = Vec::new();
        match self {
            NodeKind::Module { body } => seq(&mut out, "body", body),
            NodeKind::FunctionDef {
                args,
                body,
                decorator_list,
                ..
            } => {
                one(&mut out, "args", args);
                seq(&mut out, "body", body);
                seq(&mut out, "decorator_list", decorator_list);
            }
            NodeKind::ClassDef {
                bases,
                keywords,
                starargs,
                kwargs,
                body,
                decorator_list,
                ..
            } => {
                seq(&mut out, "bases", bases);
                seq(&mut out, "keywords", keywords);
                opt(&mut out, "starargs", starargs);
                opt(&mut out, "kwargs", kwargs);
                seq(&mut out, "body", body);
                seq(&mut out, "decorator_list", decorator_list);
            }
            NodeKind::Return { value } => opt(&mut out, "value", value),
            NodeKind::Delete { targets } => seq(&mut out, "targets", targets),
            NodeKind::Assign { targets, value } => {
                seq(&mut out, "targets", targets);
                one(&mut out, "value", value);
            }
            NodeKind::AugAssign { target, value, .. } => {
                one(&mut out, "target", target);
                one(&mut out, "value", value);
            }
            NodeKind::For {
                target,
                iter,
                body,
                orelse,
            } => {
                one(&mut out, "target", target);
                one(&mut out, "iter", iter);
                seq(&mut out, "body", body);
                seq(&mut out, "orelse", orelse);
            }
            NodeKind::While { test, body, orelse } | NodeKind::If { test, body, orelse } => {
                one(&mut out, "test", test);
                seq(&mut out, "body", body);
                seq(&mut out, "orelse", orelse);
            }
            NodeKind::With { items, body } => {
                seq(&mut out, "items", items);
                seq(&mut out, "body", body);
            }
            NodeKind::Raise {
                exc,
                cause,
                value,
                traceback,
            } => {
                opt(&mut out, "exc", exc);
                opt(&mut out, "cause", cause);
                opt(&mut out, "value", value);
                opt(&mut out, "traceback", traceback);
            }
            NodeKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
            } => {
                seq(&mut out, "body", body);
                seq(&mut out, "handlers", handlers);
                seq(&mut out, "orelse", orelse);
                seq(&mut out, "finalbody", finalbody);
            }
            NodeKind::Assert { test, msg } => {
                one(&mut out, "test", test);
                opt(&mut out, "msg", msg);
            }
            NodeKind::Import { names } => seq(&mut out, "names", names),
            NodeKind::ImportFrom { names, .. } => seq(&mut out, "names", names),
            NodeKind::Global { .. } | NodeKind::Nonlocal { .. } => {}
            NodeKind::Expr { value } => one(&mut out, "value", value),
            NodeKind::Pass | NodeKind::Break | NodeKind::Continue => {}
            NodeKind::BoolOp { values, .. } => seq(&mut out, "values", values),
            NodeKind::BinOp { left, right, .. } => {
                one(&mut out, "left", left);
                one(&mut out, "right", right);
            }
            NodeKind::UnaryOp { operand, .. } => one(&mut out, "operand", operand),
            NodeKind::Lambda { args, body } => {
                one(&mut out, "args", args);
                one(&mut out, "body", body);
            }
            NodeKind::IfExp { test, body, orelse } => {
                one(&mut out, "test", test);
                one(&mut out, "body", body);
                one(&mut out, "orelse", orelse);
            }
            NodeKind::Dict { keys, values } => {
                seq(&mut out, "keys", keys);
                seq(&mut out, "values", values);
            }
            NodeKind::Set { elts } => seq(&mut out, "elts", elts),
            NodeKind::ListComp { elt, generators }
            | NodeKind::SetComp { elt, generators }
            | NodeKind::GeneratorExp { elt, generators } => {
                one(&mut out, "elt", elt);
                seq(&mut out, "generators", generators);
            }
            NodeKind::DictComp {
                key,
                value,
                generators,
            } => {
                one(&mut out, "key", key);
                one(&mut out, "value", value);
                seq(&mut out, "generators", generators);
            }
            NodeKind::Yield { value } => opt(&mut out, "value", value),
            NodeKind::YieldFrom { value } => one(&mut out, "value", value),
            NodeKind::Compare {
                left, comparators, ..
            } => {
                one(&mut out, "left", left);
                seq(&mut out, "comparators", comparators);
            }
            NodeKind::Call {
                func,
                args,
                keywords,
                starargs,
                kwargs,
            } => {
                one(&mut out, "func", func);
                seq(&mut out, "args", args);
                seq(&mut out, "keywords", keywords);
                opt(&mut out, "starargs", starargs);
                opt(&mut out, "kwargs", kwargs);
            }
            NodeKind::Num { .. }
            | NodeKind::Str { .. }
            | NodeKind::Bytes { .. }
            | NodeKind::NameConstant { .. }
            | NodeKind::Ellipsis
            | NodeKind::Name { .. } => {}
            NodeKind::Attribute { value, .. } => one(&mut out, "value", value),
            NodeKind::Subscript { value, slice, .. } => {
                one(&mut out, "value", value);
                one(&mut out, "slice", slice);
            }
            NodeKind::Starred { value, .. } => one(&mut out, "value", value),
            NodeKind::List { elts, .. } | NodeKind::Tuple { elts, .. } => {
                seq(&mut out, "elts", elts)
            }
            NodeKind::Index { value } => one(&mut out, "value", value),
            NodeKind::Slice { lower, upper, step } => {
                opt(&mut out, "lower", lower);
                opt(&mut out, "upper", upper);
                opt(&mut out, "step", step);
            }
            NodeKind::ExtSlice { dims } => seq(&mut out, "dims", dims),
            NodeKind::Arguments {
                args,
                defaults,
                kwonlyargs,
                kw_defaults,
                ..
            } => {
                seq(&mut out, "args", args);
                seq(&mut out, "defaults", defaults);
                seq(&mut out, "kwonlyargs", kwonlyargs);
                for (i, default) in kw_defaults.iter().enumerate() {
                    if let Some(default) = default {
                        out.push(("kw_defaults", Some(i), Rc::clone(default)));
                    }
                }
            }
            NodeKind::Keyword { value, .. } => one(&mut out, "value", value),
            NodeKind::Alias { .. } => {}
            NodeKind::Comprehension { target, iter, ifs } => {
                one(&mut out, "target", target);
                one(&mut out, "iter", iter);
                seq(&mut out, "ifs", ifs);
            }
            NodeKind::ExceptHandler { typ, body, .. } => {
                opt(&mut out, "type", typ);
                seq(&mut out, "body", body);
            }
            NodeKind::WithItem {
                context_expr,
                optional_vars,
            } => {
                one(&mut out, "context_expr", context_expr);
                opt(&mut out, "optional_vars", optional_vars);
            }
        }
        out
    }

    /// Name of the construct, for error messages and vertex labels.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Module { .. } => "Module",
            NodeKind::FunctionDef { .. } => "FunctionDef",
            NodeKind::ClassDef { .. } => "ClassDef",
            NodeKind::Return { .. } => "Return",
            NodeKind::Delete { .. } => "Delete",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::AugAssign { .. } => "AugAssign",
            NodeKind::For { .. } => "For",
            NodeKind::While { .. } => "While",
            NodeKind::If { .. } => "If",
            NodeKind::With { .. } => "With",
            NodeKind::Raise { .. } => "Raise",
            NodeKind::Try { .. } => "Try",
            NodeKind::Assert { .. } => "Assert",
            NodeKind::Import { .. } => "Import",
            NodeKind::ImportFrom { .. } => "ImportFrom",
            NodeKind::Global { .. } => "Global",
            NodeKind::Nonlocal { .. } => "Nonlocal",
            NodeKind::Expr { .. } => "Expr",
            NodeKind::Pass => "Pass",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::BoolOp { .. } => "BoolOp",
            NodeKind::BinOp { .. } => "BinOp",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::Lambda { .. } => "Lambda",
            NodeKind::IfExp { .. } => "IfExp",
            NodeKind::Dict { .. } => "Dict",
            NodeKind::Set { .. } => "Set",
            NodeKind::ListComp { .. } => "ListComp",
            NodeKind::SetComp { .. } => "SetComp",
            NodeKind::DictComp { .. } => "DictComp",
            NodeKind::GeneratorExp { .. } => "GeneratorExp",
            NodeKind::Yield { .. } => "Yield",
            NodeKind::YieldFrom { .. } => "YieldFrom",
            NodeKind::Compare { .. } => "Compare",
            NodeKind::Call { .. } => "Call",
            NodeKind::Num { .. } => "Num",
            NodeKind::Str { .. } => "Str",
            NodeKind::Bytes { .. } => "Bytes",
            NodeKind::NameConstant { .. } => "NameConstant",
            NodeKind::Ellipsis => "Ellipsis",
            NodeKind::Attribute { .. } => "Attribute",
            NodeKind::Subscript { .. } => "Subscript",
            NodeKind::Starred { .. } => "Starred",
            NodeKind::Name { .. } => "Name",
            NodeKind::List { .. } => "List",
            NodeKind::Tuple { .. } => "Tuple",
            NodeKind::Index { .. } => "Index",
            NodeKind::Slice { .. } => "Slice",
            NodeKind::ExtSlice { .. } => "ExtSlice",
            NodeKind::Arguments { .. } => "Arguments",
            NodeKind::Keyword { .. } => "Keyword",
            NodeKind::Alias { .. } => "Alias",
            NodeKind::Comprehension { .. } => "Comprehension",
            NodeKind::ExceptHandler { .. } => "ExceptHandler",
            NodeKind::WithItem { .. } => "WithItem",
        }
    }

    /// True for kinds that stand on their own line(s) inside a body.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDef { .. }
                | NodeKind::ClassDef { .. }
                | NodeKind::Return { .. }
                | NodeKind::Delete { .. }
                | NodeKind::Assign { .. }
                | NodeKind::AugAssign { .. }
                | NodeKind::For { .. }
                | NodeKind::While { .. }
                | NodeKind::If { .. }
                | NodeKind::With { .. }
                | NodeKind::Raise { .. }
                | NodeKind::Try { .. }
                | NodeKind::Assert { .. }
                | NodeKind::Import { .. }
                | NodeKind::ImportFrom { .. }
                | NodeKind::Global { .. }
                | NodeKind::Nonlocal { .. }
                | NodeKind::Expr { .. }
                | NodeKind::Pass
                | NodeKind::Break
                | NodeKind::Continue
        )
    }

    /// True for kinds that can occur in expression position.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::BoolOp { .. }
                | NodeKind::BinOp { .. }
                | NodeKind::UnaryOp { .. }
                | NodeKind::Lambda { .. }
                | NodeKind::IfExp { .. }
                | NodeKind::Dict { .. }
                | NodeKind::Set { .. }
                | NodeKind::ListComp { .. }
                | NodeKind::SetComp { .. }
                | NodeKind::DictComp { .. }
                | NodeKind::GeneratorExp { .. }
                | NodeKind::Yield { .. }
                | NodeKind::YieldFrom { .. }
                | NodeKind::Compare { .. }
                | NodeKind::Call { .. }
                | NodeKind::Num { .. }
                | NodeKind::Str { .. }
                | NodeKind::Bytes { .. }
                | NodeKind::NameConstant { .. }
                | NodeKind::Ellipsis
                | NodeKind::Attribute { .. }
                | NodeKind::Subscript { .. }
                | NodeKind::Starred { .. }
                | NodeKind::Name { .. }
                | NodeKind::List { .. }
                | NodeKind::Tuple { .. }
        )
    }
}

/// Numeric literal value. Untagged so that a JSON `1` or `2.5` maps
/// directly onto the right variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => {
                // Python renders float-valued integers as e.g. `1.0`.
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

/// The `True`/`False`/`None` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Singleton {
    True,
    False,
    None,
}

impl fmt::Display for Singleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Singleton::True => write!(f, "True"),
            Singleton::False => write!(f, "False"),
            Singleton::None => write!(f, "None"),
        }
    }
}

/// Load/store/delete context tag carried by reference-like expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

impl Default for ExprContext {
    fn default() -> Self {
        ExprContext::Load
    }
}

/// Binary operator tags, shared with augmented assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOpKind {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mult => "*",
            BinOpKind::MatMult => "@",
            BinOpKind::Div => "/",
            BinOpKind::Mod => "%",
            BinOpKind::Pow => "**",
            BinOpKind::LShift => "<<",
            BinOpKind::RShift => ">>",
            BinOpKind::BitOr => "|",
            BinOpKind::BitXor => "^",
            BinOpKind::BitAnd => "&",
            BinOpKind::FloorDiv => "//",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOpKind {
    And,
    Or,
}

impl BoolOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BoolOpKind::And => "and",
            BoolOpKind::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOpKind {
    Invert,
    Not,
    UAdd,
    USub,
}

impl UnaryOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOpKind::Invert => "~",
            UnaryOpKind::Not => "not",
            UnaryOpKind::UAdd => "+",
            UnaryOpKind::USub => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOpKind {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOpKind::Eq => "==",
            CmpOpKind::NotEq => "!=",
            CmpOpKind::Lt => "<",
            CmpOpKind::LtE => "<=",
            CmpOpKind::Gt => ">",
            CmpOpKind::GtE => ">=",
            CmpOpKind::Is => "is",
            CmpOpKind::IsNot => "is not",
            CmpOpKind::In => "in",
            CmpOpKind::NotIn => "not in",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builder;

    #[test]
    fn test_children_follow_declared_field_order() {
        let node = builder::node(NodeKind::For {
            target: builder::store("x"),
            iter: builder::name("y"),
            body: vec![builder::node(NodeKind::Pass)],
            orelse: vec![builder::node(NodeKind::Pass)],
        });
        let fields: Vec<(&str, Option<usize>)> = node
            .borrow()
            .kind
            .children()
            .iter()
            .map(|(field, index, _)| (*field, *index))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("target", None),
                ("iter", None),
                ("body", Some(0)),
                ("orelse", Some(0)),
            ]
        );
    }

    #[test]
    fn test_optional_fields_are_skipped_when_absent() {
        let node = builder::node(NodeKind::Return { value: None });
        assert!(node.borrow().kind.children().is_empty());
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(BinOpKind::FloorDiv.symbol(), "//");
        assert_eq!(CmpOpKind::IsNot.symbol(), "is not");
        assert_eq!(UnaryOpKind::Not.symbol(), "not");
        assert_eq!(BoolOpKind::Or.symbol(), "or");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(Number::Int(1).to_string(), "1");
        assert_eq!(Number::Int(-3).to_string(), "-3");
        assert_eq!(Number::Float(2.5).to_string(), "2.5");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
    }
}
