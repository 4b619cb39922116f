//! Source code regeneration.
//!
//! Walks a node tree depth-first and emits Python source text, one rendering
//! rule per construct kind. The only configurable aspect is the string
//! written per indentation level; keyword and operator spacing are fixed, so
//! the output is always in the canonical style that re-parses to an
//! equivalent tree.

use std::rc::Rc;

use crate::error::AstError;
use crate::syntax::ast::{NodeKind, NodeRef};

type CodegenResult = Result<(), AstError>;

/// Regenerate source text for the tree rooted at `root`, indenting each
/// block level with `indent_with`.
///
/// Accepts a `Module`, a single statement or a single expression as root.
/// The tree is not mutated and needs no parent annotation.
pub fn to_source(root: &NodeRef, indent_with: &str) -> Result<String, AstError> {
    let mut generator = SourceGenerator::new(indent_with);
    generator.visit_root(root)?;
    Ok(generator.result)
}

/// Python `repr` of a string literal, canonicalized to single quotes.
pub(crate) fn str_repr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Python `repr` of a bytes literal.
pub(crate) fn bytes_repr(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push('\'');
    out
}

/// Line-buffered emitter: per-kind rules call `write`, which first flushes
/// any pending line breaks plus the current indentation.
struct SourceGenerator<'a> {
    result: String,
    indent_with: &'a str,
    indentation: usize,
    /// Line breaks owed before the next `write`.
    new_lines: usize,
    /// Output line the emitter is currently on, 1-based, used to re-create
    /// blank lines for nodes that kept their source line numbers.
    line: u32,
}

impl<'a> SourceGenerator<'a> {
    fn new(indent_with: &'a str) -> Self {
        Self {
            result: String::new(),
            indent_with,
            indentation: 0,
            new_lines: 0,
            line: 1,
        }
    }

    //-------
    // EMISSION
    //-------

    fn write(&mut self, text: &str) {
        if self.new_lines > 0 {
            for _ in 0..self.new_lines {
                self.result.push('\n');
            }
            self.line += self.new_lines as u32;
            for _ in 0..self.indentation {
                self.result.push_str(self.indent_with);
            }
            self.new_lines = 0;
        }
        self.result.push_str(text);
    }

    /// Schedule the line break that precedes a statement. When the node
    /// kept its source line number, the gap to the current output line is
    /// reproduced, which regenerates blank lines; otherwise a single break
    /// is used (none before the very first piece of output).
    fn newline(&mut self, node: &NodeRef) {
        let wanted = match node.borrow().line {
            Some(line) if line > self.line => (line - self.line) as usize,
            _ => {
                if self.result.is_empty() {
                    0
                } else {
                    1
                }
            }
        };
        self.new_lines = self.new_lines.max(wanted);
    }

    /// Line break with no provenance, for `else:`/`finally:` and friends.
    fn break_line(&mut self) {
        if !self.result.is_empty() {
            self.new_lines = self.new_lines.max(1);
        }
    }

    /// Emit an indented statement block. Python cannot express an empty
    /// suite, so an empty list renders a `pass` placeholder.
    fn body(&mut self, statements: &[NodeRef]) -> CodegenResult {
        self.indentation += 1;
        if statements.is_empty() {
            self.break_line();
            self.write("pass");
        } else {
            for statement in statements {
                self.visit_stmt(statement)?;
            }
        }
        self.indentation -= 1;
        Ok(())
    }

    fn else_body(&mut self, orelse: &[NodeRef]) -> CodegenResult {
        if !orelse.is_empty() {
            self.break_line();
            self.write("else:");
            self.body(orelse)?;
        }
        Ok(())
    }

    fn comma_separated(&mut self, nodes: &[NodeRef]) -> CodegenResult {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.visit_expr(node)?;
        }
        Ok(())
    }

    //-------
    // DISPATCH
    //-------

    fn visit_root(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::Module { body } => {
                for statement in body {
                    self.visit_stmt(statement)?;
                }
                Ok(())
            }
            kind if kind.is_statement() => self.visit_stmt(node),
            kind if kind.is_expression() => self.visit_expr(node),
            kind => Err(AstError::UnsupportedConstruct {
                construct: kind.kind_name(),
            }),
        }
    }

    fn visit_stmt(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::FunctionDef {
                name,
                args,
                body,
                decorator_list,
            } => {
                self.decorators(decorator_list)?;
                self.newline(node);
                self.write("def ");
                self.write(name);
                self.write("(");
                self.signature(args)?;
                self.write("):");
                self.body(body)
            }
            NodeKind::ClassDef {
                name,
                bases,
                keywords,
                starargs,
                kwargs,
                body,
                decorator_list,
            } => {
                self.decorators(decorator_list)?;
                self.newline(node);
                self.write("class ");
                self.write(name);
                let mut have_args = false;
                for base in bases {
                    self.paren_or_comma(&mut have_args);
                    self.visit_expr(base)?;
                }
                for keyword in keywords {
                    self.paren_or_comma(&mut have_args);
                    self.visit_keyword(keyword)?;
                }
                if let Some(starargs) = starargs {
                    self.paren_or_comma(&mut have_args);
                    self.write("*");
                    self.visit_expr(starargs)?;
                }
                if let Some(kwargs) = kwargs {
                    self.paren_or_comma(&mut have_args);
                    self.write("**");
                    self.visit_expr(kwargs)?;
                }
                self.write(if have_args { "):" } else { ":" });
                self.body(body)
            }
            NodeKind::Return { value } => {
                self.newline(node);
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.visit_expr(value)?;
                }
                Ok(())
            }
            NodeKind::Delete { targets } => {
                self.newline(node);
                self.write("del ");
                self.comma_separated(targets)
            }
            NodeKind::Assign { targets, value } => {
                self.newline(node);
                for target in targets {
                    self.visit_expr(target)?;
                    self.write(" = ");
                }
                self.visit_expr(value)
            }
            NodeKind::AugAssign { target, op, value } => {
                self.newline(node);
                self.visit_expr(target)?;
                self.write(" ");
                self.write(op.symbol());
                self.write("= ");
                self.visit_expr(value)
            }
            NodeKind::For {
                target,
                iter,
                body,
                orelse,
            } => {
                self.newline(node);
                self.write("for ");
                self.visit_expr(target)?;
                self.write(" in ");
                self.visit_expr(iter)?;
                self.write(":");
                self.body(body)?;
                self.else_body(orelse)
            }
            NodeKind::While { test, body, orelse } => {
                self.newline(node);
                self.write("while ");
                self.visit_expr(test)?;
                self.write(":");
                self.body(body)?;
                self.else_body(orelse)
            }
            NodeKind::If { test, body, orelse } => {
                self.newline(node);
                self.write("if ");
                self.visit_expr(test)?;
                self.write(":");
                self.body(body)?;
                // A nested `if` as the sole else-statement is an elif arm.
                let mut orelse = orelse.clone();
                loop {
                    let nested_if = if orelse.len() == 1 {
                        matches!(orelse[0].borrow().kind, NodeKind::If { .. })
                    } else {
                        false
                    };
                    if nested_if {
                        let nested = Rc::clone(&orelse[0]);
                        self.newline(&nested);
                        self.write("elif ");
                        let next = {
                            let inner = nested.borrow();
                            match &inner.kind {
                                NodeKind::If { test, body, orelse } => {
                                    self.visit_expr(test)?;
                                    self.write(":");
                                    self.body(body)?;
                                    orelse.clone()
                                }
                                _ => unreachable!(),
                            }
                        };
                        orelse = next;
                    } else {
                        self.else_body(&orelse)?;
                        break Ok(());
                    }
                }
            }
            NodeKind::With { items, body } => {
                if items.is_empty() {
                    return Err(AstError::malformed("with statement without context managers"));
                }
                self.newline(node);
                self.write("with ");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.visit_with_item(item)?;
                }
                self.write(":");
                self.body(body)
            }
            NodeKind::Raise {
                exc,
                cause,
                value,
                traceback,
            } => {
                self.newline(node);
                self.write("raise");
                match exc {
                    Some(exc) => {
                        self.write(" ");
                        self.visit_expr(exc)?;
                        if cause.is_some() && value.is_some() {
                            return Err(AstError::malformed(
                                "raise cannot combine a cause with the legacy value form",
                            ));
                        }
                        if let Some(cause) = cause {
                            self.write(" from ");
                            self.visit_expr(cause)?;
                        } else if let Some(value) = value {
                            self.write(", ");
                            self.visit_expr(value)?;
                            if let Some(traceback) = traceback {
                                self.write(", ");
                                self.visit_expr(traceback)?;
                            }
                        }
                        Ok(())
                    }
                    None => {
                        if cause.is_some() || value.is_some() || traceback.is_some() {
                            return Err(AstError::malformed(
                                "bare raise cannot carry a cause, value or traceback",
                            ));
                        }
                        Ok(())
                    }
                }
            }
            NodeKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
            } => {
                if handlers.is_empty() && finalbody.is_empty() {
                    return Err(AstError::malformed(
                        "try statement needs at least one except handler or a finally block",
                    ));
                }
                self.newline(node);
                self.write("try:");
                self.body(body)?;
                for handler in handlers {
                    self.visit_except_handler(handler)?;
                }
                self.else_body(orelse)?;
                if !finalbody.is_empty() {
                    self.break_line();
                    self.write("finally:");
                    self.body(finalbody)?;
                }
                Ok(())
            }
            NodeKind::Assert { test, msg } => {
                self.newline(node);
                self.write("assert ");
                self.visit_expr(test)?;
                if let Some(msg) = msg {
                    self.write(", ");
                    self.visit_expr(msg)?;
                }
                Ok(())
            }
            NodeKind::Import { names } => {
                self.newline(node);
                self.write("import ");
                self.aliases(names)
            }
            NodeKind::ImportFrom {
                module,
                names,
                level,
            } => {
                self.newline(node);
                self.write("from ");
                for _ in 0..*level {
                    self.write(".");
                }
                if let Some(module) = module {
                    self.write(module);
                }
                self.write(" import ");
                self.aliases(names)
            }
            NodeKind::Global { names } => {
                self.newline(node);
                self.write("global ");
                self.write(&names.join(", "));
                Ok(())
            }
            NodeKind::Nonlocal { names } => {
                self.newline(node);
                self.write("nonlocal ");
                self.write(&names.join(", "));
                Ok(())
            }
            NodeKind::Expr { value } => {
                self.newline(node);
                self.visit_expr(value)
            }
            NodeKind::Pass => {
                self.newline(node);
                self.write("pass");
                Ok(())
            }
            NodeKind::Break => {
                self.newline(node);
                self.write("break");
                Ok(())
            }
            NodeKind::Continue => {
                self.newline(node);
                self.write("continue");
                Ok(())
            }
            kind if kind.is_expression() => Err(AstError::malformed(format!(
                "expression kind {} in statement position",
                kind.kind_name()
            ))),
            kind => Err(AstError::UnsupportedConstruct {
                construct: kind.kind_name(),
            }),
        }
    }

    fn visit_expr(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::BoolOp { op, values } => {
                if values.len() < 2 {
                    return Err(AstError::malformed(
                        "boolean operation needs at least two operands",
                    ));
                }
                self.write("(");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.write(" ");
                        self.write(op.symbol());
                        self.write(" ");
                    }
                    self.visit_expr(value)?;
                }
                self.write(")");
                Ok(())
            }
            NodeKind::BinOp { left, op, right } => {
                self.visit_expr(left)?;
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                self.visit_expr(right)
            }
            NodeKind::UnaryOp { op, operand } => {
                self.write("(");
                self.write(op.symbol());
                if op.symbol() == "not" {
                    self.write(" ");
                }
                self.visit_expr(operand)?;
                self.write(")");
                Ok(())
            }
            NodeKind::Lambda { args, body } => {
                self.write("lambda");
                if !self.arguments_empty(args)? {
                    self.write(" ");
                    self.signature(args)?;
                }
                self.write(": ");
                self.visit_expr(body)
            }
            NodeKind::IfExp { test, body, orelse } => {
                self.visit_expr(body)?;
                self.write(" if ");
                self.visit_expr(test)?;
                self.write(" else ");
                self.visit_expr(orelse)
            }
            NodeKind::Dict { keys, values } => {
                if keys.len() != values.len() {
                    return Err(AstError::malformed(
                        "dict literal with unequal key and value counts",
                    ));
                }
                self.write("{");
                for (i, (key, value)) in keys.iter().zip(values).enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.visit_expr(key)?;
                    self.write(": ");
                    self.visit_expr(value)?;
                }
                self.write("}");
                Ok(())
            }
            NodeKind::Set { elts } => {
                // There is no literal for the empty set.
                if elts.is_empty() {
                    self.write("set()");
                } else {
                    self.write("{");
                    self.comma_separated(elts)?;
                    self.write("}");
                }
                Ok(())
            }
            NodeKind::ListComp { elt, generators } => {
                self.write("[");
                self.visit_expr(elt)?;
                self.generators(generators)?;
                self.write("]");
                Ok(())
            }
            NodeKind::SetComp { elt, generators } => {
                self.write("{");
                self.visit_expr(elt)?;
                self.generators(generators)?;
                self.write("}");
                Ok(())
            }
            NodeKind::DictComp {
                key,
                value,
                generators,
            } => {
                self.write("{");
                self.visit_expr(key)?;
                self.write(": ");
                self.visit_expr(value)?;
                self.generators(generators)?;
                self.write("}");
                Ok(())
            }
            NodeKind::GeneratorExp { elt, generators } => {
                self.write("(");
                self.visit_expr(elt)?;
                self.generators(generators)?;
                self.write(")");
                Ok(())
            }
            NodeKind::Yield { value } => {
                self.write("yield");
                if let Some(value) = value {
                    self.write(" ");
                    self.visit_expr(value)?;
                }
                Ok(())
            }
            NodeKind::YieldFrom { value } => {
                self.write("yield from ");
                self.visit_expr(value)
            }
            NodeKind::Compare {
                left,
                ops,
                comparators,
            } => {
                if ops.is_empty() || ops.len() != comparators.len() {
                    return Err(AstError::malformed(
                        "comparison with mismatched operator and comparator counts",
                    ));
                }
                self.visit_expr(left)?;
                for (op, comparator) in ops.iter().zip(comparators) {
                    self.write(" ");
                    self.write(op.symbol());
                    self.write(" ");
                    self.visit_expr(comparator)?;
                }
                Ok(())
            }
            NodeKind::Call {
                func,
                args,
                keywords,
                starargs,
                kwargs,
            } => {
                self.visit_expr(func)?;
                self.write("(");
                let mut want_comma = false;
                for arg in args {
                    self.comma(&mut want_comma);
                    self.visit_expr(arg)?;
                }
                for keyword in keywords {
                    self.comma(&mut want_comma);
                    self.visit_keyword(keyword)?;
                }
                if let Some(starargs) = starargs {
                    self.comma(&mut want_comma);
                    self.write("*");
                    self.visit_expr(starargs)?;
                }
                if let Some(kwargs) = kwargs {
                    self.comma(&mut want_comma);
                    self.write("**");
                    self.visit_expr(kwargs)?;
                }
                self.write(")");
                Ok(())
            }
            NodeKind::Num { n } => {
                self.write(&n.to_string());
                Ok(())
            }
            NodeKind::Str { s } => {
                self.write(&str_repr(s));
                Ok(())
            }
            NodeKind::Bytes { s } => {
                self.write(&bytes_repr(s));
                Ok(())
            }
            NodeKind::NameConstant { value } => {
                self.write(&value.to_string());
                Ok(())
            }
            NodeKind::Ellipsis => {
                self.write("...");
                Ok(())
            }
            NodeKind::Attribute { value, attr, .. } => {
                self.visit_expr(value)?;
                self.write(".");
                self.write(attr);
                Ok(())
            }
            NodeKind::Subscript { value, slice, .. } => {
                self.visit_expr(value)?;
                self.write("[");
                self.visit_slice(slice)?;
                self.write("]");
                Ok(())
            }
            NodeKind::Starred { value, .. } => {
                self.write("*");
                self.visit_expr(value)
            }
            NodeKind::Name { id, .. } => {
                self.write(id);
                Ok(())
            }
            NodeKind::List { elts, .. } => {
                self.write("[");
                self.comma_separated(elts)?;
                self.write("]");
                Ok(())
            }
            NodeKind::Tuple { elts, .. } => {
                self.write("(");
                self.comma_separated(elts)?;
                if elts.len() == 1 {
                    self.write(",");
                }
                self.write(")");
                Ok(())
            }
            kind if kind.is_statement() || matches!(kind, NodeKind::Module { .. }) => {
                Err(AstError::malformed(format!(
                    "statement kind {} in expression position",
                    kind.kind_name()
                )))
            }
            kind => Err(AstError::UnsupportedConstruct {
                construct: kind.kind_name(),
            }),
        }
    }

    //-------
    // CONSTRUCT PIECES
    //-------

    fn decorators(&mut self, decorator_list: &[NodeRef]) -> CodegenResult {
        for decorator in decorator_list {
            self.newline(decorator);
            self.write("@");
            self.visit_expr(decorator)?;
        }
        Ok(())
    }

    /// Render a parameter list; expects an `Arguments` node.
    fn signature(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        let (args, defaults, vararg, kwonlyargs, kw_defaults, kwarg) = match &borrowed.kind {
            NodeKind::Arguments {
                args,
                defaults,
                vararg,
                kwonlyargs,
                kw_defaults,
                kwarg,
            } => (args, defaults, vararg, kwonlyargs, kw_defaults, kwarg),
            kind => {
                return Err(AstError::malformed(format!(
                    "expected Arguments in parameter position, found {}",
                    kind.kind_name()
                )))
            }
        };
        if defaults.len() > args.len() {
            return Err(AstError::malformed("more parameter defaults than parameters"));
        }
        let mut want_comma = false;
        let padding = args.len() - defaults.len();
        for (i, arg) in args.iter().enumerate() {
            self.comma(&mut want_comma);
            self.visit_expr(arg)?;
            if i >= padding {
                self.write("=");
                self.visit_expr(&defaults[i - padding])?;
            }
        }
        if let Some(vararg) = vararg {
            self.comma(&mut want_comma);
            self.write("*");
            self.write(vararg);
        } else if !kwonlyargs.is_empty() {
            self.comma(&mut want_comma);
            self.write("*");
        }
        for (i, kwonly) in kwonlyargs.iter().enumerate() {
            self.comma(&mut want_comma);
            self.visit_expr(kwonly)?;
            if let Some(Some(default)) = kw_defaults.get(i) {
                self.write("=");
                self.visit_expr(default)?;
            }
        }
        if let Some(kwarg) = kwarg {
            self.comma(&mut want_comma);
            self.write("**");
            self.write(kwarg);
        }
        Ok(())
    }

    fn arguments_empty(&self, node: &NodeRef) -> Result<bool, AstError> {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::Arguments {
                args,
                vararg,
                kwonlyargs,
                kwarg,
                ..
            } => Ok(args.is_empty()
                && vararg.is_none()
                && kwonlyargs.is_empty()
                && kwarg.is_none()),
            kind => Err(AstError::malformed(format!(
                "expected Arguments in parameter position, found {}",
                kind.kind_name()
            ))),
        }
    }

    fn visit_keyword(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::Keyword { arg, value } => {
                self.write(arg);
                self.write("=");
                self.visit_expr(value)
            }
            kind => Err(AstError::malformed(format!(
                "expected Keyword in keyword-argument position, found {}",
                kind.kind_name()
            ))),
        }
    }

    fn aliases(&mut self, names: &[NodeRef]) -> CodegenResult {
        if names.is_empty() {
            return Err(AstError::malformed("import without names"));
        }
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let borrowed = name.borrow();
            match &borrowed.kind {
                NodeKind::Alias { name, asname } => {
                    self.write(name);
                    if let Some(asname) = asname {
                        self.write(" as ");
                        self.write(asname);
                    }
                }
                kind => {
                    return Err(AstError::malformed(format!(
                        "expected Alias in import list, found {}",
                        kind.kind_name()
                    )))
                }
            }
        }
        Ok(())
    }

    fn generators(&mut self, generators: &[NodeRef]) -> CodegenResult {
        if generators.is_empty() {
            return Err(AstError::malformed("comprehension without for clauses"));
        }
        for generator in generators {
            let borrowed = generator.borrow();
            match &borrowed.kind {
                NodeKind::Comprehension { target, iter, ifs } => {
                    self.write(" for ");
                    self.visit_expr(target)?;
                    self.write(" in ");
                    self.visit_expr(iter)?;
                    for cond in ifs {
                        self.write(" if ");
                        self.visit_expr(cond)?;
                    }
                }
                kind => {
                    return Err(AstError::malformed(format!(
                        "expected Comprehension in generator list, found {}",
                        kind.kind_name()
                    )))
                }
            }
        }
        Ok(())
    }

    fn visit_with_item(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::WithItem {
                context_expr,
                optional_vars,
            } => {
                self.visit_expr(context_expr)?;
                if let Some(vars) = optional_vars {
                    self.write(" as ");
                    self.visit_expr(vars)?;
                }
                Ok(())
            }
            kind => Err(AstError::malformed(format!(
                "expected WithItem in with statement, found {}",
                kind.kind_name()
            ))),
        }
    }

    fn visit_except_handler(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::ExceptHandler { typ, name, body } => {
                self.newline(node);
                self.write("except");
                match typ {
                    Some(typ) => {
                        self.write(" ");
                        self.visit_expr(typ)?;
                        if let Some(name) = name {
                            self.write(" as ");
                            self.write(name);
                        }
                    }
                    None => {
                        if name.is_some() {
                            return Err(AstError::malformed(
                                "except handler binds a name without an exception type",
                            ));
                        }
                    }
                }
                self.write(":");
                self.body(body)
            }
            kind => Err(AstError::malformed(format!(
                "expected ExceptHandler in try statement, found {}",
                kind.kind_name()
            ))),
        }
    }

    /// Render the slice part of a subscript. Bare expressions are accepted
    /// and treated like an `Index`, matching parsers that omit the wrapper.
    fn visit_slice(&mut self, node: &NodeRef) -> CodegenResult {
        let borrowed = node.borrow();
        match &borrowed.kind {
            NodeKind::Index { value } => self.visit_expr(value),
            NodeKind::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    self.visit_expr(lower)?;
                }
                self.write(":");
                if let Some(upper) = upper {
                    self.visit_expr(upper)?;
                }
                if let Some(step) = step {
                    self.write(":");
                    self.visit_expr(step)?;
                }
                Ok(())
            }
            NodeKind::ExtSlice { dims } => {
                if dims.is_empty() {
                    return Err(AstError::malformed("extended slice without dimensions"));
                }
                for (i, dim) in dims.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.visit_slice(dim)?;
                }
                Ok(())
            }
            kind if kind.is_expression() => self.visit_expr(node),
            kind => Err(AstError::malformed(format!(
                "{} cannot appear in subscript position",
                kind.kind_name()
            ))),
        }
    }

    //-------
    // HELPER
    //-------

    fn comma(&mut self, want_comma: &mut bool) {
        if *want_comma {
            self.write(", ");
        } else {
            *want_comma = true;
        }
    }

    fn paren_or_comma(&mut self, have_args: &mut bool) {
        if *have_args {
            self.write(", ");
        } else {
            *have_args = true;
            self.write("(");
        }
    }
}
