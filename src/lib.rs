pub mod codegen;
pub mod error;
pub mod syntax;
pub mod visualize;

pub use crate::error::AstError;

/// Wrap a `NodeKind` into a fresh shared node handle.
#[macro_export]
macro_rules! ptr {
    ( $kind: expr ) => {
        std::rc::Rc::new(std::cell::RefCell::new($crate::syntax::ast::Node::new($kind)))
    };
}
