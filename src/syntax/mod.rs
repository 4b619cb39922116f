//! The syntax module contains everything that is concerned with the node tree itself:
//! the node datastructures, construction helpers and the parent annotation pass.
//!
//! # Tree model
//! Trees are produced by an external parser (or deserialized from its JSON form) and
//! consist of `Node` values shared through `Rc<RefCell<_>>` handles.
//! ### Example
//! ```rust
//! use pycodegen::syntax::builder;
//! let tree = builder::module(vec![builder::expr(builder::name("x"))]);
//! ```
//!
//! # Parent annotation
//! `annotate::annotate_parents` decorates every reachable node with the parent it is
//! owned by and the field path by which it is reached. The pass is required before
//! building a graph out of the tree and is idempotent.
//! ### Example
//! ```rust
//! use pycodegen::syntax::{annotate, builder};
//! let tree = builder::module(vec![builder::expr(builder::name("x"))]);
//! annotate::annotate_parents(&tree);
//! ```

pub mod annotate;
pub mod ast;
pub mod builder;
