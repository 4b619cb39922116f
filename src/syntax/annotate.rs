//! Parent annotation pass.
//!
//! Decorates every node reachable from a root with `ParentLink` records: the
//! owning parent plus the `(field, index)` descriptor by which the node is
//! reached. The graph visitor relies on these links to label its edges.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::ast::{Node, NodeRef, ParentLink};

/// Attach parent links to every node reachable from `root` and return the
/// same tree.
///
/// Traversal is depth-first over the declared field order, driven by an
/// explicit work stack so that annotation depth is limited by the heap and
/// not by the call stack. Re-running the pass rebuilds all links from
/// scratch, so it is idempotent; a node aliased under several parents ends
/// up with one link per parent path.
///
/// A node that is reachable as its own ancestor is not a tree and panics on
/// the nested borrow; such cycles are construction bugs upstream, not a
/// recoverable condition.
pub fn annotate_parents(root: &NodeRef) -> NodeRef {
    let mut seen: HashSet<*const RefCell<Node>> = HashSet::new();
    seen.insert(Rc::as_ptr(root));
    root.borrow_mut().parents.clear();

    let mut stack = vec![Rc::clone(root)];
    while let Some(node) = stack.pop() {
        let children = node.borrow().kind.children();
        for (field, index, child) in children {
            // First encounter in this run drops any stale links.
            let first_visit = seen.insert(Rc::as_ptr(&child));
            {
                let mut borrowed = child.borrow_mut();
                if first_visit {
                    borrowed.parents.clear();
                }
                borrowed.parents.push(ParentLink {
                    parent: Rc::downgrade(&node),
                    field,
                    index,
                });
            }
            if first_visit {
                stack.push(child);
            }
        }
    }
    Rc::clone(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builder::{assign, expr, int, module, name, store};

    #[test]
    fn test_records_parent_and_field_descriptor() {
        let value = int(1);
        let target = store("x");
        let stmt = assign(vec![Rc::clone(&target)], Rc::clone(&value));
        let root = module(vec![Rc::clone(&stmt)]);

        annotate_parents(&root);

        let links = &stmt.borrow().parents;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].describe(), "body[0]");
        assert!(Rc::ptr_eq(&links[0].parent.upgrade().unwrap(), &root));

        let links = &target.borrow().parents;
        assert_eq!(links[0].describe(), "targets[0]");

        let links = &value.borrow().parents;
        assert_eq!(links[0].describe(), "value");
        assert!(Rc::ptr_eq(&links[0].parent.upgrade().unwrap(), &stmt));
    }

    #[test]
    fn test_root_has_no_parent() {
        let root = module(vec![expr(name("x"))]);
        annotate_parents(&root);
        assert!(root.borrow().parents.is_empty());
    }

    #[test]
    fn test_reannotation_is_idempotent() {
        let value = int(1);
        let root = module(vec![assign(vec![store("x")], Rc::clone(&value))]);

        annotate_parents(&root);
        annotate_parents(&root);

        assert_eq!(value.borrow().parents.len(), 1);
    }

    #[test]
    fn test_aliased_subtree_collects_one_link_per_parent() {
        let shared = name("y");
        let root = module(vec![
            assign(vec![store("x")], Rc::clone(&shared)),
            expr(Rc::clone(&shared)),
        ]);

        annotate_parents(&root);

        let links = &shared.borrow().parents;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].describe(), "value");
        assert_eq!(links[1].describe(), "value");
    }
}
