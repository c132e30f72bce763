use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{configure, Accessor, Inspect};
use crate::tests::fixtures::{order, ring, unlink, Node};

#[test]
fn self_reference_terminates() {
    let node = Rc::new(Node {
        label: "self".to_string(),
        next: RefCell::new(None),
    });
    *node.next.borrow_mut() = Some(node.clone());

    let code = configure().include_null().assertify(&node, "node").unwrap();
    unlink(&node);

    insta::assert_snapshot!(code, @r###"
    let _ = &node;
    assert_eq!(node.label(), "self");
    "###);
}

#[test]
fn two_node_ring_is_walked_once() {
    let a = ring();
    let code = configure().assertify(&a, "a").unwrap();
    unlink(&a);

    insta::assert_snapshot!(code, @r###"
    let _ = &a;
    assert_eq!(a.label(), "a");
    assert_eq!(a.next().borrow().unwrap().label(), "b");
    "###);
}

#[test]
fn shared_composite_is_asserted_once() {
    let order = order();
    let assertions = configure().assertions(&order, "order").unwrap();

    assert!(assertions.mentions("order.billing().city()"));
    assert!(!assertions.mentions("order.shipping().city()"));
}

#[test]
fn mutably_borrowed_cell_reads_as_null() {
    let node = Node {
        label: "busy".to_string(),
        next: RefCell::new(None),
    };
    let _guard = node.next.borrow_mut();

    let code = configure().include_null().assertify(&node, "node").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &node;
    assert_eq!(node.label(), "busy");
    assert!(node.next().is_none());
    "###);
}

#[test]
fn empty_cell_reads_as_null() {
    let node = Node {
        label: "tail".to_string(),
        next: RefCell::new(None),
    };

    let code = configure().include_null().assertify(&node, "node").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &node;
    assert_eq!(node.label(), "tail");
    assert!(node.next().borrow().is_none());
    "###);
}

struct Looped {
    name: String,
}

impl Inspect for Looped {
    fn accessors(&self) -> Vec<Accessor<'_>> {
        vec![
            Accessor::field("get_self", self),
            Accessor::field("name", &self.name),
        ]
    }
}

#[test]
fn accessor_returning_its_owner() {
    let looped = Looped {
        name: "R".to_string(),
    };
    let code = configure().include_null().assertify(&looped, "r").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &r;
    assert_eq!(r.name(), "R");
    "###);
}

struct TreeNode {
    name: String,
    parent: Weak<TreeNode>,
    children: RefCell<Vec<Rc<TreeNode>>>,
}

impl TreeNode {
    fn root(name: &str) -> Rc<TreeNode> {
        Rc::new(TreeNode {
            name: name.to_string(),
            parent: Weak::new(),
            children: RefCell::new(Vec::new()),
        })
    }

    fn attach(parent: &Rc<TreeNode>, name: &str) -> Rc<TreeNode> {
        let child = Rc::new(TreeNode {
            name: name.to_string(),
            parent: Rc::downgrade(parent),
            children: RefCell::new(Vec::new()),
        });
        parent.children.borrow_mut().push(child.clone());
        child
    }
}

impl Inspect for TreeNode {
    fn accessors(&self) -> Vec<Accessor<'_>> {
        vec![
            Accessor::field("name", &self.name),
            Accessor::computed("parent", move || self.parent.upgrade()),
            Accessor::field("children", &self.children),
        ]
    }
}

#[test]
fn cycle_through_computed_parent_terminates() {
    let root = TreeNode::root("root");
    let a = TreeNode::attach(&root, "a");
    let _b = TreeNode::attach(&root, "b");

    let code = configure().assertify(&a, "a").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &a;
    assert_eq!(a.name(), "a");
    assert_eq!(a.parent().unwrap().name(), "root");
    assert_eq!(a.parent().unwrap().children().borrow().len(), 2);
    assert_eq!(a.parent().unwrap().children().borrow()[1].name(), "b");
    "###);

    let code = configure().assertify(&root, "root").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &root;
    assert_eq!(root.name(), "root");
    assert_eq!(root.children().borrow().len(), 2);
    assert_eq!(root.children().borrow()[0].name(), "a");
    assert_eq!(root.children().borrow()[1].name(), "b");
    "###);
}
