//! Displayed namespace/pod tree
//!
//! The tree is owned by the interactive loop and rebuilt wholesale by
//! [`reconcile`] on every refresh. Focus is a child-index path from the root.

mod reconcile;

pub use reconcile::{Reconciled, reconcile};

use crate::cluster::PodRecord;
use std::collections::HashMap;

pub const ROOT_LABEL: &str = "Namespaces";
pub const GROUP_LABEL: &str = "Pods";
pub const NO_MATCHES: &str = "No matching pods found";
pub const SELECT_NAMESPACE: &str = "Please select a namespace to load pods";

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Namespace(String),
    Group,
    Pod(PodRecord),
    Info(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub expanded: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            expanded: false,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Root => ROOT_LABEL,
            NodeKind::Namespace(name) => name,
            NodeKind::Group => GROUP_LABEL,
            NodeKind::Pod(pod) => &pod.name,
            NodeKind::Info(message) => message,
        }
    }

    pub fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn pod(&self) -> Option<&PodRecord> {
        match &self.kind {
            NodeKind::Pod(pod) => Some(pod),
            _ => None,
        }
    }
}

/// A row of the flattened, expanded-only view
#[derive(Debug, Clone)]
pub struct VisibleRow<'a> {
    pub depth: usize,
    pub path: Vec<usize>,
    pub node: &'a TreeNode,
}

/// Namespace name to expanded flag
///
/// Survives scope changes so a namespace keeps its state when it reappears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState(HashMap<String, bool>);

impl ExpansionState {
    pub fn is_expanded(&self, namespace: &str) -> bool {
        self.0.get(namespace).copied().unwrap_or(false)
    }

    pub fn set(&mut self, namespace: impl Into<String>, expanded: bool) {
        self.0.insert(namespace.into(), expanded);
    }

    pub fn get(&self, namespace: &str) -> Option<bool> {
        self.0.get(namespace).copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodTree {
    root: TreeNode,
    current: Vec<usize>,
}

impl Default for PodTree {
    fn default() -> Self {
        Self::placeholder(SELECT_NAMESPACE)
    }
}

impl PodTree {
    /// Tree focused on `root`
    pub fn new(root: TreeNode) -> Self {
        Self {
            root,
            current: Vec::new(),
        }
    }

    /// Root with a single informational leaf
    pub fn placeholder(message: &str) -> Self {
        let mut root = TreeNode::new(NodeKind::Root);
        root.expanded = true;
        root.children
            .push(TreeNode::new(NodeKind::Info(message.to_string())));
        Self::new(root)
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(&self.root, |node, &index| node.children.get(index))
    }

    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        path.iter()
            .try_fold(&mut self.root, |node, &index| node.children.get_mut(index))
    }

    pub fn current_path(&self) -> &[usize] {
        &self.current
    }

    /// Focused node; the root when the focus path no longer resolves
    pub fn current(&self) -> &TreeNode {
        self.node_at(&self.current).unwrap_or(&self.root)
    }

    pub fn current_pod(&self) -> Option<&PodRecord> {
        self.current().pod()
    }

    /// Focus `path` if it resolves to a visible node
    pub fn set_current(&mut self, path: Vec<usize>) -> bool {
        let visible = (0..path.len()).all(|depth| {
            self.node_at(&path[..depth])
                .is_some_and(|ancestor| ancestor.expanded)
        });
        if visible && self.node_at(&path).is_some() {
            self.current = path;
            true
        } else {
            false
        }
    }

    /// Pre-order walk over expanded nodes, root at depth 0
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        collect_visible(&self.root, 0, &mut path, &mut rows);
        rows
    }

    /// Index of the focused node in `visible_rows()`
    pub fn current_row(&self) -> usize {
        self.visible_rows()
            .iter()
            .position(|row| row.path == self.current)
            .unwrap_or(0)
    }

    pub fn move_up(&mut self) {
        let rows = self.visible_rows();
        let index = self.current_row();
        if index > 0 {
            self.current = rows[index - 1].path.clone();
        }
    }

    pub fn move_down(&mut self) {
        let rows = self.visible_rows();
        let index = self.current_row();
        if index + 1 < rows.len() {
            self.current = rows[index + 1].path.clone();
        }
    }

    /// Flip the expanded flag of the focused node if it has children
    pub fn toggle_current(&mut self) -> bool {
        let path = self.current.clone();
        match self.node_at_mut(&path) {
            Some(node) if node.is_expandable() => {
                node.expanded = !node.expanded;
                true
            }
            _ => false,
        }
    }

    /// Namespace nodes directly under the root
    pub fn namespaces(&self) -> impl Iterator<Item = &TreeNode> {
        self.root
            .children
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Namespace(_)))
    }

    /// Path of the pod node with this identity
    pub fn find_pod(&self, pod: &PodRecord) -> Option<Vec<usize>> {
        self.root
            .children
            .iter()
            .enumerate()
            .find(|(_, node)| matches!(&node.kind, NodeKind::Namespace(name) if *name == pod.namespace))
            .and_then(|(ns_index, ns_node)| {
                ns_node
                    .children
                    .iter()
                    .enumerate()
                    .find_map(|(group_index, group)| {
                        group
                            .children
                            .iter()
                            .position(|child| child.pod() == Some(pod))
                            .map(|pod_index| vec![ns_index, group_index, pod_index])
                    })
            })
    }

    /// Number of pod nodes in the tree
    pub fn pod_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            let own = usize::from(node.pod().is_some());
            own + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    pub(crate) fn expand_path(&mut self, path: &[usize]) {
        for depth in 0..path.len() {
            if let Some(node) = self.node_at_mut(&path[..depth]) {
                node.expanded = true;
            }
        }
    }
}

fn collect_visible<'a>(
    node: &'a TreeNode,
    depth: usize,
    path: &mut Vec<usize>,
    rows: &mut Vec<VisibleRow<'a>>,
) {
    rows.push(VisibleRow {
        depth,
        path: path.clone(),
        node,
    });
    if node.expanded {
        for (index, child) in node.children.iter().enumerate() {
            path.push(index);
            collect_visible(child, depth + 1, path, rows);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PodTree {
        let mut group = TreeNode::new(NodeKind::Group);
        group.expanded = true;
        group
            .children
            .push(TreeNode::new(NodeKind::Pod(PodRecord::new("a", "web-1"))));
        group
            .children
            .push(TreeNode::new(NodeKind::Pod(PodRecord::new("a", "web-2"))));
        let mut ns = TreeNode::new(NodeKind::Namespace("a".to_string()));
        ns.children.push(group);
        let mut root = TreeNode::new(NodeKind::Root);
        root.expanded = true;
        root.children.push(ns);
        PodTree::new(root)
    }

    #[test]
    fn test_placeholder_tree() {
        let tree = PodTree::default();
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].node.label(), ROOT_LABEL);
        assert_eq!(rows[1].node.label(), SELECT_NAMESPACE);
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn test_collapsed_namespace_hides_pods() {
        let tree = sample();
        let labels: Vec<_> = tree.visible_rows().iter().map(|r| r.node.label().to_string()).collect();
        assert_eq!(labels, vec!["Namespaces", "a"]);
    }

    #[test]
    fn test_navigation_and_toggle() {
        let mut tree = sample();
        tree.move_down();
        assert_eq!(tree.current().label(), "a");
        assert!(tree.toggle_current());

        tree.move_down();
        assert_eq!(tree.current().label(), GROUP_LABEL);
        tree.move_down();
        tree.move_down();
        assert_eq!(tree.current_pod(), Some(&PodRecord::new("a", "web-2")));

        // Bottom stays put
        tree.move_down();
        assert_eq!(tree.current_pod(), Some(&PodRecord::new("a", "web-2")));

        // Pods are leaves
        assert!(!tree.toggle_current());
        assert_eq!(tree.current_row(), 4);
    }

    #[test]
    fn test_set_current_requires_visible_path() {
        let mut tree = sample();
        assert!(!tree.set_current(vec![0, 0, 1]));
        tree.expand_path(&[0, 0, 1]);
        assert!(tree.set_current(vec![0, 0, 1]));
        assert_eq!(tree.current_pod().map(|p| p.name.as_str()), Some("web-2"));
    }

    #[test]
    fn test_find_pod() {
        let tree = sample();
        assert_eq!(tree.find_pod(&PodRecord::new("a", "web-2")), Some(vec![0, 0, 1]));
        assert_eq!(tree.find_pod(&PodRecord::new("b", "web-2")), None);
        assert_eq!(tree.pod_count(), 2);
    }
}
