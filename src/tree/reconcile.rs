use super::{ExpansionState, NO_MATCHES, NodeKind, PodTree, TreeNode};
use crate::cluster::PodRecord;
use std::collections::BTreeMap;

/// Result of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub tree: PodTree,
    /// Pod that ended up focused, if any
    pub selection: Option<PodRecord>,
}

/// Rebuild the tree from a fresh fetch, carrying user state forward
///
/// Expansion flags of `previous` are recorded into `expansion` before the
/// new tree is built from it. The selection is the focused pod of `previous`
/// or, failing that, `prior_selection`. When the selected pod is still
/// present its ancestors are expanded and it is focused; otherwise focus
/// returns to the root.
pub fn reconcile(
    previous: &PodTree,
    fetched: &BTreeMap<String, Vec<PodRecord>>,
    expansion: &mut ExpansionState,
    prior_selection: Option<&PodRecord>,
) -> Reconciled {
    for node in previous.namespaces() {
        if let NodeKind::Namespace(name) = &node.kind {
            expansion.set(name.clone(), node.expanded);
        }
    }

    let wanted = previous.current_pod().or(prior_selection).cloned();

    let mut root = TreeNode::new(NodeKind::Root);
    root.expanded = true;
    for (namespace, pods) in fetched.iter().filter(|(_, pods)| !pods.is_empty()) {
        let mut group = TreeNode::new(NodeKind::Group);
        group.expanded = true;
        group.children = pods
            .iter()
            .map(|pod| TreeNode::new(NodeKind::Pod(pod.clone())))
            .collect();

        let mut ns_node = TreeNode::new(NodeKind::Namespace(namespace.clone()));
        ns_node.expanded = expansion.is_expanded(namespace);
        ns_node.children.push(group);
        root.children.push(ns_node);
    }
    if root.children.is_empty() {
        root.children
            .push(TreeNode::new(NodeKind::Info(NO_MATCHES.to_string())));
    }

    let mut tree = PodTree::new(root);
    let selection = match wanted.and_then(|pod| tree.find_pod(&pod).map(|path| (pod, path))) {
        Some((pod, path)) => {
            tree.expand_path(&path);
            expansion.set(pod.namespace.clone(), true);
            tree.set_current(path);
            Some(pod)
        }
        None => None,
    };

    Reconciled { tree, selection }
}
