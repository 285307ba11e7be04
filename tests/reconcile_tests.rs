//! Tree reconciliation properties across refreshes

mod common;

use common::FakeCluster;
use podminator::cluster::PodRecord;
use podminator::fetch::fetch_pods;
use podminator::session::NamespaceScope;
use podminator::tree::{ExpansionState, NO_MATCHES, NodeKind, PodTree, ROOT_LABEL, reconcile};
use std::collections::BTreeMap;

fn fetched(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<PodRecord>> {
    entries
        .iter()
        .map(|(ns, pods)| {
            (
                ns.to_string(),
                pods.iter().map(|p| PodRecord::new(*ns, *p)).collect(),
            )
        })
        .collect()
}

fn namespace_labels(tree: &PodTree) -> Vec<String> {
    tree.namespaces().map(|n| n.label().to_string()).collect()
}

fn pod_names(tree: &PodTree, namespace: &str) -> Vec<String> {
    tree.namespaces()
        .filter(|n| n.label() == namespace)
        .flat_map(|n| n.children.iter())
        .flat_map(|group| group.children.iter())
        .map(|pod| pod.label().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_narrows_to_matching_namespaces() {
    let cluster = FakeCluster::with_pods(&[("a", &["web-1", "web-2"]), ("b", &["cache-1"])]);
    let data = fetch_pods(&cluster, &NamespaceScope::AllNamespaces, "web", 4)
        .await
        .unwrap();
    assert_eq!(data, fetched(&[("a", &["web-1", "web-2"])]));

    let result = reconcile(&PodTree::default(), &data, &mut ExpansionState::default(), None);
    assert_eq!(namespace_labels(&result.tree), vec!["a"]);
    assert_eq!(pod_names(&result.tree, "a"), vec!["web-1", "web-2"]);
}

#[tokio::test]
async fn test_search_without_matches_shows_info_leaf() {
    let cluster = FakeCluster::with_pods(&[("a", &["web-1"]), ("b", &["cache-1"])]);
    let data = fetch_pods(&cluster, &NamespaceScope::AllNamespaces, "zzz", 4)
        .await
        .unwrap();
    assert!(data.is_empty());

    let result = reconcile(&PodTree::default(), &data, &mut ExpansionState::default(), None);
    let root = result.tree.root();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].kind, NodeKind::Info(NO_MATCHES.to_string()));
}

#[test]
fn test_every_namespace_has_pods() {
    let data = fetched(&[("a", &["web-1"]), ("b", &[]), ("c", &["db-0", "db-1"])]);
    let result = reconcile(&PodTree::default(), &data, &mut ExpansionState::default(), None);
    for namespace in result.tree.namespaces() {
        let pods: usize = namespace.children.iter().map(|g| g.children.len()).sum();
        assert!(pods >= 1, "namespace {} has no pods", namespace.label());
    }
    assert_eq!(namespace_labels(&result.tree), vec!["a", "c"]);
}

#[test]
fn test_expansion_preserved_across_refresh() {
    let data = fetched(&[("a", &["web-1"]), ("b", &["api-0"])]);
    let mut expansion = ExpansionState::default();
    let mut tree = reconcile(&PodTree::default(), &data, &mut expansion, None).tree;

    // Expand `b` only
    tree.move_down();
    tree.move_down();
    assert_eq!(tree.current().label(), "b");
    assert!(tree.toggle_current());

    let refreshed = reconcile(&tree, &data, &mut expansion, None).tree;
    let flags: Vec<_> = refreshed
        .namespaces()
        .map(|n| (n.label().to_string(), n.expanded))
        .collect();
    assert_eq!(
        flags,
        vec![("a".to_string(), false), ("b".to_string(), true)]
    );
    assert_eq!(expansion.get("b"), Some(true));
}

#[test]
fn test_reconcile_is_idempotent() {
    let data = fetched(&[("a", &["web-1", "web-2"]), ("b", &["api-0"])]);
    let mut expansion = ExpansionState::default();
    let prior = PodRecord::new("b", "api-0");

    let once = reconcile(&PodTree::default(), &data, &mut expansion, Some(&prior));
    let expansion_once = expansion.clone();
    let twice = reconcile(&once.tree, &data, &mut expansion, once.selection.as_ref());

    assert_eq!(once, twice);
    assert_eq!(expansion, expansion_once);
    assert_eq!(twice.selection, Some(prior));
}

#[test]
fn test_selection_survives_when_pod_remains() {
    let mut expansion = ExpansionState::default();
    let prior = PodRecord::new("a", "web-2");
    let data = fetched(&[("a", &["web-1", "web-2", "web-3"])]);

    let result = reconcile(&PodTree::default(), &data, &mut expansion, Some(&prior));
    assert_eq!(result.tree.current_pod(), Some(&prior));
    assert_eq!(result.selection, Some(prior));
    // The selected pod's namespace is opened to show it
    assert_eq!(expansion.get("a"), Some(true));
}

#[test]
fn test_selection_falls_back_to_root_when_pod_disappears() {
    let mut expansion = ExpansionState::default();
    let prior = PodRecord::new("a", "web-2");
    let first = reconcile(
        &PodTree::default(),
        &fetched(&[("a", &["web-1", "web-2"])]),
        &mut expansion,
        Some(&prior),
    );
    assert_eq!(first.tree.current_pod(), Some(&prior));

    let second = reconcile(
        &first.tree,
        &fetched(&[("a", &["web-1"])]),
        &mut expansion,
        first.selection.as_ref(),
    );
    assert_eq!(second.tree.current().label(), ROOT_LABEL);
    assert_eq!(second.tree.current_path(), &[] as &[usize]);
    assert_eq!(second.selection, None);
}

#[test]
fn test_reappearing_namespace_recalls_expansion() {
    let both = fetched(&[("a", &["web-1"]), ("b", &["api-0"])]);
    let mut expansion = ExpansionState::default();
    let mut tree = reconcile(&PodTree::default(), &both, &mut expansion, None).tree;

    tree.move_down();
    tree.move_down();
    assert_eq!(tree.current().label(), "b");
    assert!(tree.toggle_current());

    let without_b = reconcile(&tree, &fetched(&[("a", &["web-1"])]), &mut expansion, None);
    assert_eq!(namespace_labels(&without_b.tree), vec!["a"]);
    assert_eq!(expansion.get("b"), Some(true));

    let back = reconcile(&without_b.tree, &both, &mut expansion, None).tree;
    let flags: Vec<_> = back
        .namespaces()
        .map(|n| (n.label().to_string(), n.expanded))
        .collect();
    assert_eq!(
        flags,
        vec![("a".to_string(), false), ("b".to_string(), true)]
    );
}
