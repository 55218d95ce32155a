use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use tager_graph::{ClosureComputer, TagError, TagStore};

const MAX_TAGS: usize = 10;
const MAX_LINKS: usize = 60;

#[derive(Debug, Clone)]
struct LinkCase {
    tag_count: usize,
    links: Vec<(usize, usize)>,
}

fn link_case_strategy() -> impl Strategy<Value = LinkCase> {
    (1usize..=MAX_TAGS).prop_flat_map(|tag_count| {
        (
            Just(tag_count),
            prop::collection::vec((0usize..tag_count, 0usize..tag_count), 0..=MAX_LINKS),
        )
    })
    .prop_map(|(tag_count, links)| LinkCase { tag_count, links })
}

fn build(case: &LinkCase) -> TagStore {
    let mut store = TagStore::new();
    for i in 0..case.tag_count {
        store.create(&format!("t{i}")).unwrap();
    }
    for (src, dst) in &case.links {
        let before = store.edge_count();
        match store.link(&format!("t{src}"), &format!("t{dst}")) {
            Ok(()) => assert_eq!(store.edge_count(), before + 1),
            Err(TagError::Cycle { .. }) | Err(TagError::DuplicateEdge { .. }) => {
                assert_eq!(store.edge_count(), before)
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    store
}

/// Kahn's algorithm: the graph is acyclic iff every node can be peeled off.
fn is_acyclic(store: &TagStore) -> bool {
    let mut indegree: BTreeMap<&str, usize> = store.names().map(|n| (n, 0)).collect();
    for node in store.nodes() {
        for child in &node.child_tags {
            *indegree.get_mut(child.as_str()).unwrap() += 1;
        }
    }
    let mut ready: Vec<&str> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut peeled = 0;
    while let Some(name) = ready.pop() {
        peeled += 1;
        for child in &store.get(name).unwrap().child_tags {
            let d = indegree.get_mut(child.as_str()).unwrap();
            *d -= 1;
            if *d == 0 {
                ready.push(child.as_str());
            }
        }
    }
    peeled == store.len()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn guarded_links_never_create_cycles(case in link_case_strategy()) {
        let store = build(&case);
        prop_assert!(is_acyclic(&store));
    }

    #[test]
    fn recursive_closure_yields_each_tag_once(case in link_case_strategy()) {
        let store = build(&case);
        let closure = ClosureComputer::new(&store);
        for name in store.names() {
            let reached: Vec<String> = closure
                .child_tags(name, true)
                .unwrap()
                .map(|e| e.name)
                .collect();
            let unique: HashSet<&String> = reached.iter().collect();
            prop_assert_eq!(unique.len(), reached.len());
            prop_assert!(!reached.iter().any(|r| r == name));
        }
    }

    #[test]
    fn rejected_link_is_reachable_back(case in link_case_strategy()) {
        let store = build(&case);
        let closure = ClosureComputer::new(&store);
        for (src, dst) in &case.links {
            let (src, dst) = (format!("t{src}"), format!("t{dst}"));
            let mut probe = store.clone();
            if let Err(TagError::Cycle { .. }) = probe.link(&src, &dst) {
                let back = src == dst
                    || closure.child_tags(&dst, true).unwrap().any(|e| e.name == src);
                prop_assert!(back);
            }
        }
    }
}
