use grocery_storefront::{
    hierarchy::{CategoryNode, build_hierarchy},
    models::Category,
};

fn category(id: i64, parent_id: Option<i64>) -> Category {
    Category {
        id,
        name: format!("Category {id}"),
        description: None,
        image: None,
        parent_id,
    }
}

fn ids(nodes: &[CategoryNode]) -> Vec<i64> {
    nodes.iter().map(|node| node.id).collect()
}

#[test]
fn nests_children_under_parents() {
    let tree = build_hierarchy(vec![
        category(1, None),
        category(2, Some(1)),
        category(3, Some(2)),
        category(4, None),
        category(5, Some(1)),
    ]);

    assert_eq!(ids(&tree), vec![1, 4]);
    assert_eq!(ids(&tree[0].children), vec![2, 5]);
    assert_eq!(ids(&tree[0].children[0].children), vec![3]);
    assert!(tree[1].children.is_empty());
}

#[test]
fn child_listed_before_parent_is_still_attached() {
    let tree = build_hierarchy(vec![category(7, Some(3)), category(3, None)]);

    assert_eq!(ids(&tree), vec![3]);
    assert_eq!(ids(&tree[0].children), vec![7]);
    assert_eq!(tree[0].children[0].parent_id, Some(3));
}

#[test]
fn orphan_is_dropped_and_sibling_rows_survive() {
    let tree = build_hierarchy(vec![
        category(1, None),
        category(2, Some(1)),
        category(3, Some(99)),
    ]);

    assert_eq!(ids(&tree), vec![1]);
    assert_eq!(ids(&tree[0].children), vec![2]);
    assert!(tree[0].children[0].children.is_empty());
}

#[test]
fn orphan_subtree_is_dropped_with_it() {
    let tree = build_hierarchy(vec![
        category(1, None),
        category(2, Some(99)),
        category(3, Some(2)),
    ]);

    assert_eq!(ids(&tree), vec![1]);
    assert!(tree[0].children.is_empty());
}

#[test]
fn very_deep_chain_is_built() {
    const DEPTH: i64 = 100_000;
    let rows = (1..=DEPTH)
        .map(|id| category(id, (id > 1).then(|| id - 1)))
        .collect();

    let tree = build_hierarchy(rows);

    assert_eq!(ids(&tree), vec![1]);
    let mut node = &tree[0];
    let mut depth = 1;
    while let Some(child) = node.children.first() {
        assert_eq!(child.parent_id, Some(node.id));
        node = child;
        depth += 1;
    }
    assert_eq!(depth, DEPTH);

    // Tear down level by level; dropping the root directly would recurse as deep as the chain.
    let mut pending = tree;
    while let Some(mut node) = pending.pop() {
        pending.append(&mut node.children);
    }
}

#[test]
fn cycles_do_not_hang() {
    let tree = build_hierarchy(vec![category(1, Some(2)), category(2, Some(1))]);
    assert!(tree.is_empty());
}

#[test]
fn empty_input_gives_empty_tree() {
    assert!(build_hierarchy(Vec::new()).is_empty());
}

#[test]
fn serializes_children_recursively() {
    let tree = build_hierarchy(vec![category(1, None), category(2, Some(1))]);
    let json = serde_json::to_value(&tree).expect("serialize tree");

    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["children"][0]["id"], 2);
    assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));
}
