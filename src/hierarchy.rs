//! Flat category rows to a parent/children tree.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<i64>,
    #[schema(no_recursion)]
    pub children: Vec<CategoryNode>,
}

/// Builds the category tree from rows as fetched.
///
/// Roots are the rows without a parent, in input order; children keep their
/// input order too. A row whose parent is not among `categories` is dropped
/// along with its whole subtree, and so are rows caught in a parent cycle.
pub fn build_hierarchy(categories: Vec<Category>) -> Vec<CategoryNode> {
    let mut roots = Vec::new();
    let mut children_of: HashMap<i64, Vec<Category>> = HashMap::new();

    for category in categories {
        match category.parent_id {
            None => roots.push(category),
            Some(parent) => children_of.entry(parent).or_default().push(category),
        }
    }

    // Depth-first with an explicit stack so deep chains cannot exhaust the call stack.
    // Taking a parent's entry out of `children_of` means each row is visited once.
    let mut tree = Vec::with_capacity(roots.len());
    for root in roots {
        let mut stack = vec![Frame::open(root, &mut children_of)];
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.next() {
                let child = Frame::open(child, &mut children_of);
                stack.push(child);
                continue;
            }
            if let Some(done) = stack.pop() {
                let node = done.close();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => tree.push(node),
                }
            }
        }
    }

    if !children_of.is_empty() {
        let dropped: usize = children_of.values().map(Vec::len).sum();
        tracing::debug!(dropped, "categories without a reachable parent left out of hierarchy");
    }

    tree
}

/// A category whose children are still being built.
struct Frame {
    category: Category,
    pending: std::vec::IntoIter<Category>,
    children: Vec<CategoryNode>,
}

impl Frame {
    fn open(category: Category, children_of: &mut HashMap<i64, Vec<Category>>) -> Self {
        let pending = children_of.remove(&category.id).unwrap_or_default();
        Self {
            children: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
            category,
        }
    }

    fn close(self) -> CategoryNode {
        let category = self.category;
        CategoryNode {
            id: category.id,
            name: category.name,
            description: category.description,
            image: category.image,
            parent_id: category.parent_id,
            children: self.children,
        }
    }
}
