//! Forest construction over flat records that reference their parent.
//!
//! Categories and comment threads are both stored flat with an optional
//! parent key. [`build_forest`] turns such a list into nested [`TreeNode`]s
//! without recursion:
//!
//! * a record whose parent is absent, unknown or itself becomes a root;
//! * parent chains that loop are cut at the first record that closes the
//!   loop, which then becomes a root;
//! * siblings are ordered by the caller's sort key, keeping input order for
//!   equal keys.
//!
//! Every input record ends up in the output exactly once.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// A record that can be placed into a forest.
pub trait TreeItem {
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
    fn parent_key(&self) -> Option<Self::Key>;
}

/// A record together with its ordered children.
///
/// Serializes as the record's own fields plus a `children` array.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn leaf(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }
}

/// Build an ordered forest from flat records.
pub fn build_forest<T, K, F>(items: Vec<T>, sort_key: F) -> Vec<TreeNode<T>>
where
    T: TreeItem,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<T::Key, usize> = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        index.entry(item.key()).or_insert(position);
    }

    let mut parents: Vec<Option<usize>> = items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.parent_key()
                .and_then(|key| index.get(&key).copied())
                .filter(|&parent| parent != position)
        })
        .collect();
    break_cycles(&mut parents);

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    for (position, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(position),
            None => roots.push(position),
        }
    }

    // `sort_by` is stable, so equal keys keep input order.
    let by_key =
        |a: &usize, b: &usize| -> Ordering { sort_key(&items[*a]).cmp(&sort_key(&items[*b])) };
    roots.sort_by(by_key);
    for siblings in &mut children {
        siblings.sort_by(by_key);
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut built: Vec<Option<TreeNode<T>>> = (0..slots.len()).map(|_| None).collect();

    // Post-order walk: a node is assembled once all of its children are.
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&root| (root, false)).collect();
    while let Some((position, expanded)) = stack.pop() {
        if expanded {
            let nested = children[position]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            if let Some(item) = slots[position].take() {
                built[position] = Some(TreeNode {
                    item,
                    children: nested,
                });
            }
        } else {
            stack.push((position, true));
            stack.extend(children[position].iter().map(|&child| (child, false)));
        }
    }

    roots
        .into_iter()
        .filter_map(|root| built[root].take())
        .collect()
}

/// Pre-order listing of every record in the forest with its depth (roots are 0).
pub fn flatten_with_depth<T>(forest: &[TreeNode<T>]) -> Vec<(usize, &T)> {
    let mut flat = Vec::new();
    let mut stack: Vec<(usize, &TreeNode<T>)> = forest.iter().rev().map(|node| (0, node)).collect();
    while let Some((depth, node)) = stack.pop() {
        flat.push((depth, &node.item));
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    flat
}

/// Detach the first node of every parent loop so the graph becomes a forest.
fn break_cycles(parents: &mut [Option<usize>]) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut path = Vec::new();

    for start in 0..parents.len() {
        let mut current = Some(start);
        while let Some(position) = current {
            match marks[position] {
                Mark::Unvisited => {
                    marks[position] = Mark::OnPath;
                    path.push(position);
                    current = parents[position];
                }
                Mark::OnPath => {
                    parents[position] = None;
                    break;
                }
                Mark::Done => break,
            }
        }
        for position in path.drain(..) {
            marks[position] = Mark::Done;
        }
    }
}
