use serde::Serialize;

use crate::domain::category::{Category, CategoryTreeNode};
use crate::domain::tree::flatten_with_depth;

/// Category row of the admin listing, in tree order with its nesting depth.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    pub order: i32,
    pub article_count: i32,
    pub depth: usize,
}

impl CategoryDto {
    fn new(depth: usize, value: &Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
            slug: value.slug.as_str().to_string(),
            parent_id: value.parent_id.map(|id| id.get()),
            order: value.sort_order,
            article_count: value.article_count.get(),
            depth,
        }
    }

    /// Flatten a category forest in pre-order.
    pub fn from_tree(tree: &[CategoryTreeNode]) -> Vec<Self> {
        flatten_with_depth(tree)
            .into_iter()
            .map(|(depth, category)| Self::new(depth, category))
            .collect()
    }
}
