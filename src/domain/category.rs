use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tree::{TreeItem, TreeNode, build_forest};
use crate::domain::types::{ArticleCount, CategoryId, CategoryName, Slug};

/// Content category. Categories nest through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    /// Position among siblings, ascending.
    #[serde(rename = "order")]
    pub sort_order: i32,
    /// Number of articles filed directly under this category.
    pub article_count: ArticleCount,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable fields of an existing [`Category`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
}

/// A category with its nested subcategories.
pub type CategoryTreeNode = TreeNode<Category>;

impl TreeItem for Category {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }

    fn parent_key(&self) -> Option<CategoryId> {
        self.parent_id
    }
}

/// Nest flat categories into a tree ordered by `sort_order` at every level.
///
/// Categories whose parent is missing from `categories` are returned as roots.
pub fn build_category_tree(categories: Vec<Category>) -> Vec<CategoryTreeNode> {
    build_forest(categories, |category| category.sort_order)
}

/// Returns `true` when making `parent_id` the parent of `category_id` would
/// produce a loop in the hierarchy (including parenting a category to itself).
pub fn creates_cycle(
    categories: &[Category],
    category_id: CategoryId,
    parent_id: CategoryId,
) -> bool {
    let mut current = Some(parent_id);
    let mut steps = 0;
    while let Some(id) = current {
        if id == category_id {
            return true;
        }
        // A pre-existing loop that does not include `category_id`.
        if steps > categories.len() {
            return false;
        }
        steps += 1;
        current = categories
            .iter()
            .find(|category| category.id == id)
            .and_then(|category| category.parent_id);
    }
    false
}
