use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::comment::{Comment, CommentThread};

/// Approved comment as shown to readers, with its replies.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicCommentDto {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub author_name: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub replies: Vec<PublicCommentDto>,
}

impl PublicCommentDto {
    fn new(comment: Comment, replies: Vec<PublicCommentDto>) -> Self {
        Self {
            id: comment.id.get(),
            parent_id: comment.parent_id.map(|id| id.get()),
            author_name: comment.author_name.into_inner(),
            body: comment.body.into_inner(),
            created_at: comment.created_at,
            replies,
        }
    }

    /// Convert reply threads without recursion, keeping sibling order.
    pub fn from_threads(threads: Vec<CommentThread>) -> Vec<Self> {
        // Pre-order: every reply is listed after the comment it answers.
        let mut flat: Vec<(Option<usize>, Comment)> = Vec::new();
        let mut stack: Vec<(Option<usize>, CommentThread)> =
            threads.into_iter().rev().map(|thread| (None, thread)).collect();
        while let Some((parent, thread)) = stack.pop() {
            let position = flat.len();
            flat.push((parent, thread.item));
            stack.extend(
                thread
                    .children
                    .into_iter()
                    .rev()
                    .map(|child| (Some(position), child)),
            );
        }

        let mut replies: Vec<Vec<Self>> = (0..flat.len()).map(|_| Vec::new()).collect();
        let mut roots = Vec::new();
        for (position, (parent, comment)) in flat.into_iter().enumerate().rev() {
            let mut own = std::mem::take(&mut replies[position]);
            own.reverse();
            let dto = Self::new(comment, own);
            match parent {
                Some(parent) => replies[parent].push(dto),
                None => roots.push(dto),
            }
        }
        roots.reverse();
        roots
    }
}
