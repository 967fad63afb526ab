//! Reconstruction of nested comment trees from the flat comment list of a
//! thread.
//!
//! Comments are grouped into the top-level list and a parent → children index,
//! both ordered by creation time with ties kept in input order. Comments whose
//! parent is not part of the input are unreachable and left out of both.
//! Traversal uses an explicit stack and a visited set, so corrupt or cyclic
//! parent references cannot loop or exhaust the call stack.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::yti::comments::model::Comment;

/// Parent/child view over the comments of a single thread.
#[derive(Debug, Default)]
pub struct CommentTree<'a> {
    top_level: Vec<&'a Comment>,
    children: HashMap<Uuid, Vec<&'a Comment>>,
}

/// A comment reached by [`CommentTree::walk`] with its nesting level.
/// Top-level comments are at level 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEntry<'a> {
    pub comment: &'a Comment,
    pub level: usize,
}

impl<'a> CommentTree<'a> {
    /// Groups the comments in a single pass after a stable sort on creation
    /// time.
    pub fn build<I>(comments: I) -> Self
    where
        I: IntoIterator<Item = &'a Comment>,
    {
        let mut ordered: Vec<&'a Comment> = comments.into_iter().collect();
        ordered.sort_by_key(|comment| comment.created);

        let known: HashSet<Uuid> = ordered.iter().map(|comment| comment.id).collect();

        let mut tree = CommentTree::default();
        for comment in ordered {
            match comment.parent_id {
                None => tree.top_level.push(comment),
                Some(parent) if parent != comment.id && known.contains(&parent) => {
                    tree.children.entry(parent).or_default().push(comment);
                }
                Some(parent) => {
                    debug!(
                        comment = %comment.id,
                        %parent,
                        "comment parent not in thread, skipping"
                    );
                }
            }
        }
        tree
    }

    /// Comments without a parent, oldest first.
    pub fn top_level(&self) -> &[&'a Comment] {
        &self.top_level
    }

    /// Direct replies to the given comment, oldest first.
    pub fn children_of(&self, comment_id: Uuid) -> &[&'a Comment] {
        self.children
            .get(&comment_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Depth-first pre-order listing: each top-level comment followed by its
    /// replies, recursively, every sibling group in creation order.
    pub fn walk(&self) -> Vec<TreeEntry<'a>> {
        let mut entries = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut stack: Vec<TreeEntry<'a>> = self
            .top_level
            .iter()
            .rev()
            .map(|comment| TreeEntry {
                comment: *comment,
                level: 1,
            })
            .collect();

        while let Some(entry) = stack.pop() {
            if !visited.insert(entry.comment.id) {
                continue;
            }
            entries.push(entry);
            for child in self.children_of(entry.comment.id).iter().rev() {
                stack.push(TreeEntry {
                    comment: *child,
                    level: entry.level + 1,
                });
            }
        }

        entries
    }

    /// Deepest nesting level reachable from the top-level comments, 0 when
    /// there are none.
    pub fn max_depth(&self) -> usize {
        self.walk()
            .iter()
            .map(|entry| entry.level)
            .max()
            .unwrap_or(0)
    }
}

/// Ids of the given comment and all replies below it.
pub fn subtree_ids(comments: &[Comment], root: Uuid) -> HashSet<Uuid> {
    let tree = CommentTree::build(comments);
    let mut collected = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !collected.insert(id) {
            continue;
        }
        stack.extend(tree.children_of(id).iter().map(|child| child.id));
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn comment(id: u128, parent: Option<u128>, minute: u32) -> Comment {
        Comment {
            id: Uuid::from_u128(id),
            sequence_id: id as u32,
            thread_id: Uuid::from_u128(999),
            user_id: None,
            content: Some(format!("comment {id}")),
            end_status: None,
            proposed_status: None,
            parent_id: parent.map(Uuid::from_u128),
            uri: None,
            created: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|date| date.and_hms_opt(12, minute, 0))
                .expect("valid timestamp"),
            modified: None,
        }
    }

    fn ids(entries: &[TreeEntry<'_>]) -> Vec<(u128, usize)> {
        entries
            .iter()
            .map(|entry| (entry.comment.id.as_u128(), entry.level))
            .collect()
    }

    #[test]
    fn orders_by_creation_and_keeps_ties_in_input_order() {
        let comments = vec![
            comment(1, None, 10),
            comment(2, None, 5),
            comment(3, None, 5),
            comment(4, Some(2), 30),
            comment(5, Some(2), 20),
        ];
        let tree = CommentTree::build(&comments);

        let top: Vec<u128> = tree.top_level().iter().map(|c| c.id.as_u128()).collect();
        assert_eq!(top, vec![2, 3, 1]);
        let replies: Vec<u128> = tree
            .children_of(Uuid::from_u128(2))
            .iter()
            .map(|c| c.id.as_u128())
            .collect();
        assert_eq!(replies, vec![5, 4]);
    }

    #[test]
    fn walk_emits_depth_first_with_levels() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, None, 1),
            comment(3, Some(1), 2),
            comment(4, Some(3), 3),
            comment(5, Some(1), 4),
        ];
        let tree = CommentTree::build(&comments);

        assert_eq!(
            ids(&tree.walk()),
            vec![(1, 1), (3, 2), (4, 3), (5, 2), (2, 1)]
        );
    }

    #[test]
    fn max_depth_matches_nesting() {
        let empty: Vec<Comment> = Vec::new();
        assert_eq!(CommentTree::build(&empty).max_depth(), 0);

        let flat = vec![comment(1, None, 0), comment(2, None, 1)];
        assert_eq!(CommentTree::build(&flat).max_depth(), 1);

        let chain = vec![
            comment(1, None, 0),
            comment(2, Some(1), 1),
            comment(3, Some(2), 2),
        ];
        assert_eq!(CommentTree::build(&chain).max_depth(), 3);
    }

    #[test]
    fn orphans_are_unreachable() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, Some(1), 1),
            comment(3, Some(42), 2),
        ];
        let tree = CommentTree::build(&comments);

        assert_eq!(ids(&tree.walk()), vec![(1, 1), (2, 2)]);
        assert!(tree.children_of(Uuid::from_u128(42)).is_empty());
    }

    #[test]
    fn cyclic_parents_terminate() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, Some(3), 1),
            comment(3, Some(2), 2),
            comment(4, Some(4), 3),
        ];
        let tree = CommentTree::build(&comments);

        assert_eq!(ids(&tree.walk()), vec![(1, 1)]);
        assert_eq!(tree.max_depth(), 1);
    }

    #[test]
    fn subtree_collects_all_replies() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, Some(1), 1),
            comment(3, Some(2), 2),
            comment(4, None, 3),
        ];
        let subtree = subtree_ids(&comments, Uuid::from_u128(1));

        assert_eq!(subtree.len(), 3);
        assert!(!subtree.contains(&Uuid::from_u128(4)));
    }
}
