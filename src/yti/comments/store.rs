//! Persistence boundary for rounds, threads and comments.

use uuid::Uuid;

use crate::yti::comments::model::{Comment, CommentRound, CommentThread};

/// Storage of comment rounds with their threads and comments resolved.
pub trait CommentStore {
    fn rounds(&self) -> Vec<&CommentRound>;

    fn find_round(&self, round_id: Uuid) -> Option<&CommentRound>;

    fn find_round_mut(&mut self, round_id: Uuid) -> Option<&mut CommentRound>;

    fn insert_round(&mut self, round: CommentRound);

    fn remove_round(&mut self, round_id: Uuid) -> Option<CommentRound>;

    fn find_thread(&self, thread_id: Uuid) -> Option<&CommentThread> {
        self.rounds()
            .into_iter()
            .flat_map(|round| round.threads.iter())
            .find(|thread| thread.id == thread_id)
    }

    fn find_thread_mut(&mut self, thread_id: Uuid) -> Option<&mut CommentThread>;

    /// Threads of a round, oldest first.
    fn threads_by_round(&self, round_id: Uuid) -> Vec<&CommentThread> {
        self.find_round(round_id)
            .map(CommentRound::threads_by_created)
            .unwrap_or_default()
    }

    /// Comments of a thread, oldest first.
    fn comments_by_thread(&self, thread_id: Uuid) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self
            .find_thread(thread_id)
            .map(|thread| thread.comments.iter().collect())
            .unwrap_or_default();
        comments.sort_by_key(|comment| comment.created);
        comments
    }

    fn top_level_comments(&self, thread_id: Uuid) -> Vec<&Comment> {
        self.comments_by_thread(thread_id)
            .into_iter()
            .filter(|comment| comment.is_top_level())
            .collect()
    }

    /// Next free round sequence number.
    fn next_round_sequence(&self) -> u32 {
        self.rounds()
            .iter()
            .map(|round| round.sequence_id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Store keeping every round in memory, seeded from a dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rounds: Vec<CommentRound>,
}

impl InMemoryStore {
    pub fn new(rounds: Vec<CommentRound>) -> Self {
        Self { rounds }
    }
}

impl CommentStore for InMemoryStore {
    fn rounds(&self) -> Vec<&CommentRound> {
        self.rounds.iter().collect()
    }

    fn find_round(&self, round_id: Uuid) -> Option<&CommentRound> {
        self.rounds.iter().find(|round| round.id == round_id)
    }

    fn find_round_mut(&mut self, round_id: Uuid) -> Option<&mut CommentRound> {
        self.rounds.iter_mut().find(|round| round.id == round_id)
    }

    fn insert_round(&mut self, round: CommentRound) {
        self.rounds.push(round);
    }

    fn remove_round(&mut self, round_id: Uuid) -> Option<CommentRound> {
        let index = self.rounds.iter().position(|round| round.id == round_id)?;
        Some(self.rounds.remove(index))
    }

    fn find_thread_mut(&mut self, thread_id: Uuid) -> Option<&mut CommentThread> {
        self.rounds
            .iter_mut()
            .flat_map(|round| round.threads.iter_mut())
            .find(|thread| thread.id == thread_id)
    }
}
