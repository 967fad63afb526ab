//! Operations behind the comment round API.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::yti::comments::config::{Config, ExportSettings};
use crate::yti::comments::error::{CommentsError, Result};
use crate::yti::comments::export::{ExportRenderer, SPREADSHEET_MIME_TYPE};
use crate::yti::comments::io::excel_write;
use crate::yti::comments::localization::Localizer;
use crate::yti::comments::model::{
    Comment, CommentRound, CommentThread, LocalizedText, Organization, RoundStatus, Source,
};
use crate::yti::comments::results::{StatusResult, results_as_text, tally_end_statuses};
use crate::yti::comments::store::CommentStore;
use crate::yti::comments::tree::subtree_ids;
use crate::yti::comments::urls::UrlGenerator;
use crate::yti::comments::users::UserDirectory;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentRound {
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub source: Source,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentThread {
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub proposed_status: Option<String>,
    #[serde(default)]
    pub proposed_text: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub end_status: Option<String>,
    #[serde(default)]
    pub proposed_status: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// An export ready to be returned as a response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Comment round operations over a store and its collaborators.
pub struct CommentService<S> {
    store: S,
    users: Box<dyn UserDirectory>,
    localizer: Box<dyn Localizer>,
    config: Config,
    export_settings: ExportSettings,
    urls: UrlGenerator,
}

impl<S: CommentStore> CommentService<S> {
    pub fn new(
        store: S,
        users: Box<dyn UserDirectory>,
        localizer: Box<dyn Localizer>,
        config: Config,
    ) -> Result<Self> {
        let export_settings = config.export_settings()?;
        let urls = UrlGenerator::new(&config);
        Ok(Self {
            store,
            users,
            localizer,
            config,
            export_settings,
            urls,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find_round(&self, round_id: Uuid) -> Result<&CommentRound> {
        self.store
            .find_round(round_id)
            .ok_or_else(|| CommentsError::not_found("comment round", round_id))
    }

    pub fn find_thread(&self, thread_id: Uuid) -> Result<&CommentThread> {
        self.store
            .find_thread(thread_id)
            .ok_or_else(|| CommentsError::not_found("comment thread", thread_id))
    }

    #[instrument(level = "info", skip_all)]
    pub fn create_round(&mut self, new_round: NewCommentRound) -> Result<CommentRound> {
        let now = now();
        let sequence_id = self.store.next_round_sequence();
        let round = CommentRound {
            id: Uuid::new_v4(),
            sequence_id,
            label: new_round.label,
            description: new_round.description,
            status: RoundStatus::default(),
            start_date: new_round.start_date,
            end_date: new_round.end_date,
            source: new_round.source,
            organizations: new_round.organizations,
            user_id: new_round.user_id,
            uri: Some(self.urls.round_uri(sequence_id)),
            created: now,
            modified: Some(now),
            threads: Vec::new(),
        };
        info!(round = %round.id, sequence_id, "comment round created");
        self.store.insert_round(round.clone());
        Ok(round)
    }

    #[instrument(level = "info", skip(self, status), fields(status = status.code()))]
    pub fn update_round_status(&mut self, round_id: Uuid, status: RoundStatus) -> Result<()> {
        let round = self
            .store
            .find_round_mut(round_id)
            .ok_or_else(|| CommentsError::not_found("comment round", round_id))?;
        round.status = status;
        round.modified = Some(now());
        Ok(())
    }

    #[instrument(level = "info", skip(self, new_thread))]
    pub fn add_thread(
        &mut self,
        round_id: Uuid,
        new_thread: NewCommentThread,
    ) -> Result<CommentThread> {
        let round = self
            .store
            .find_round_mut(round_id)
            .ok_or_else(|| CommentsError::not_found("comment round", round_id))?;

        let sequence_id = next_sequence(round.threads.iter().map(|thread| thread.sequence_id));
        let thread = CommentThread {
            id: Uuid::new_v4(),
            sequence_id,
            round_id,
            label: new_thread.label,
            description: new_thread.description,
            local_name: new_thread.local_name,
            resource_uri: new_thread.resource_uri,
            current_status: new_thread.current_status,
            proposed_status: new_thread.proposed_status,
            proposed_text: new_thread.proposed_text,
            user_id: new_thread.user_id,
            uri: Some(self.urls.thread_uri(round.sequence_id, sequence_id)),
            created: now(),
            comments: Vec::new(),
        };
        round.threads.push(thread.clone());
        round.modified = Some(thread.created);
        debug!(thread = %thread.id, sequence_id, "comment thread added");
        Ok(thread)
    }

    /// Adds a comment; a reply must point at a comment of the same thread.
    #[instrument(level = "info", skip(self, new_comment))]
    pub fn add_comment(&mut self, thread_id: Uuid, new_comment: NewComment) -> Result<Comment> {
        let round_sequence = {
            let thread = self.find_thread(thread_id)?;
            self.find_round(thread.round_id)?.sequence_id
        };
        let thread = self
            .store
            .find_thread_mut(thread_id)
            .ok_or_else(|| CommentsError::not_found("comment thread", thread_id))?;

        if let Some(parent_id) = new_comment.parent_id {
            if thread.find_comment(parent_id).is_none() {
                return Err(CommentsError::NotAcceptable(format!(
                    "parent comment {parent_id} does not belong to thread {thread_id}"
                )));
            }
        }

        let sequence_id = next_sequence(thread.comments.iter().map(|comment| comment.sequence_id));
        let comment = Comment {
            id: Uuid::new_v4(),
            sequence_id,
            thread_id,
            user_id: new_comment.user_id,
            content: new_comment.content,
            end_status: new_comment.end_status,
            proposed_status: new_comment.proposed_status,
            parent_id: new_comment.parent_id,
            uri: Some(
                self.urls
                    .comment_uri(round_sequence, thread.sequence_id, sequence_id),
            ),
            created: now(),
            modified: None,
        };
        thread.comments.push(comment.clone());
        debug!(comment = %comment.id, sequence_id, "comment added");
        Ok(comment)
    }

    #[instrument(level = "info", skip(self))]
    pub fn delete_round(&mut self, round_id: Uuid) -> Result<CommentRound> {
        self.store
            .remove_round(round_id)
            .ok_or_else(|| CommentsError::not_found("comment round", round_id))
    }

    #[instrument(level = "info", skip(self))]
    pub fn delete_thread(&mut self, thread_id: Uuid) -> Result<CommentThread> {
        let round_id = self.find_thread(thread_id)?.round_id;
        let round = self
            .store
            .find_round_mut(round_id)
            .ok_or_else(|| CommentsError::not_found("comment round", round_id))?;
        let index = round
            .threads
            .iter()
            .position(|thread| thread.id == thread_id)
            .ok_or_else(|| CommentsError::not_found("comment thread", thread_id))?;
        Ok(round.threads.remove(index))
    }

    /// Removes a comment together with every reply below it. Returns the
    /// number of comments removed.
    #[instrument(level = "info", skip(self))]
    pub fn delete_comment(&mut self, thread_id: Uuid, comment_id: Uuid) -> Result<usize> {
        let thread = self
            .store
            .find_thread_mut(thread_id)
            .ok_or_else(|| CommentsError::not_found("comment thread", thread_id))?;
        if thread.find_comment(comment_id).is_none() {
            return Err(CommentsError::not_found("comment", comment_id));
        }

        let doomed = subtree_ids(&thread.comments, comment_id);
        let before = thread.comments.len();
        thread.comments.retain(|comment| !doomed.contains(&comment.id));
        let removed = before - thread.comments.len();
        debug!(removed, "comment subtree deleted");
        Ok(removed)
    }

    /// End status tally over the top-level comments of a thread.
    pub fn thread_results(&self, thread_id: Uuid) -> Result<Vec<StatusResult>> {
        self.find_thread(thread_id)?;
        let top_level = self.store.top_level_comments(thread_id);
        Ok(tally_end_statuses(top_level))
    }

    pub fn thread_results_text(&self, thread_id: Uuid, language: Option<&str>) -> Result<String> {
        let results = self.thread_results(thread_id)?;
        let language = self.config.resolve_language(language);
        Ok(results_as_text(&results, language, self.localizer.as_ref()))
    }

    /// Renders the round as an xlsx document.
    #[instrument(level = "info", skip(self))]
    pub fn export_round(&self, round_id: Uuid, language: Option<&str>) -> Result<ExportDocument> {
        let round = self.find_round(round_id)?;
        let language = self.config.resolve_language(language);
        let renderer = ExportRenderer::new(
            &self.store,
            self.localizer.as_ref(),
            self.users.as_ref(),
            &self.export_settings,
        );
        let workbook = renderer.render(round, language);
        let bytes = excel_write::workbook_to_bytes(&workbook)?;
        info!(size = bytes.len(), "comment round exported");
        Ok(ExportDocument {
            bytes,
            mime_type: SPREADSHEET_MIME_TYPE,
        })
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn next_sequence(existing: impl Iterator<Item = u32>) -> u32 {
    existing.max().map_or(1, |max| max + 1)
}
