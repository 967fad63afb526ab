mod common;

use common::*;
use uuid::Uuid;
use yti_comments::CommentsError;
use yti_comments::config::Config;
use yti_comments::export::SPREADSHEET_MIME_TYPE;
use yti_comments::localization::MessageCatalog;
use yti_comments::model::{RoundStatus, Source};
use yti_comments::service::{CommentService, NewComment, NewCommentRound, NewCommentThread};
use yti_comments::store::{CommentStore, InMemoryStore};
use yti_comments::users::InMemoryUserDirectory;

fn service() -> CommentService<InMemoryStore> {
    CommentService::new(
        InMemoryStore::new(vec![discussed_round()]),
        Box::new(InMemoryUserDirectory::new(users())),
        Box::new(MessageCatalog::builtin("en")),
        Config::default(),
    )
    .expect("service built")
}

#[test]
fn unknown_round_is_not_found() {
    let error = service()
        .export_round(Uuid::from_u128(0xdead), None)
        .expect_err("unknown round");
    assert!(matches!(error, CommentsError::NotFound { .. }));
    assert_eq!(error.status_code(), 404);
}

#[test]
fn unknown_thread_results_are_not_found() {
    let error = service()
        .thread_results(Uuid::from_u128(0xdead))
        .expect_err("unknown thread");
    assert_eq!(error.status_code(), 404);
}

#[test]
fn reply_to_foreign_comment_is_rejected() {
    let mut service = service();
    let error = service
        .add_comment(
            THREAD_B,
            NewComment {
                content: Some("misplaced".into()),
                parent_id: Some(Uuid::from_u128(1)),
                ..NewComment::default()
            },
        )
        .expect_err("parent lives in thread A");
    assert!(matches!(error, CommentsError::NotAcceptable(_)));
    assert_eq!(error.status_code(), 406);
}

#[test]
fn export_round_returns_xlsx_document() {
    let document = service()
        .export_round(ROUND_ID, Some("fi"))
        .expect("round exported");
    assert_eq!(document.mime_type, SPREADSHEET_MIME_TYPE);
    // xlsx files are zip archives.
    assert!(document.bytes.starts_with(b"PK"));
}

#[test]
fn results_text_uses_requested_language() {
    let service = service();
    assert_eq!(
        service
            .thread_results_text(THREAD_A, Some("fi"))
            .expect("results text"),
        "Luonnos: 1 (33.3 %)\nVoimassa oleva: 2 (66.7 %)"
    );
    assert_eq!(
        service.thread_results_text(THREAD_B, None).expect("results text"),
        ""
    );
}

#[test]
fn deleting_a_comment_removes_its_replies() {
    let mut service = service();
    let removed = service
        .delete_comment(THREAD_A, Uuid::from_u128(1))
        .expect("comment deleted");
    assert_eq!(removed, 3);

    let remaining: Vec<Uuid> = service
        .find_thread(THREAD_A)
        .expect("thread A present")
        .comments
        .iter()
        .map(|comment| comment.id)
        .collect();
    assert_eq!(remaining, vec![Uuid::from_u128(4), Uuid::from_u128(5)]);

    let error = service
        .delete_comment(THREAD_A, Uuid::from_u128(1))
        .expect_err("already deleted");
    assert_eq!(error.status_code(), 404);
}

#[test]
fn new_round_collects_threads_and_comments() {
    let mut service = service();
    let round = service
        .create_round(NewCommentRound {
            label: text(&[("en", "Autumn review")]),
            source: Source {
                container_type: "terminology".into(),
                container_uri: "http://uri.suomi.fi/terminology/test".into(),
                ..Source::default()
            },
            user_id: Some(ALICE),
            ..NewCommentRound::default()
        })
        .expect("round created");
    assert_eq!(round.sequence_id, 2);
    assert_eq!(round.status, RoundStatus::Incomplete);
    assert_eq!(round.uri.as_deref(), Some("https://uri.suomi.fi/comments/round/2"));

    let thread = service
        .add_thread(
            round.id,
            NewCommentThread {
                label: text(&[("en", "Concept")]),
                ..NewCommentThread::default()
            },
        )
        .expect("thread added");
    let top = service
        .add_comment(
            thread.id,
            NewComment {
                end_status: Some("VALID".into()),
                user_id: Some(ALICE),
                ..NewComment::default()
            },
        )
        .expect("comment added");
    let reply = service
        .add_comment(
            thread.id,
            NewComment {
                parent_id: Some(top.id),
                end_status: Some("DRAFT".into()),
                ..NewComment::default()
            },
        )
        .expect("reply added");
    assert_eq!(reply.sequence_id, 2);
    assert_eq!(
        reply.uri.as_deref(),
        Some("https://uri.suomi.fi/comments/round/2/thread/1/comment/2")
    );

    service
        .update_round_status(round.id, RoundStatus::Ended)
        .expect("status updated");
    assert_eq!(
        service.find_round(round.id).expect("round present").status,
        RoundStatus::Ended
    );

    let results = service.thread_results(thread.id).expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].percentage, "100.0");

    assert_eq!(service.store().top_level_comments(thread.id).len(), 1);
    service.delete_round(round.id).expect("round deleted");
    assert!(service.store().find_round(round.id).is_none());
}
