#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;
use yti_comments::model::{
    Comment, CommentRound, CommentThread, LocalizedText, Organization, RoundStatus, Source,
};
use yti_comments::users::User;

pub const ROUND_ID: Uuid = Uuid::from_u128(0x100);
pub const THREAD_A: Uuid = Uuid::from_u128(0x200);
pub const THREAD_B: Uuid = Uuid::from_u128(0x201);
pub const ALICE: Uuid = Uuid::from_u128(0x300);
pub const GONE: Uuid = Uuid::from_u128(0x399);

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

pub fn text(entries: &[(&str, &str)]) -> LocalizedText {
    entries
        .iter()
        .map(|(code, value)| (code.to_string(), value.to_string()))
        .collect()
}

pub fn users() -> Vec<User> {
    vec![User {
        id: ALICE,
        first_name: Some("Alice".into()),
        last_name: Some("Virtanen".into()),
    }]
}

pub fn comment(
    id: u128,
    thread_id: Uuid,
    parent: Option<u128>,
    created: NaiveDateTime,
    end_status: Option<&str>,
) -> Comment {
    Comment {
        id: Uuid::from_u128(id),
        sequence_id: id as u32,
        thread_id,
        user_id: Some(ALICE),
        content: Some(format!("comment {id}")),
        end_status: end_status.map(str::to_string),
        proposed_status: Some("VALID".into()),
        parent_id: parent.map(Uuid::from_u128),
        uri: Some(format!("https://uri.suomi.fi/comments/round/1/thread/1/comment/{id}")),
        created,
        modified: None,
    }
}

pub fn thread(id: Uuid, created: NaiveDateTime, comments: Vec<Comment>) -> CommentThread {
    CommentThread {
        id,
        sequence_id: 1,
        round_id: ROUND_ID,
        label: text(&[("en", "Municipality"), ("fi", "Kunta")]),
        description: text(&[("fi", "Kuvaus")]),
        local_name: Some("municipality".into()),
        resource_uri: Some(format!("http://uri.suomi.fi/codelist/test/{id}")),
        current_status: Some("DRAFT".into()),
        proposed_status: Some("VALID".into()),
        proposed_text: None,
        user_id: Some(GONE),
        uri: None,
        created,
        comments,
    }
}

pub fn round(threads: Vec<CommentThread>) -> CommentRound {
    CommentRound {
        id: ROUND_ID,
        sequence_id: 1,
        label: text(&[("en", "Spring review"), ("fi", "Kevään kierros")]),
        description: LocalizedText::new(),
        status: RoundStatus::InProgress,
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        end_date: None,
        source: Source {
            container_type: "codelist".into(),
            container_uri: "http://uri.suomi.fi/codelist/test".into(),
            label: text(&[("fi", "Kuntakoodisto")]),
        },
        organizations: vec![Organization {
            id: Uuid::from_u128(0x500),
            pref_label: text(&[("fi", "Tilastokeskus")]),
        }],
        user_id: Some(ALICE),
        uri: Some("https://uri.suomi.fi/comments/round/1".into()),
        created: at(1, 8, 0),
        modified: Some(at(2, 9, 30)),
        threads,
    }
}

/// Round with two threads: A holds a three-level discussion, B one comment.
pub fn discussed_round() -> CommentRound {
    let thread_a = thread(
        THREAD_A,
        at(2, 10, 0),
        vec![
            comment(1, THREAD_A, None, at(3, 10, 0), Some("VALID")),
            comment(2, THREAD_A, Some(1), at(3, 11, 0), Some("DRAFT")),
            comment(3, THREAD_A, Some(2), at(3, 12, 0), None),
            comment(4, THREAD_A, None, at(4, 10, 0), Some("VALID")),
            comment(5, THREAD_A, None, at(5, 10, 0), Some("DRAFT")),
        ],
    );
    let thread_b = thread(
        THREAD_B,
        at(2, 11, 0),
        vec![comment(6, THREAD_B, None, at(3, 9, 0), Some("NOSTATUS"))],
    );
    round(vec![thread_b, thread_a])
}
