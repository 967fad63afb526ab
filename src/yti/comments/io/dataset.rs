use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::yti::comments::error::{CommentsError, Result};
use crate::yti::comments::model::CommentRound;
use crate::yti::comments::users::User;

/// Rounds with their threads and comments, plus the users they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub rounds: Vec<CommentRound>,
    #[serde(default)]
    pub users: Vec<User>,
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(CommentsError::MissingInput(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&source)?;
    report_misplaced(&dataset);
    info!(
        round_count = dataset.rounds.len(),
        user_count = dataset.users.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Threads and comments nested under a parent they do not reference are
/// kept where they are, but reported.
fn report_misplaced(dataset: &Dataset) {
    for round in &dataset.rounds {
        for thread in &round.threads {
            if thread.round_id != round.id {
                warn!(thread = %thread.id, round = %round.id, "thread nested under another round");
            }
            for comment in &thread.comments {
                if comment.thread_id != thread.id {
                    warn!(
                        comment = %comment.id,
                        thread = %thread.id,
                        "comment nested under another thread"
                    );
                }
            }
        }
    }
}
