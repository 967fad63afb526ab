//! Tallies of the end statuses proposed by top-level comments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::yti::comments::localization::{Localizer, localize_resource_status};
use crate::yti::comments::model::Comment;

/// End status value meaning "no opinion"; never counted.
pub const NO_STATUS: &str = "NOSTATUS";

/// Count and share of one end status within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: String,
    pub count: usize,
    /// Share of all counted statuses, one decimal place.
    pub percentage: String,
}

/// Counts each distinct end status among the given comments. Empty statuses
/// and [`NO_STATUS`] are skipped. Results come out ordered by status code and
/// are empty when nothing was counted.
pub fn tally_end_statuses<'a, I>(comments: I) -> Vec<StatusResult>
where
    I: IntoIterator<Item = &'a Comment>,
{
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for comment in comments {
        let Some(status) = comment.end_status.as_deref() else {
            continue;
        };
        if status.is_empty() || status.eq_ignore_ascii_case(NO_STATUS) {
            continue;
        }
        *counts.entry(status).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .map(|(status, count)| StatusResult {
            status: status.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// `count / total` as a percentage with one decimal, halves rounded up.
fn percentage(count: usize, total: usize) -> String {
    let tenths = (count * 2000 / total + 1) / 2;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// One line per status: `<localized status>: <count> (<percentage> %)`.
pub fn results_as_text(
    results: &[StatusResult],
    language: &str,
    localizer: &dyn Localizer,
) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{}: {} ({} %)",
                localize_resource_status(&result.status, language, localizer),
                result.count,
                result.percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_halves_up() {
        assert_eq!(percentage(1, 16), "6.3");
        assert_eq!(percentage(15, 16), "93.8");
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(2, 3), "66.7");
        assert_eq!(percentage(4, 4), "100.0");
        assert_eq!(percentage(1, 8), "12.5");
    }
}
