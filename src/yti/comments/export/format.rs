//! Cell text formatting for the export sheets.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::yti::comments::model::{LocalizedText, Organization};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_FORMAT_WITH_MINUTES: &str = "%d/%m/%Y %H:%M";

/// Rendered in place of the organization list when a round has none.
pub const NO_ORGANIZATIONS: &str = "-";

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Formats a UTC timestamp in the export timezone with minute precision.
pub fn format_timestamp(timestamp: Option<NaiveDateTime>, timezone: Tz) -> String {
    timestamp
        .map(|utc| {
            timezone
                .from_utc_datetime(&utc)
                .format(DATE_FORMAT_WITH_MINUTES)
                .to_string()
        })
        .unwrap_or_default()
}

pub fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Picks the text in `language`, then in the fallback order, then any
/// non-empty text.
pub fn localized_value<'a>(
    text: &'a LocalizedText,
    language: &str,
    fallbacks: &[String],
) -> Option<&'a str> {
    non_empty(text, language)
        .or_else(|| fallbacks.iter().find_map(|code| non_empty(text, code)))
        .or_else(|| text.values().map(String::as_str).find(|value| !value.is_empty()))
}

fn non_empty<'a>(text: &'a LocalizedText, language: &str) -> Option<&'a str> {
    text.get(language)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Like [`localized_value`], but a text taken from another language is
/// suffixed with that language code in parentheses.
pub fn localized_value_marked(
    text: &LocalizedText,
    language: &str,
    fallbacks: &[String],
) -> String {
    if let Some(value) = text.get(language).filter(|value| !value.is_empty()) {
        return value.clone();
    }
    fallbacks
        .iter()
        .map(String::as_str)
        .chain(text.keys().map(String::as_str))
        .find_map(|code| {
            text.get(code)
                .filter(|value| !value.is_empty())
                .map(|value| format!("{value}({code})"))
        })
        .unwrap_or_default()
}

/// Comma-joined organization names, [`NO_ORGANIZATIONS`] when there are none.
pub fn organization_names(
    organizations: &[Organization],
    language: &str,
    fallbacks: &[String],
) -> String {
    if organizations.is_empty() {
        return NO_ORGANIZATIONS.to_string();
    }
    organizations
        .iter()
        .map(|organization| {
            localized_value(&organization.pref_label, language, fallbacks).unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `LANG: text` line per language, followed by the local name when given.
pub fn format_resource_label(label: &LocalizedText, local_name: Option<&str>) -> String {
    let mut lines: Vec<String> = label
        .iter()
        .map(|(language, text)| format!("{}: {text}", language.to_uppercase()))
        .collect();
    if let Some(local_name) = local_name {
        lines.push(format!("localName: {local_name}"));
    }
    lines.join("\n")
}

/// Applies Excel's sheet naming rules: no `: \ / ? * [ ] ' "`, no control
/// characters, at most 31 characters, never empty.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let trimmed: String = sanitized.trim().chars().take(31).collect();
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn text(entries: &[(&str, &str)]) -> LocalizedText {
        entries
            .iter()
            .map(|(code, value)| (code.to_string(), value.to_string()))
            .collect()
    }

    fn fallbacks() -> Vec<String> {
        vec!["fi".to_string(), "en".to_string()]
    }

    #[test]
    fn timestamps_shift_into_export_zone() {
        let utc = NaiveDate::from_ymd_opt(2024, 6, 30)
            .and_then(|date| date.and_hms_opt(22, 15, 40))
            .expect("valid timestamp");

        assert_eq!(
            format_timestamp(Some(utc), chrono_tz::Europe::Helsinki),
            "01/07/2024 01:15"
        );
        assert_eq!(format_timestamp(None, chrono_tz::Europe::Helsinki), "");
    }

    #[test]
    fn organization_label_falls_back_to_other_language() {
        let organizations = vec![
            Organization {
                id: Uuid::from_u128(1),
                pref_label: text(&[("fi", "Digi- ja väestötietovirasto")]),
            },
            Organization {
                id: Uuid::from_u128(2),
                pref_label: text(&[("en", "Statistics Finland"), ("fi", "Tilastokeskus")]),
            },
        ];

        assert_eq!(
            organization_names(&organizations, "en", &fallbacks()),
            "Digi- ja väestötietovirasto, Statistics Finland"
        );
        assert_eq!(organization_names(&[], "en", &fallbacks()), NO_ORGANIZATIONS);
    }

    #[test]
    fn marked_value_names_the_language_used() {
        let label = text(&[("sv", "Kodlista")]);
        assert_eq!(localized_value_marked(&label, "en", &fallbacks()), "Kodlista(sv)");
        assert_eq!(localized_value_marked(&label, "sv", &fallbacks()), "Kodlista");
    }

    #[test]
    fn resource_label_lists_languages() {
        let label = text(&[("fi", "Kunta"), ("en", "Municipality")]);
        assert_eq!(
            format_resource_label(&label, Some("municipality")),
            "EN: Municipality\nFI: Kunta\nlocalName: municipality"
        );
    }

    #[test]
    fn sheet_names_follow_excel_rules() {
        assert_eq!(sanitize_sheet_name("Round: 2024/1"), "Round_ 2024_1");
        assert_eq!(sanitize_sheet_name("   "), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);
    }
}
