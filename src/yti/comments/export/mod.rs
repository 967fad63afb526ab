//! Layout of a comment round as a three-sheet workbook.
//!
//! The renderer only produces [`WorkbookData`]; turning it into an xlsx file
//! is left to [`crate::io::excel_write`]. The language and all formatting
//! settings are passed in on every call, so one renderer can serve concurrent
//! exports.

pub mod format;

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::yti::comments::config::ExportSettings;
use crate::yti::comments::localization::{
    Localizer, MessageKey, localize_resource_status, localize_round_status, localize_source_type,
};
use crate::yti::comments::model::{CommentRound, CommentThread};
use crate::yti::comments::results::{results_as_text, tally_end_statuses};
use crate::yti::comments::store::CommentStore;
use crate::yti::comments::tree::CommentTree;
use crate::yti::comments::users::{UserDirectory, display_name};

use self::format::{
    format_date, format_resource_label, format_timestamp, localized_value, localized_value_marked,
    organization_names, sanitize_sheet_name, text_or_empty,
};

/// MIME type of the exported document.
pub const SPREADSHEET_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Columns of the comment sheet before the reply-level columns.
pub const COMMENT_SHEET_PREFIX_COLUMNS: usize = 3;
/// Columns of the comment sheet after the reply-level columns.
pub const COMMENT_SHEET_TRAILING_COLUMNS: usize = 5;

const MIN_COLUMN_WIDTH: f64 = 8.0;
const COLUMN_PADDING: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    #[default]
    Normal,
    /// Thread row opening a group in the comment sheet; its first cell is
    /// bold.
    GroupHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<String>,
    pub style: RowStyle,
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<SheetRow>,
    /// Filled in by [`SheetTable::autosize`]; one entry per column.
    pub column_widths: Vec<f64>,
}

impl SheetTable {
    fn new(sheet_name: String, columns: Vec<String>) -> Self {
        Self {
            sheet_name,
            columns,
            rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    fn blank_row(&self) -> Vec<String> {
        vec![String::new(); self.columns.len()]
    }

    fn push_row(&mut self, cells: Vec<String>, style: RowStyle) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(SheetRow { cells, style });
    }

    /// Sizes each column to its longest line, capped at `max_width`.
    fn autosize(&mut self, max_width: f64) {
        let mut widths = vec![0usize; self.columns.len()];
        let all_rows = std::iter::once(self.columns.as_slice())
            .chain(self.rows.iter().map(|row| row.cells.as_slice()));
        for cells in all_rows {
            for (index, cell) in cells.iter().enumerate() {
                let longest = cell.lines().map(|line| line.chars().count()).max().unwrap_or(0);
                if let Some(width) = widths.get_mut(index) {
                    *width = (*width).max(longest);
                }
            }
        }

        self.column_widths = widths
            .into_iter()
            .enumerate()
            .map(|(index, chars)| {
                let natural = (chars as f64 + COLUMN_PADDING).max(MIN_COLUMN_WIDTH);
                if natural > max_width {
                    trace!(
                        sheet = %self.sheet_name,
                        column = index,
                        natural,
                        max_width,
                        "capping column width"
                    );
                }
                natural.min(max_width)
            })
            .collect();
    }
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

/// Renders comment rounds into [`WorkbookData`]. Threads and comments are
/// read through the store, so their ordering is the store's.
pub struct ExportRenderer<'a> {
    store: &'a dyn CommentStore,
    localizer: &'a dyn Localizer,
    users: &'a dyn UserDirectory,
    settings: &'a ExportSettings,
}

impl<'a> ExportRenderer<'a> {
    pub fn new(
        store: &'a dyn CommentStore,
        localizer: &'a dyn Localizer,
        users: &'a dyn UserDirectory,
        settings: &'a ExportSettings,
    ) -> Self {
        Self {
            store,
            localizer,
            users,
            settings,
        }
    }

    /// Round metadata, thread listing and comment tree sheets, in that order.
    #[instrument(level = "debug", skip_all, fields(round = %round.id, language = %language))]
    pub fn render(&self, round: &CommentRound, language: &str) -> WorkbookData {
        let threads = self.store.threads_by_round(round.id);
        let mut sheet_names = SheetNameRegistry::default();

        let mut tables = vec![
            self.round_sheet(&mut sheet_names, round, language),
            self.thread_sheet(&mut sheet_names, &threads, language),
            self.comment_sheet(&mut sheet_names, &threads, language),
        ];
        for table in &mut tables {
            table.autosize(self.settings.max_column_width);
        }

        debug!(thread_count = threads.len(), "comment round laid out");
        WorkbookData { tables }
    }

    fn message(&self, key: MessageKey, language: &str) -> String {
        self.localizer.message(key, language)
    }

    fn headers(&self, keys: &[MessageKey], language: &str) -> Vec<String> {
        keys.iter().map(|key| self.message(*key, language)).collect()
    }

    fn user_name(&self, user_id: Option<uuid::Uuid>, language: &str) -> String {
        display_name(self.users, user_id, language, self.localizer)
    }

    fn resource_status(&self, status: Option<&str>, language: &str) -> String {
        status
            .map(|status| localize_resource_status(status, language, self.localizer))
            .unwrap_or_default()
    }

    fn timestamp(&self, timestamp: Option<chrono::NaiveDateTime>) -> String {
        format_timestamp(timestamp, self.settings.timezone)
    }

    fn round_sheet(
        &self,
        sheet_names: &mut SheetNameRegistry,
        round: &CommentRound,
        language: &str,
    ) -> SheetTable {
        use MessageKey::*;

        let fallbacks = &self.settings.language_fallbacks;
        let name = sheet_names.assign(&self.message(RoundSheet, language));
        let columns = self.headers(
            &[
                Label,
                Description,
                Status,
                Uri,
                Author,
                Organizations,
                SourceLabel,
                SourceType,
                SourceUri,
                StartDate,
                EndDate,
                Created,
                Modified,
            ],
            language,
        );
        let mut table = SheetTable::new(name, columns);

        let cells = vec![
            localized_value(&round.label, language, fallbacks)
                .unwrap_or_default()
                .to_string(),
            localized_value(&round.description, language, fallbacks)
                .unwrap_or_default()
                .to_string(),
            localize_round_status(round.status, language, self.localizer),
            text_or_empty(round.uri.as_deref()),
            self.user_name(round.user_id, language),
            organization_names(&round.organizations, language, fallbacks),
            localized_value_marked(&round.source.label, language, fallbacks),
            localize_source_type(&round.source.container_type, language, self.localizer),
            round.source.container_uri.clone(),
            format_date(round.start_date),
            format_date(round.end_date),
            self.timestamp(Some(round.created)),
            self.timestamp(round.modified),
        ];
        table.push_row(cells, RowStyle::Normal);
        table
    }

    fn thread_sheet(
        &self,
        sheet_names: &mut SheetNameRegistry,
        threads: &[&CommentThread],
        language: &str,
    ) -> SheetTable {
        use MessageKey::*;

        let name = sheet_names.assign(&self.message(ThreadSheet, language));
        let columns = self.headers(
            &[
                Resource,
                LocalName,
                ResourceDescription,
                ResourceUri,
                CommentCount,
                Results,
                CurrentStatus,
                ProposedStatus,
                ProposedText,
                Created,
                Author,
            ],
            language,
        );
        let mut table = SheetTable::new(name, columns);

        for thread in threads {
            let top_level = self.store.top_level_comments(thread.id);
            let results = tally_end_statuses(top_level.iter().copied());
            let cells = vec![
                format_resource_label(&thread.label, None),
                text_or_empty(thread.local_name.as_deref()),
                format_resource_label(&thread.description, None),
                text_or_empty(thread.resource_uri.as_deref()),
                top_level.len().to_string(),
                results_as_text(&results, language, self.localizer),
                self.resource_status(thread.current_status.as_deref(), language),
                self.resource_status(thread.proposed_status.as_deref(), language),
                text_or_empty(thread.proposed_text.as_deref()),
                self.timestamp(Some(thread.created)),
                self.user_name(thread.user_id, language),
            ];
            table.push_row(cells, RowStyle::Normal);
        }
        table
    }

    fn comment_sheet(
        &self,
        sheet_names: &mut SheetNameRegistry,
        threads: &[&CommentThread],
        language: &str,
    ) -> SheetTable {
        use MessageKey::*;

        let trees: Vec<(&CommentThread, CommentTree<'_>)> = threads
            .iter()
            .map(|thread| {
                let comments = self.store.comments_by_thread(thread.id);
                (*thread, CommentTree::build(comments))
            })
            .collect();

        // Computed over the whole round up front; a round without comments
        // still gets one comment column.
        let max_depth = trees
            .iter()
            .map(|(_, tree)| tree.max_depth())
            .max()
            .unwrap_or(0)
            .max(1);

        let name = sheet_names.assign(&self.message(CommentSheet, language));
        let mut columns = self.headers(&[Resource, Author, Comment], language);
        let level_label = self.message(Level, language);
        columns.extend((2..=max_depth).map(|level| format!("{level_label} {level}")));
        columns.extend(self.headers(
            &[ResourceProposedStatus, Created, Modified, CommentUri, ResourceUri],
            language,
        ));
        debug_assert_eq!(
            columns.len(),
            COMMENT_SHEET_PREFIX_COLUMNS + (max_depth - 1) + COMMENT_SHEET_TRAILING_COLUMNS
        );
        let mut table = SheetTable::new(name, columns);

        let trailing = 2 + max_depth;
        let resource_uri_column = table.columns.len() - 1;

        for (index, (thread, tree)) in trees.iter().enumerate() {
            if index > 0 {
                let separator = table.blank_row();
                table.push_row(separator, RowStyle::Normal);
            }
            let mut group = table.blank_row();
            group[0] = format_resource_label(&thread.label, thread.local_name.as_deref());
            group[resource_uri_column] = text_or_empty(thread.resource_uri.as_deref());
            table.push_row(group, RowStyle::GroupHeader);

            for entry in tree.walk() {
                let comment = entry.comment;
                let mut cells = table.blank_row();
                cells[1] = self.user_name(comment.user_id, language);
                cells[1 + entry.level] = text_or_empty(comment.content.as_deref());
                if entry.level == 1 {
                    cells[trailing] =
                        self.resource_status(comment.proposed_status.as_deref(), language);
                }
                cells[trailing + 1] = self.timestamp(Some(comment.created));
                cells[trailing + 2] = self.timestamp(comment.modified);
                cells[trailing + 3] = text_or_empty(comment.uri.as_deref());
                cells[trailing + 4] = text_or_empty(thread.resource_uri.as_deref());
                table.push_row(cells, RowStyle::Normal);
            }
        }

        debug!(max_depth, rows = table.rows.len(), "comment sheet laid out");
        table
    }
}

/// Hands out sheet names that are valid and unique within one workbook.
#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let prefix: String = base.chars().take(31 - suffix.len()).collect();
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}
