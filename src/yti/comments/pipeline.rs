use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::yti::comments::config::Config;
use crate::yti::comments::error::Result;
use crate::yti::comments::export::SheetTable;
use crate::yti::comments::ids::parse_uuid;
use crate::yti::comments::io::dataset::{self, Dataset};
use crate::yti::comments::io::excel_read;
use crate::yti::comments::localization::MessageCatalog;
use crate::yti::comments::results::StatusResult;
use crate::yti::comments::service::CommentService;
use crate::yti::comments::store::InMemoryStore;
use crate::yti::comments::users::InMemoryUserDirectory;

/// Builds a service over an in-memory copy of the dataset.
pub fn service_for_dataset(
    dataset: Dataset,
    catalog: MessageCatalog,
    config: Config,
) -> Result<CommentService<InMemoryStore>> {
    CommentService::new(
        InMemoryStore::new(dataset.rounds),
        Box::new(InMemoryUserDirectory::new(dataset.users)),
        Box::new(catalog),
        config,
    )
}

/// Exports one round of a JSON dataset as an xlsx workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), round = %round, ?language)
)]
pub fn export_round_to_file(
    input: &Path,
    round: &str,
    language: Option<&str>,
    output: &Path,
    catalog: MessageCatalog,
    config: Config,
) -> Result<()> {
    let round_id = parse_uuid(round)?;
    let dataset = dataset::load_dataset(input)?;
    let service = service_for_dataset(dataset, catalog, config)?;
    let document = service.export_round(round_id, language)?;
    fs::write(output, &document.bytes)?;
    info!(size = document.bytes.len(), "workbook written");
    Ok(())
}

/// Result records of one thread plus their text summary.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), thread = %thread, ?language)
)]
pub fn thread_results(
    input: &Path,
    thread: &str,
    language: Option<&str>,
    catalog: MessageCatalog,
    config: Config,
) -> Result<(Vec<StatusResult>, String)> {
    let thread_id = parse_uuid(thread)?;
    let dataset = dataset::load_dataset(input)?;
    let service = service_for_dataset(dataset, catalog, config)?;
    let results = service.thread_results(thread_id)?;
    let text = service.thread_results_text(thread_id, language)?;
    info!(status_count = results.len(), "thread results computed");
    Ok((results, text))
}

/// Reads an exported workbook back as tables.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn inspect_workbook(input: &Path) -> Result<Vec<SheetTable>> {
    let tables = excel_read::read_tables(input)?;
    info!(sheet_count = tables.len(), "workbook read");
    Ok(tables)
}
