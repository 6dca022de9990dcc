use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{EntryArgs, FilterArgs, SuggestArgs};
use crate::commands::shared::filters::to_search_filters;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

const DEFAULT_RELATED: usize = 5;
const DEFAULT_SUGGESTIONS: usize = 8;

/// Handle `medkb show`.
///
/// The view is counted in the loaded snapshot only; the corpus file is not
/// rewritten.
pub fn handle_show(args: &EntryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entry = ctx
        .engine
        .open_entry(&args.id)
        .with_context(|| format!("failed to open entry '{}'", args.id))?;
    output(&entry, flags.format)
}

/// Handle `medkb related`.
pub fn handle_related(
    args: &EntryArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, DEFAULT_RELATED);
    let related = ctx
        .engine
        .related_entries(&args.id, limit)
        .with_context(|| format!("failed to find entries related to '{}'", args.id))?;
    output(&related, flags.format)
}

/// Handle `medkb popular`.
pub fn handle_popular(
    args: &FilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filters = to_search_filters(args)?;
    let limit = effective_limit(flags.limit, ctx.config.search.default_limit);
    let entries = ctx
        .engine
        .popular_entries(&filters, limit)
        .context("failed to list popular entries")?;
    output(&entries, flags.format)
}

/// Handle `medkb suggest`.
pub fn handle_suggest(
    args: &SuggestArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, DEFAULT_SUGGESTIONS);
    let titles = ctx
        .engine
        .suggest(&args.prefix, limit)
        .context("failed to suggest titles")?;
    output(&titles, flags.format)
}
