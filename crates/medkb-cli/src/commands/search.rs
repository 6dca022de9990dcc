use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::filters::to_search_filters;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `medkb search`.
pub fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filters = to_search_filters(&args.filters)?;
    let limit = effective_limit(flags.limit, ctx.config.search.default_limit);

    let results = ctx.engine.search(&args.query, &filters, limit);
    output(&results, flags.format)
}
