use medkb_search::RecommendContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecommendArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

const DEFAULT_RECOMMENDATIONS: usize = 3;

/// Handle `medkb recommend`.
pub fn handle(args: &RecommendArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let context = RecommendContext {
        exclude_ids: args.exclude.clone(),
    };
    let max_results = effective_limit(flags.limit, DEFAULT_RECOMMENDATIONS);

    let recommendations = ctx.ranker.recommend(&args.query, Some(&context), max_results);
    output(&recommendations, flags.format)
}
