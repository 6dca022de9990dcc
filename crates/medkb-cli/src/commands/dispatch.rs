use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => commands::search::handle(args, ctx, flags),
        Commands::Check(args) => commands::check::handle(args, ctx, flags),
        Commands::Recommend(args) => commands::recommend::handle(args, ctx, flags),
        Commands::Show(args) => commands::entry::handle_show(args, ctx, flags),
        Commands::Related(args) => commands::entry::handle_related(args, ctx, flags),
        Commands::Popular(args) => commands::entry::handle_popular(args, ctx, flags),
        Commands::Suggest(args) => commands::entry::handle_suggest(args, ctx, flags),
        Commands::Disease(args) => commands::disease::handle(args, ctx, flags),
        Commands::Stats => commands::stats::handle(ctx, flags),
    }
}
