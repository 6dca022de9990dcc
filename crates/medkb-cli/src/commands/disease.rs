use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DiseaseArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `medkb disease`.
pub fn handle(args: &DiseaseArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let found = ctx
        .matcher
        .lookup_disease(&args.name)
        .context("failed to look up disease")?;

    match found {
        Some(disease) => output(&disease, flags.format),
        None => anyhow::bail!("no disease matches '{}'", args.name),
    }
}
