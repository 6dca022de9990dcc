use medkb_search::SymptomContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `medkb check`.
///
/// A failed check still prints its disclaimer; the exit status reflects the
/// failure.
pub fn handle(args: &CheckArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let context = symptom_context(args);
    let outcome = ctx.matcher.check(args.symptoms.as_slice(), context.as_ref());
    output(&outcome, flags.format)?;

    match outcome.error() {
        Some(error) => anyhow::bail!("symptom check failed: {error}"),
        None => Ok(()),
    }
}

fn symptom_context(args: &CheckArgs) -> Option<SymptomContext> {
    if args.age.is_none() && args.duration_days.is_none() {
        return None;
    }
    Some(SymptomContext {
        age: args.age,
        duration_days: args.duration_days,
    })
}

#[cfg(test)]
mod tests {
    use super::symptom_context;
    use crate::cli::root_commands::CheckArgs;

    fn args(age: Option<u32>, duration_days: Option<u32>) -> CheckArgs {
        CheckArgs {
            symptoms: vec!["sốt".to_string()],
            age,
            duration_days,
        }
    }

    #[test]
    fn no_flags_means_no_context() {
        assert!(symptom_context(&args(None, None)).is_none());
    }

    #[test]
    fn either_flag_builds_context() {
        let context = symptom_context(&args(Some(3), None)).expect("context");
        assert_eq!(context.age, Some(3));
        assert_eq!(context.duration_days, None);
    }
}
