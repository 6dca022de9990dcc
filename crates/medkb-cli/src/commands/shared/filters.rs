use medkb_core::enums::{ContentType, DifficultyLevel};
use medkb_search::SearchFilters;

use crate::cli::root_commands::FilterArgs;
use crate::commands::shared::parse::parse_tier;

/// Convert filter flags to [`SearchFilters`], rejecting unknown tiers up front.
pub fn to_search_filters(args: &FilterArgs) -> anyhow::Result<SearchFilters> {
    let content_type = args
        .content_type
        .as_deref()
        .map(|raw| parse_tier::<ContentType>(raw, "content type"))
        .transpose()?;
    let difficulty = args
        .difficulty
        .as_deref()
        .map(|raw| parse_tier::<DifficultyLevel>(raw, "difficulty"))
        .transpose()?;

    Ok(SearchFilters {
        category: args.category.clone(),
        content_type: content_type.map(|c| c.as_str().to_string()),
        difficulty_level: difficulty.map(|d| d.as_str().to_string()),
    })
}
