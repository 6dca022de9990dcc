use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search the knowledge base.
    Search(SearchArgs),
    /// Assess symptom phrases.
    Check(CheckArgs),
    /// Recommend entries for a question, with reasons.
    Recommend(RecommendArgs),
    /// Show one entry and count the view.
    Show(EntryArgs),
    /// Entries similar to a given entry.
    Related(EntryArgs),
    /// Most viewed entries.
    Popular(FilterArgs),
    /// Title suggestions for a prefix.
    Suggest(SuggestArgs),
    /// Look up a disease by name or classification code.
    Disease(DiseaseArgs),
    /// Corpus and index statistics.
    Stats,
}

/// Filters shared by `search` and `popular`.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Category name (case-insensitive substring).
    #[arg(long)]
    pub category: Option<String>,

    /// Content type, e.g. FAQ or ARTICLE.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Difficulty tier, e.g. BASIC.
    #[arg(long)]
    pub difficulty: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Free-text query.
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Symptom phrases, one per argument.
    #[arg(required = true)]
    pub symptoms: Vec<String>,

    /// Patient age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// How long the symptoms have lasted, in days.
    #[arg(long)]
    pub duration_days: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct RecommendArgs {
    /// Free-text question.
    pub query: String,

    /// Entry ids to leave out (repeatable).
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EntryArgs {
    /// Knowledge entry id.
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct SuggestArgs {
    /// Title prefix as typed so far.
    pub prefix: String,
}

#[derive(Clone, Debug, Args)]
pub struct DiseaseArgs {
    /// Disease name or classification code.
    pub name: String,
}
