mod insight;
mod taxonomy;

pub use insight::InsightCommands;
pub use taxonomy::TaxonomyCommands;
