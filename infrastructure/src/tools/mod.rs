//! Tool implementations exposed to the host
//!
//! - `search`: `glob_search` and `grep_search` over the local filesystem
//! - `executor`: [`LocalToolExecutor`], routing calls to the search tools
//! - `schema`: [`JsonSchemaToolConverter`], tool discovery format

pub mod search;

mod executor;
mod schema;

pub use executor::LocalToolExecutor;
pub use schema::JsonSchemaToolConverter;

use mage_scan_domain::tool::entities::ToolSpec;

/// Create the default tool specification, including the host's legacy aliases
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search::glob_search_definition())
        .register(search::grep_search_definition())
        .register_aliases(search::SEARCH_ALIASES)
}
