//! Taxonomy command implementation

use crate::cli::output::{format_taxonomy_json, format_taxonomy_table};
use crate::cli::serve::load_config_file;
use crate::cli::TaxonomyArgs;

/// Handle `triage taxonomy`
pub fn handle_taxonomy(args: &TaxonomyArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_file(&args.config)?;
    let registry = config.taxonomy.registry();

    if args.json {
        Ok(format_taxonomy_json(&registry)?)
    } else {
        Ok(format_taxonomy_table(&registry))
    }
}
