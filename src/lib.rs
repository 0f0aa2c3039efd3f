pub mod catalog;
pub mod chunk;
pub mod coverage;
pub mod emit;
pub mod error;
pub mod guid;
pub mod hierarchy;
pub mod layout;
pub mod output;
pub mod patch;
pub mod qc;
pub mod routing;
pub mod seed;
pub mod track;

pub use catalog::Catalog;
pub use error::*;
pub use guid::{GuidSource, RandomGuids, SequentialGuids};
pub use layout::Layout;
pub use routing::Resolution;

use tracing::info;

/// Build a template from seed project text.
/// This is the main entry point for the library.
pub fn build_template(
    seed: &str,
    catalog: &Catalog,
    mode: Resolution,
    guids: &mut dyn GuidSource,
) -> Result<String, RppError> {
    let doc = chunk::split_document(seed)?;
    let mut tracks = hierarchy::synthesize(catalog, &doc.records)?;
    routing::assign_routes(&mut tracks, &catalog.routes, mode)?;
    Ok(emit::emit_project(&doc.header, &tracks, &doc.footer, guids))
}

/// Read the pilot project under `layout`, build the template and write it to
/// every template destination.
pub fn generate_template(
    layout: &Layout,
    catalog: &Catalog,
    mode: Resolution,
) -> Result<String, RppError> {
    let seed_path = layout.seed_project();
    let seed = std::fs::read_to_string(&seed_path).map_err(|e| RppError::io(&seed_path, e))?;

    let template = build_template(&seed, catalog, mode, &mut RandomGuids)?;
    output::write_all(&template, &layout.template_destinations())?;
    info!(seed = %seed_path.display(), "template generated");
    Ok(template)
}
