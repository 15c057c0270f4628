use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use tracing::debug;

use super::error::ReportError;

/// Name the page template is registered under.
pub const INDEX_TEMPLATE_NAME: &str = "index";

/// Register the page template and, if a `partials/` directory sits next to
/// it, every `*.hbs` partial inside.
pub(super) fn load_index_template(
    handlebars: &mut Handlebars<'static>,
    template_file: &Path,
) -> Result<(), ReportError> {
    let content = fs::read_to_string(template_file)
        .map_err(|e| ReportError::read_template(template_file, e))?;
    handlebars.register_template_string(INDEX_TEMPLATE_NAME, content)?;

    if let Some(partials_dir) = template_file.parent().map(|dir| dir.join("partials")) {
        if partials_dir.is_dir() {
            register_partials(handlebars, &partials_dir)?;
        }
    }

    Ok(())
}

fn register_partials(
    handlebars: &mut Handlebars<'static>,
    partials_dir: &Path,
) -> Result<(), ReportError> {
    let mut paths: Vec<_> = fs::read_dir(partials_dir)
        .and_then(|entries| entries.map(|entry| entry.map(|e| e.path())).collect())
        .map_err(|e| ReportError::read_template(partials_dir, e))?;
    paths.sort();

    for path in paths {
        if path.extension().and_then(|s| s.to_str()) != Some("hbs") {
            continue;
        }
        let partial_name = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
            ReportError::read_template(
                &path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid partial filename"),
            )
        })?;

        let partial_content =
            fs::read_to_string(&path).map_err(|e| ReportError::read_template(&path, e))?;
        debug!("Registering partial {}", partial_name);
        handlebars.register_partial(partial_name, partial_content)?;
    }

    Ok(())
}
