use handlebars::Handlebars;
use handlebars::{Helper, HelperResult, RenderContext, RenderError};
use serde_json::Value;
use std::path::Path;

/// Register all Handlebars helpers available to index templates.
pub fn register_helpers(handlebars: &mut Handlebars<'static>) {
    register_json_helper(handlebars);
    register_eq_helper(handlebars);

    // Helper: array length
    register_array_helper(handlebars, "length", |array| array.len().to_string());

    // Helper: file name without extension, for link labels
    register_string_transform_helper(handlebars, "stem", |value| {
        Path::new(value)
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or(value)
            .to_string()
    });
}

/// Register the JSON pretty-print helper
fn register_json_helper(handlebars: &mut Handlebars<'static>) {
    handlebars.register_helper(
        "json",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &handlebars::Context,
             _: &mut RenderContext,
             out: &mut dyn handlebars::Output|
             -> HelperResult {
                let value = h
                    .param(0)
                    .map(|v| v.value())
                    .ok_or_else(|| RenderError::new("json helper requires a parameter"))?;
                let json_str = serde_json::to_string_pretty(value)
                    .map_err(|e| RenderError::new(&format!("JSON serialization error: {}", e)))?;
                out.write(&json_str)?;
                Ok(())
            },
        ),
    );
}

/// Register the equality comparison helper
fn register_eq_helper(handlebars: &mut Handlebars<'static>) {
    handlebars.register_helper(
        "eq",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &handlebars::Context,
             _: &mut RenderContext,
             out: &mut dyn handlebars::Output|
             -> HelperResult {
                let a = h
                    .param(0)
                    .map(|v| v.value().clone())
                    .ok_or_else(|| RenderError::new("eq helper requires two parameters"))?;
                let b = h
                    .param(1)
                    .map(|v| v.value().clone())
                    .ok_or_else(|| RenderError::new("eq helper requires two parameters"))?;
                // Empty output is falsy for #if
                if a == b {
                    out.write("true")?;
                }
                Ok(())
            },
        ),
    );
}

/// Register a helper that transforms a single string parameter.
fn register_string_transform_helper<F>(handlebars: &mut Handlebars<'static>, name: &str, transform: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let helper_name = name.to_string();
    handlebars.register_helper(
        name,
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  _: &handlebars::Context,
                  _: &mut RenderContext,
                  out: &mut dyn handlebars::Output|
                  -> HelperResult {
                let value = h.param(0).and_then(|v| v.value().as_str()).ok_or_else(|| {
                    RenderError::new(&format!("{} helper requires a string parameter", helper_name))
                })?;
                out.write(&transform(value))?;
                Ok(())
            },
        ),
    );
}

/// Register a helper that summarizes an array parameter.
fn register_array_helper<F>(handlebars: &mut Handlebars<'static>, name: &str, summarize: F)
where
    F: Fn(&[Value]) -> String + Send + Sync + 'static,
{
    let helper_name = name.to_string();
    handlebars.register_helper(
        name,
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  _: &handlebars::Context,
                  _: &mut RenderContext,
                  out: &mut dyn handlebars::Output|
                  -> HelperResult {
                let array = h.param(0).and_then(|v| v.value().as_array()).ok_or_else(|| {
                    RenderError::new(&format!("{} helper requires an array parameter", helper_name))
                })?;
                out.write(&summarize(array))?;
                Ok(())
            },
        ),
    );
}
