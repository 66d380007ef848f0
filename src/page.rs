//! Standalone HTML snapshot of the display, built from the embedded page template.

use crate::assets::get_asset_text;
use crate::grid::escape_attr;
use crate::surface::{Display, Field};
use std::path::Path;
use thiserror::Error;

pub const PAGE_TEMPLATE: &str = "page.html";
pub const PAGE_STYLE: &str = "maze.css";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("embedded asset {0} is missing")]
    MissingAsset(&'static str),
    #[error("could not write page: {0}")]
    Io(#[from] std::io::Error),
}

/// Fill the page template with the display's grid and regions
pub fn render_page(display: &Display) -> Result<String, PageError> {
    let template = get_asset_text(PAGE_TEMPLATE).ok_or(PageError::MissingAsset(PAGE_TEMPLATE))?;
    let style = get_asset_text(PAGE_STYLE).ok_or(PageError::MissingAsset(PAGE_STYLE))?;

    Ok(fill_template(&template, |name| match name {
        "style" => Some(style.clone()),
        "grid" => Some(snapshot_markup(display)),
        _ => Field::ALL
            .into_iter()
            .find(|field| field.id() == name)
            .map(|field| escape_attr(display.text(field))),
    }))
}

/// Replace each `{{name}}` in one pass. Substituted text is never rescanned,
/// and unknown names are left as written.
fn fill_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Grid markup carrying the current cell classes rather than the fetched labels
fn snapshot_markup(display: &Display) -> String {
    let (width, _) = display.dimensions();
    let mut html = String::new();
    for (at, class) in display.cells() {
        if at.horizontal == 0 {
            html.push_str("<div class=\"mazerow\">");
        }
        html.push_str(&format!(
            "<div id=\"{}\" class=\"{}\"></div>",
            at.cell_id(),
            escape_attr(&class.css())
        ));
        if at.horizontal + 1 == width {
            html.push_str("</div>");
        }
    }
    html
}

pub fn export_page(display: &Display, path: &Path) -> Result<(), PageError> {
    std::fs::write(path, render_page(display)?)?;
    Ok(())
}
