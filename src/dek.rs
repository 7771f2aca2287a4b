//! MTGO `.dek` collection files.
//!
//! A `.dek` file is an XML `Deck` element holding two placeholder IDs and
//! one `Cards` element per card:
//!
//! ```xml
//! <?xml version='1.0' encoding='utf-8'?>
//! <Deck xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <NetDeckID>0</NetDeckID>
//!   <PreconstructedDeckID>0</PreconstructedDeckID>
//!   <Cards CatID="235" Quantity="1" Sideboard="false" Name="Island" Annotation="0" />
//! </Deck>
//! ```
//!
//! Only `Name` and `CatID` are read back; everything else is written with
//! fixed values.

use crate::binder::Binder;
use crate::diagnostics::{record, Diagnostic, Outcome};
use crate::error::{DraftError, Result};
use std::path::Path;

const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";
const DECK_OPEN: &str = r#"<Deck xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#;

/// Read a `.dek` file into a binder named after the file stem
pub fn read_dek_file<P: AsRef<Path>>(path: P) -> Result<Outcome<Binder>> {
    let path = path.as_ref();
    log::info!("Reading .dek file: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| DraftError::io(path, e))?;
    parse_dek(&content, &binder_name_for(path), path)
}

/// Parse `.dek` content held in memory
pub fn parse_dek_str(content: &str, binder_name: &str) -> Result<Outcome<Binder>> {
    parse_dek(content, binder_name, Path::new(binder_name))
}

/// Binder label for a file: its stem, e.g. `owned` for `owned.dek`
pub fn binder_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_dek(content: &str, binder_name: &str, path: &Path) -> Result<Outcome<Binder>> {
    let doc = roxmltree::Document::parse(content).map_err(|source| DraftError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "Deck" {
        return Err(DraftError::InvalidDek {
            path: path.to_path_buf(),
            reason: format!("root element is <{}>, expected <Deck>", root.tag_name().name()),
        });
    }

    let mut binder = Binder::new(binder_name);
    let mut diagnostics = Vec::new();

    for card in root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "Cards")
    {
        let name = card.attribute("Name").filter(|v| !v.is_empty());
        let catid = card.attribute("CatID").filter(|v| !v.is_empty());

        let (name, catid) = match (name, catid) {
            (Some(name), Some(catid)) => (name, catid),
            (name, _) => {
                let attribute = if name.is_none() { "Name" } else { "CatID" };
                record(
                    &mut diagnostics,
                    Diagnostic::MissingAttribute {
                        attribute,
                        element: render_element(&card),
                    },
                );
                continue;
            }
        };

        if let Some(previous) = binder.insert(name.to_string(), catid.to_string()) {
            record(
                &mut diagnostics,
                Diagnostic::DuplicateCard {
                    card: name.to_string(),
                    previous,
                    replacement: catid.to_string(),
                },
            );
        }
    }

    log::debug!(
        "Parsed {} cards from {} ({} warnings)",
        binder.len(),
        path.display(),
        diagnostics.len()
    );
    Ok(Outcome::with_diagnostics(binder, diagnostics))
}

fn render_element(node: &roxmltree::Node) -> String {
    let mut element = format!("<{}", node.tag_name().name());
    for attr in node.attributes() {
        element.push_str(&format!(" {}=\"{}\"", attr.name(), escape_attribute(attr.value())));
    }
    element.push_str(" />");
    element
}

/// Serialize a binder in `.dek` format, cards in binder order
pub fn to_dek_string(binder: &Binder) -> String {
    let mut output = String::new();
    output.push_str(XML_DECLARATION);
    output.push('\n');
    output.push_str(DECK_OPEN);
    output.push('\n');
    output.push_str("  <NetDeckID>0</NetDeckID>\n");
    output.push_str("  <PreconstructedDeckID>0</PreconstructedDeckID>\n");

    for (name, catid) in binder.iter() {
        output.push_str(&format!(
            "  <Cards CatID=\"{}\" Quantity=\"1\" Sideboard=\"false\" Name=\"{}\" Annotation=\"0\" />\n",
            escape_attribute(catid),
            escape_attribute(name)
        ));
    }

    output.push_str("</Deck>\n");
    output
}

/// Write a binder to `path` as a `.dek` file
pub fn write_dek_file<P: AsRef<Path>>(binder: &Binder, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_dek_string(binder)).map_err(|e| DraftError::io(path, e))?;
    log::info!(
        ".dek file created at: {} ({} cards)",
        path.display(),
        binder.len()
    );
    Ok(())
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "dek_tests.rs"]
mod tests;
