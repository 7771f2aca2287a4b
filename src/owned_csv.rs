//! Build the owned binder from a collection CSV export.
//!
//! The export has (at least) `name` and `itemID` columns. Event Tickets
//! are currency, not cards, and never go into a binder.

use crate::binder::Binder;
use crate::dek::{binder_name_for, write_dek_file};
use crate::error::{DraftError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

const EVENT_TICKET: &str = "Event Ticket";

#[derive(Debug, Deserialize)]
struct CollectionRow {
    name: Option<String>,
    #[serde(rename = "itemID")]
    item_id: Option<String>,
}

/// Parse CSV rows into a binder, skipping rows without a name or item ID
pub fn parse_owned_csv<R: Read>(reader: R, binder_name: &str) -> Result<Binder> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for result in rdr.deserialize() {
        let row: CollectionRow = result?;
        match (row.name, row.item_id) {
            (Some(name), Some(item_id))
                if !name.is_empty() && !item_id.is_empty() && name != EVENT_TICKET =>
            {
                pairs.push((name, item_id));
            }
            (name, item_id) => {
                log::debug!("Skipping row: name={name:?} itemID={item_id:?}");
            }
        }
    }

    let binder = Binder::from_pairs(binder_name, pairs);
    log::info!("Read {} cards from collection export", binder.len());
    Ok(binder)
}

pub fn read_owned_csv<P: AsRef<Path>>(path: P) -> Result<Binder> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| DraftError::io(path, e))?;
    parse_owned_csv(file, &binder_name_for(path))
}

/// Convert a collection CSV into a `.dek` file next to it, returning the
/// binder and the path written
pub fn convert_csv_to_dek<P: AsRef<Path>>(csv_path: P) -> Result<(Binder, PathBuf)> {
    let csv_path = csv_path.as_ref();
    let binder = read_owned_csv(csv_path)?;
    let dek_path = csv_path.with_extension("dek");
    write_dek_file(&binder, &dek_path)?;
    log::info!("Number of cards in deck: {}", binder.len());
    Ok((binder, dek_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dek::read_dek_file;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "name,itemID,quantity,set
Island,235,12,M21
Event Ticket,1,40,
Fire // Ice,52181,1,MH2
,999,1,XXX
Swamp,,3,M21
  Lightning Bolt  ,  4711  ,1,M10
";

    #[test]
    fn keeps_named_rows_with_item_ids() {
        let binder = parse_owned_csv(SAMPLE_CSV.as_bytes(), "owned").unwrap();

        assert_eq!(binder.len(), 3);
        assert_eq!(binder.get("Island"), Some("235"));
        assert_eq!(binder.get("Fire // Ice"), Some("52181"));
        assert_eq!(binder.get("Lightning Bolt"), Some("4711"));
        assert!(!binder.contains("Event Ticket"));
        assert!(!binder.contains("Swamp"));
    }

    #[test]
    fn header_only_gives_empty_binder() {
        let binder = parse_owned_csv("name,itemID\n".as_bytes(), "owned").unwrap();
        assert!(binder.is_empty());
    }

    #[test]
    fn converts_next_to_source() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("collection.csv");
        std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

        let (binder, dek_path) = convert_csv_to_dek(&csv_path).unwrap();

        assert_eq!(dek_path, dir.path().join("collection.dek"));
        assert_eq!(binder.name(), "collection");
        let reread = read_dek_file(&dek_path).unwrap().value;
        assert_eq!(reread.to_map(), binder.to_map());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_owned_csv("/this/file/does/not/exist.csv").is_err());
    }
}
