use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nanti_session::{FileStore, ItemDefinition, Shop};

pub fn list(dir: &Path) -> Result<(), String> {
    let store = FileStore::new(dir);
    let shop = Shop::load(&store).map_err(|e| e.to_string())?;
    let profile = super::load_profile(&store)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Rarity", "Price", "Owned"]);

    for item in shop.items() {
        let owned = if Shop::is_owned(item, &profile) { "yes" } else { "" };
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.kind_label(),
            item.rarity.to_string(),
            item.price.to_string(),
            owned.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} items, you have {} silver", shop.items().len(), profile.silver);

    Ok(())
}

pub fn add(dir: &Path, file: &Path) -> Result<(), String> {
    let json = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let defs = parse_definitions(&json)?;

    let mut store = FileStore::new(dir);
    let added = Shop::add_definitions(&mut store, defs).map_err(|e| e.to_string())?;
    println!("  {} {added} item(s) to the shop", "Added".green().bold());

    Ok(())
}

/// Accept either a single definition or an array of them.
fn parse_definitions(json: &str) -> Result<Vec<ItemDefinition>, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("invalid JSON: {e}"))?;
    let defs = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|def| vec![def])
    };
    defs.map_err(|e| format!("invalid item definition: {e}"))
}
