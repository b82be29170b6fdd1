use std::path::Path;

use colored::Colorize;

use nanti_session::FileStore;

pub fn run(dir: &Path, name: Option<&str>, wallet: Option<&str>) -> Result<(), String> {
    let mut store = FileStore::new(dir);
    let mut profile = super::load_profile(&store)?;

    if name.is_some() || wallet.is_some() {
        if let Some(name) = name {
            profile.name = name.to_string();
        }
        if let Some(wallet) = wallet {
            profile.wallet = Some(wallet.to_string());
        }
        profile.save(&mut store).map_err(|e| e.to_string())?;
        println!("  {} profile", "Updated".green().bold());
    }

    println!("  {}", profile.name.bold());
    println!(
        "  wallet:     {}",
        profile.wallet.as_deref().unwrap_or("(not connected)")
    );
    println!("  silver:     {}", profile.silver);
    let completed: Vec<String> = profile
        .completed_levels
        .iter()
        .map(u32::to_string)
        .collect();
    println!(
        "  completed:  {}",
        if completed.is_empty() {
            "none".to_string()
        } else {
            completed.join(", ")
        }
    );
    let dice: Vec<String> = profile
        .inventory
        .active_dice()
        .into_iter()
        .map(|d| d.name)
        .collect();
    println!("  dice:       {}", dice.join(", "));
    println!("  cards:      {} owned", profile.inventory.cards().len());
    if !profile.minted.is_empty() {
        println!("  minted:     {}", profile.minted.join(", "));
    }

    Ok(())
}
