use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nanti_session::FileStore;

pub fn run(dir: &Path, catalog: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let profile = super::load_profile(&FileStore::new(dir))?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Level", "Goal", "Silver", "Status"]);

    for level in &catalog.levels {
        let status = if profile.completed_levels.contains(&level.id) {
            "completed"
        } else if profile.is_level_unlocked(level.id) {
            "open"
        } else {
            "locked"
        };
        let mut silver = format!(
            "{}-{}",
            level.rewards.silver_min, level.rewards.silver_max
        );
        if catalog.is_final_level(level.id)
            && let Some(special) = &level.rewards.special
        {
            silver.push_str(&format!(" + {special}"));
        }
        table.add_row(vec![
            level.id.to_string(),
            level.name.clone(),
            format!("{} pts / {} turns", level.goal.points, level.goal.turns),
            silver,
            status.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} of {} levels completed",
        profile.completed_levels.len().to_string().bold(),
        catalog.levels.len()
    );

    Ok(())
}
