use std::path::Path;

pub fn run(catalog: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let json = serde_json::to_string_pretty(&catalog).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
