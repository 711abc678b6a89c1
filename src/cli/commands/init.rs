use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Add your Amadeus credentials under [amadeus] or set AMADEUS_API_KEY / AMADEUS_API_SECRET.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
