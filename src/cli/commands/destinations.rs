use crate::config::Config;
use crate::services::DestinationCatalog;

pub async fn cmd_destinations(config: &Config) -> anyhow::Result<()> {
    let catalog = DestinationCatalog::with_ttl_hours(config.search.destination_cache_hours);

    println!("Popular destinations:");
    println!("{:-<50}", "");
    for destination in catalog.list().await.iter() {
        println!(
            "  {}  {:<12} {}",
            destination.code, destination.name, destination.country
        );
    }

    Ok(())
}
