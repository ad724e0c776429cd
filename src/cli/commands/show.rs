use crate::config::Config;
use crate::constants::meta_keys;
use crate::db::Store;

pub async fn cmd_show_tour(config: &Config, tour_id: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(entry) = store.get_entry_by_tour_id(tour_id).await? else {
        println!("No listing has been mirrored from tour {tour_id}.");
        return Ok(());
    };

    println!("Listing");
    println!("{:-<60}", "");
    println!("Title:     {}", entry.title);
    println!("Entry ID:  {}", entry.id);
    println!("Status:    {}", entry.status.as_str());
    println!("Created:   {}", entry.created_at);
    println!(
        "Thumbnail: {}",
        entry
            .thumbnail_id
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    );

    for key in [
        meta_keys::BASE_PRICE,
        meta_keys::DURATION_DAY,
        meta_keys::GALLERY,
        meta_keys::MAP_LAT,
        meta_keys::MAP_LNG,
    ] {
        if let Some(value) = entry.meta(key) {
            println!("{key:<18} {value}");
        }
    }

    println!("\n{} metadata fields in total", entry.meta.len());
    Ok(())
}
