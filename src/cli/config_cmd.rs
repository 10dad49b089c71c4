use std::path::PathBuf;

use crate::models::config::{self, UserConfig};

pub fn handle_config(set_catalog: Option<PathBuf>, set_data_dir: Option<PathBuf>, clear: bool) {
    let mut user_config = config::load_config();

    if !clear && set_catalog.is_none() && set_data_dir.is_none() {
        println!("Config file: {}", config::get_config_path().display());
        println!(
            "Catalog:     {}",
            user_config
                .catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "bundled".to_string())
        );
        println!("Data dir:    {}", user_config.data_dir().display());
        println!();
        println!("To change: codele config --set-catalog <file> --set-data-dir <dir>");
        return;
    }

    if clear {
        user_config = UserConfig::default();
    }
    if let Some(path) = set_catalog {
        user_config.catalog_path = Some(path);
    }
    if let Some(dir) = set_data_dir {
        user_config.data_dir = Some(dir);
    }

    if let Err(e) = config::save_config(&user_config) {
        eprintln!("Failed to save config: {}", e);
        std::process::exit(1);
    }

    println!("Settings saved to {}", config::get_config_path().display());
}
