//! `figart fonts`: the catalog offered by the generator.

use figart_core::catalog::FONT_CATALOG;
use figart_core::config::Config;
use figart_core::fonts::FontStore;

pub fn list(config: &Config, check_available: bool) {
    let store = check_available.then(|| FontStore::from_config(config));
    for name in FONT_CATALOG {
        match &store {
            Some(store) if !store.is_available(name) => println!("{name} (missing)"),
            _ => println!("{name}"),
        }
    }
}
