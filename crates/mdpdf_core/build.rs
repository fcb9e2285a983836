use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // Every section the converter reads must be spelled out in the defaults
    for section in ["page", "font", "styles", "checkbox"] {
        if !table.contains_key(section) {
            panic!("default_config.toml is missing [{}]", section);
        }
    }
}
