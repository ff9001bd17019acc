use std::fs;

fn main() {
    // Renderer defaults are embedded with include_str!, so reject bad TOML here.
    let defaults = "src/default_config.toml";
    println!("cargo:rerun-if-changed={defaults}");

    let content = fs::read_to_string(defaults)
        .unwrap_or_else(|e| panic!("cannot read chatfmt renderer defaults {defaults}: {e}"));

    if let Err(e) = content.parse::<toml::Table>() {
        panic!("chatfmt renderer defaults in {defaults} are not valid TOML: {e}");
    }
}
