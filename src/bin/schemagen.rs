//! # Schema Generator
//!
//! Prints the JSON Schema of the unified charm descriptor.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schemagen > charm/schema.json
//! ```
//!
//! Editors with YAML language server support can point
//! `# yaml-language-server: $schema=...` at the output.

use mimir_writer::descriptor::CharmDescriptor;

fn main() {
    let schema = schemars::schema_for!(CharmDescriptor);

    match serde_json::to_string_pretty(&schema) {
        Ok(json) => {
            println!("{json}");
        }
        Err(e) => {
            eprintln!("Failed to serialize charm descriptor schema: {e}");
            std::process::exit(1);
        }
    }
}
