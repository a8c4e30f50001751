//! # Structure Viewer Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- structure.json --assets assets.json
//! ```

fn main() -> anyhow::Result<()> {
    structure_viewer::run()
}
