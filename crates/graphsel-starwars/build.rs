//! Runs the generator over the Star Wars fixture so the runtime tests
//! exercise exactly what `graphsel generate` emits.

use std::error::Error;
use std::path::PathBuf;

use graphsel_codegen::{generate, parser, CodegenConfig};

const SCALARS: &str = r#"
[scalars]
DateTime = "chrono::DateTime<chrono::Utc>"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let fixture = manifest_dir.join("../graphsel-codegen/tests/fixtures/starwars.graphql");
    println!("cargo:rerun-if-changed={}", fixture.display());
    println!("cargo:rerun-if-changed=build.rs");

    let sdl = std::fs::read_to_string(&fixture)?;
    let config = CodegenConfig::from_toml_str(SCALARS)?;
    let source = generate(&parser::parse(&sdl), &config)?;

    let out = PathBuf::from(std::env::var("OUT_DIR")?).join("starwars.rs");
    std::fs::write(out, source)?;
    Ok(())
}
