//! Selections over the Star Wars schema in
//! `graphsel-codegen/tests/fixtures/starwars.graphql`.
//!
//! The modules below are the unmodified output of the generator, produced
//! by `build.rs` on every build.

include!(concat!(env!("OUT_DIR"), "/starwars.rs"));
