//! playscript-core - Fixed-column play scripts in, structured documents out
//!
//! Core library for playscript, decoding play/screenplay text into a
//! `playscript_ast::ScriptDocument` of scene headings, dialogue, songs
//! and narration with deduplicated characters.
//!
//! # Example
//!
//! ```
//! use playscript_core::{generate, parse};
//!
//! let script = "OPEN ON: A QUIET STREET\n   Snow falls.\nTHE END\n";
//! let doc = parse(script)?;
//!
//! assert_eq!(
//!     generate(&doc),
//!     "TIME : , PLACE : A QUIET STREET\nNARR : Snow falls."
//! );
//! # Ok::<(), playscript_core::ParseError>(())
//! ```

pub mod classifier;
pub mod error;
pub mod listing;
pub mod parser;
pub mod profile;

// Re-export main types and functions
pub use classifier::{classify, LineKind};
pub use error::ParseError;
pub use listing::{generate, generate_with_config, ListingConfig, ListingGenerator};
pub use parser::{parse, parse_reader, Flow, ParserPhase, ScriptParser};
pub use profile::{extract_personality, profile_texts, TraitPredictor, TraitProfile};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
