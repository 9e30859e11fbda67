//! Configuration section definitions.
//!
//! Each module corresponds to a section in `dedot.toml`:
//!
//! | Module       | TOML Section     | Purpose                             |
//! |--------------|------------------|-------------------------------------|
//! | `processing` | `[processing]`   | Target files, separator, rules      |

mod processing;

pub use processing::{DEFAULT_FILE_PATTERN, ProcessingConfig, ProcessingFields};
