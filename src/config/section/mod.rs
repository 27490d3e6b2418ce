//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pageassets.toml`:
//!
//! | Module       | TOML Section     | Purpose                              |
//! |--------------|------------------|--------------------------------------|
//! | `optimize`   | `[optimize]`     | Bundle URLs for production           |
//! | `stylesheet` | `[stylesheet]`   | Preprocessor extensions and command  |
//! | `walk`       | `[walk]`         | Directory traversal options          |

mod optimize;
mod stylesheet;
mod walk;

pub use optimize::OptimizeConfig;
pub use stylesheet::StylesheetConfig;
pub use walk::WalkConfig;
