//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes one summary file per processed article
//!
//! # Output Structure
//!
//! ```text
//! summaries/
//! ├── 2159092.json   # {"summary": "...", "url": "https://www.neakriti.gr/kriti/2159092_..."}
//! └── 2159101.json
//! processed_articles.json   # ["2159092", "2159101"]
//! ```

pub mod json;
