//! apidoc — regenerate the API tables embedded in component documentation.
//!
//! Pipeline per documentation page:
//!
//! 1. **Extract** — read each component's declaration from the analyzer
//!    output and walk its superclass chain ([`extract`])
//! 2. **Assemble** — build Properties / Methods / Events tables from public
//!    members ([`render::tables`])
//! 3. **Splice** — replace the marked region of the page with the rendered
//!    tables ([`render::splice`])

pub mod analyzer;
pub mod config;
pub mod extract;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod update;
