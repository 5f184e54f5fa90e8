//! Standard APIs we use everywhere.

pub use anyhow::{Context as _, Result, anyhow};
#[allow(unused_imports)]
pub use tracing::{debug, error, info, instrument, trace, warn};
