//! Locale bundles and asset loading.

pub mod load;
pub mod locale;

pub use load::*;
pub use locale::*;
