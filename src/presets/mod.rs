//! Ready-made asset presets.

mod dev_cdn;

pub use dev_cdn::{DevCdnOptions, DevCdnPreset, dev_cdn_preset};
