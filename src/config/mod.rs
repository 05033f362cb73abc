//! Configuration: environment-driven `Config` plus fixed constants
//! (token issuer and audience, role and status names, validation bounds).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
