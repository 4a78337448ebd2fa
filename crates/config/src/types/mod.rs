//! Option and value type definitions.
//!
//! Responsibilities:
//! - Describe declared options (`OptionDescriptor`) and the namespace they live in.
//! - Describe resolved values (`ConfigValue`) and where they came from (`ValueOrigin`).
//!
//! Does NOT handle:
//! - Registration or uniqueness checks (see `registry` module).
//! - Reading values from the command line or environment (see `source` and `loader`).
//!
//! Invariants:
//! - Decrypted values are only ever held as `ConfigValue::Secret`, so `Debug` output redacts them.
//! - The default of an encrypted-file option is a path, never secret material.

mod option;
mod value;

pub use option::{Namespace, OptionDescriptor, OptionKind, OptionValue};
pub use value::{ConfigValue, ValueOrigin};
