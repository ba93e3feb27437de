//! AKS Preview Parameter Validators
//!
//! Checks run by the cluster-management CLI after it has parsed a command's
//! arguments into a [`Namespace`]: authorized IP ranges, cluster autoscaler
//! profiles, resource IDs, versions, add-on names and numeric limits.
//!
//! Validators are plain functions over the namespace. Each either accepts the
//! input (possibly normalizing it in place) or fails with a
//! [`ValidationError`] whose message is shown to the user verbatim.
//!
//! ```
//! use aks_validators::{validate_max_surge, Namespace};
//!
//! let mut ns = Namespace::new().with("max_surge", "33%");
//! assert!(validate_max_surge(&mut ns).is_ok());
//! ```

pub mod config;
pub mod constants;
pub mod logging;
pub mod namespace;
pub mod validation;

pub use namespace::{ArgValue, Namespace};
pub use validation::*;
