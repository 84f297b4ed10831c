//! # Policy Model
//!
//! The insurance policy record exchanged between the REST backend, the
//! access client and the management view.
//!
//! ```rust
//! use policy_model::Policy;
//!
//! let draft = Policy::empty();
//! assert!(draft.is_new());
//! assert!(draft.validate().is_err());
//! ```

pub mod policy;
pub mod validation;

pub use policy::{parse_amount, parse_date, Policy, PolicyId};
pub use validation::ValidationError;
