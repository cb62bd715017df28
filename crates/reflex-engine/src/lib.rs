//! Reflex Runtime Engine
//!
//! The dynamic half of the Reflex object-model runtime:
//! - **Object graph**: arena-backed dynamic values the reflective
//!   operations and the scanner run against (`object` module)
//! - **Instance reflection**: type lookup, instance checks, and casts
//!   (`reflect` module)
//! - **Delegates**: immutable multi-cast callbacks (`delegate` module)
//! - **Auto-discovery**: startup scan registering types found in the
//!   global namespace graph (`scanner` module)
//! - **Filter composition**: criteria trees and the filter store consumed
//!   by UI filter panels (`filter` module)

#![warn(missing_docs)]

pub mod object;
pub mod reflect;
pub mod delegate;
pub mod scanner;
pub mod localization;
pub mod filter;

pub use object::{Heap, Object, ObjectId, Value};
pub use reflect::{cast, get_type, instance_type_of, is_instance_of, safe_cast};
pub use delegate::{delegate_combine, delegate_remove, Delegate};
pub use scanner::{ensure_formatter_interface, get_types_under, initialize_types};
pub use localization::{Culture, LocalTextRegistry};
pub use filter::{Criteria, CriteriaOp, FilterChanged, FilterLine, FilterStore, PropertyItem};
