//! # pgdef-models — PostgreSQL Object Definitions
//!
//! One module per object family. Each model is a plain serde struct with
//! a `static` [`ObjectSpec`](pgdef_core::ObjectSpec) describing its legal
//! shape, a [`Validate`](pgdef_core::Validate) impl for field-level rules,
//! and a [`Model`](pgdef_core::Model) impl tying the two together:
//!
//! ```
//! use pgdef_core::construct;
//! use pgdef_models::domain::Domain;
//! use serde_json::json;
//!
//! let domain: Domain = construct(json!({
//!     "schema": "public",
//!     "name": "email",
//!     "data_type": "text",
//!     "check_constraints": [{"expression": "VALUE ~ '@'"}],
//! }))
//! .unwrap();
//! assert_eq!(domain.data_type.as_deref(), Some("text"));
//! ```
//!
//! ## Object Families
//!
//! - Relations: [`table`], [`column`], [`index`], [`foreign_key`],
//!   [`trigger`], [`view`].
//! - Routines and types: [`function`], [`aggregate`], [`argument`],
//!   [`types`], [`domain`], [`sequence`], [`operator`], [`cast`],
//!   [`conversion`], [`collation`], [`text_search`].
//! - Cluster objects: [`role`], [`group`], [`user`], [`acls`], [`schema`],
//!   [`tablespace`], [`server`], [`event_trigger`], [`publication`],
//!   [`subscription`], [`project`].
//! - [`dependencies`] and [`common`] are shared by the rest.
//!
//! ## Crate Policy
//!
//! - Depends only on `pgdef-core` internally.
//! - Models never re-implement the raw-versus-structured decision; it is
//!   declared in the spec table and enforced by `pgdef_core::gate`.
//! - Wire names are stable: renaming a field or an enum value breaks
//!   existing definition documents.

pub mod acls;
pub mod aggregate;
pub mod argument;
pub mod cast;
pub mod collation;
pub mod column;
pub mod common;
pub mod conversion;
pub mod dependencies;
pub mod domain;
pub mod event_trigger;
pub mod foreign_key;
pub mod function;
pub mod group;
pub mod index;
pub mod operator;
pub mod project;
pub mod publication;
pub mod role;
pub mod schema;
pub mod sequence;
pub mod server;
pub mod subscription;
pub mod table;
pub mod tablespace;
pub mod text_search;
pub mod trigger;
pub mod types;
pub mod user;
pub mod view;

pub use acls::Acls;
pub use aggregate::Aggregate;
pub use cast::{Cast, Casts};
pub use collation::Collation;
pub use conversion::{Conversion, Conversions};
pub use dependencies::Dependencies;
pub use domain::Domain;
pub use event_trigger::EventTrigger;
pub use function::Function;
pub use group::Group;
pub use operator::{Operator, Operators};
pub use project::Project;
pub use publication::Publication;
pub use role::Role;
pub use schema::Schema;
pub use sequence::Sequence;
pub use server::{ForeignDataWrapper, Server, UserMapping};
pub use subscription::Subscription;
pub use table::Table;
pub use tablespace::Tablespace;
pub use text_search::TextSearch;
pub use types::{Type, Types};
pub use user::User;
pub use view::{MaterializedView, View};
