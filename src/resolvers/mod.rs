//! Local resolution of client-only fields and mutations.
//!
//! Client-only fields are declared in [`CLIENT_SCHEMA`] so they can be
//! requested next to server fields. Instead of looking resolvers up by name
//! at query time, each kind of local field is a closed enum; parsing a
//! protocol name into one of them is the only string-keyed step.

mod cart;

pub use cart::*;

use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Launch, LaunchId};
use crate::store::LocalStore;

/// Client-side extension of the server schema.
pub const CLIENT_SCHEMA: &str = r#"
extend type Query {
  isLoggedIn: Boolean!
  cartItems: [ID!]!
}

extend type Launch {
  isInCart: Boolean!
}

extend type Mutation {
  addOrRemoveFromCart(id: ID!): [ID!]!
}
"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown local field {type_name}.{field}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("Unknown local mutation: {0}")]
    UnknownMutation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Virtual fields on `Launch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualField {
    IsInCart,
}

impl VirtualField {
    pub const ALL: &'static [VirtualField] = &[Self::IsInCart];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsInCart => "isInCart",
        }
    }
}

impl FromStr for VirtualField {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isInCart" => Ok(Self::IsInCart),
            _ => Err(ResolveError::UnknownField {
                type_name: "Launch",
                field: s.to_string(),
            }),
        }
    }
}

/// Local fields on the query root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalQueryField {
    IsLoggedIn,
    CartItems,
}

impl LocalQueryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsLoggedIn => "isLoggedIn",
            Self::CartItems => "cartItems",
        }
    }
}

impl FromStr for LocalQueryField {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isLoggedIn" => Ok(Self::IsLoggedIn),
            "cartItems" => Ok(Self::CartItems),
            _ => Err(ResolveError::UnknownField {
                type_name: "Query",
                field: s.to_string(),
            }),
        }
    }
}

/// A mutation handled without a network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMutation {
    AddOrRemoveFromCart { id: LaunchId },
}

impl ClientMutation {
    /// Build a mutation from its protocol name and argument object.
    pub fn parse(name: &str, args: &Value) -> Result<Self, ResolveError> {
        match name {
            "addOrRemoveFromCart" => {
                let id = args
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        ResolveError::InvalidArgument(
                            "addOrRemoveFromCart requires a string `id`".to_string(),
                        )
                    })?;
                Ok(Self::AddOrRemoveFromCart { id: id.into() })
            }
            _ => Err(ResolveError::UnknownMutation(name.to_string())),
        }
    }
}

/// Fields of one `Launch` selection, split by where they are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Sent to the server.
    pub server: Vec<String>,
    /// Intercepted and resolved from the local store.
    pub local: Vec<VirtualField>,
}

/// Partition requested `Launch` fields into server and virtual ones.
pub fn split_selection<S: AsRef<str>>(fields: &[S]) -> Selection {
    let mut selection = Selection::default();
    for field in fields {
        let field = field.as_ref();
        match field.parse::<VirtualField>() {
            Ok(virtual_field) => {
                if !selection.local.contains(&virtual_field) {
                    selection.local.push(virtual_field);
                }
            }
            Err(_) => selection.server.push(field.to_string()),
        }
    }
    selection
}

/// Resolver set bound to one local store.
#[derive(Debug, Clone)]
pub struct LocalResolvers {
    store: LocalStore,
}

impl LocalResolvers {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn resolve_launch_field(&self, field: VirtualField, launch: &Launch) -> Value {
        self.resolve_for_id(field, &launch.id)
    }

    fn resolve_for_id(&self, field: VirtualField, id: &LaunchId) -> Value {
        match field {
            VirtualField::IsInCart => Value::Bool(self.store.cart_contains(id)),
        }
    }

    /// Read a local field on the query root.
    pub fn read_local(&self, field: LocalQueryField) -> Value {
        match field {
            LocalQueryField::IsLoggedIn => Value::Bool(self.store.is_logged_in()),
            LocalQueryField::CartItems => ids_value(self.store.cart_items()),
        }
    }

    /// Run a client mutation and return its result value.
    pub fn mutate(&self, mutation: &ClientMutation) -> Value {
        match mutation {
            ClientMutation::AddOrRemoveFromCart { id } => {
                ids_value(toggle_reservation(id, &self.store))
            }
        }
    }

    /// [`ClientMutation::parse`] followed by [`LocalResolvers::mutate`].
    pub fn mutate_named(&self, name: &str, args: &Value) -> Result<Value, ResolveError> {
        let mutation = ClientMutation::parse(name, args)?;
        Ok(self.mutate(&mutation))
    }

    /// Fill the requested virtual fields into a launch object returned by
    /// the server. The object must carry a string `id`.
    pub fn decorate(&self, entity: &mut Value, fields: &[VirtualField]) -> Result<(), ResolveError> {
        let object: &mut Map<String, Value> = entity.as_object_mut().ok_or_else(|| {
            ResolveError::InvalidArgument("launch must be a JSON object".to_string())
        })?;
        let id: LaunchId = object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ResolveError::InvalidArgument("launch has no string `id`".to_string()))?
            .into();

        for field in fields {
            object.insert(field.as_str().to_string(), self.resolve_for_id(*field, &id));
        }
        Ok(())
    }

    /// [`LocalResolvers::decorate`] over every launch of a page.
    pub fn decorate_all(
        &self,
        entities: &mut [Value],
        fields: &[VirtualField],
    ) -> Result<(), ResolveError> {
        entities
            .iter_mut()
            .try_for_each(|entity| self.decorate(entity, fields))
    }
}

fn ids_value(ids: Vec<LaunchId>) -> Value {
    Value::Array(
        ids.into_iter()
            .map(|id| Value::String(id.as_str().to_string()))
            .collect(),
    )
}
