//! Object path graph: the remote objects a CSOM request talks about.
//!
//! Nodes reference their parent by id. The graph does not own the remote
//! objects; it only names them so actions can be applied against them.

use std::collections::{HashMap, HashSet};

use o365_core::{Error, Guid, Result};

/// A typed CSOM parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// `Type="Boolean"`, rendered `true` / `false`.
    Boolean(bool),
    /// `Type="String"`.
    String(String),
    /// `Type="Guid"`, rendered with braces.
    Guid(Guid),
    /// `Type="Int32"`.
    Int32(i32),
    /// `Type="Int64"`.
    Int64(i64),
    /// `Type="Null"`, rendered as an empty element.
    Null,
}

impl Parameter {
    /// The value of the `Type` attribute.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "Boolean",
            Self::String(_) => "String",
            Self::Guid(_) => "Guid",
            Self::Int32(_) => "Int32",
            Self::Int64(_) => "Int64",
            Self::Null => "Null",
        }
    }

    /// The element text, or `None` for an empty element.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Boolean(b) => Some(b.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Guid(g) => Some(g.to_csom()),
            Self::Int32(i) => Some(i.to_string()),
            Self::Int64(i) => Some(i.to_string()),
            Self::Null => None,
        }
    }
}

/// One node of the object path graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectPath {
    /// A root object addressed by its server identity string.
    Identity {
        /// Node id.
        id: u32,
        /// Server identity, e.g. `...:site:{id}:web:{id}:contenttype:{id}`.
        name: String,
    },
    /// A property read on the parent object.
    Property {
        /// Node id.
        id: u32,
        /// Id of the object the property is read from.
        parent_id: u32,
        /// Property name.
        name: String,
    },
    /// A method call on the parent object whose result is an object.
    Method {
        /// Node id.
        id: u32,
        /// Id of the object the method is invoked on.
        parent_id: u32,
        /// Method name.
        name: String,
        /// Positional arguments.
        parameters: Vec<Parameter>,
    },
}

impl ObjectPath {
    /// Node id.
    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            Self::Identity { id, .. } | Self::Property { id, .. } | Self::Method { id, .. } => *id,
        }
    }

    /// Parent node id, `None` for identities.
    #[must_use]
    pub fn parent_id(&self) -> Option<u32> {
        match self {
            Self::Identity { .. } => None,
            Self::Property { parent_id, .. } | Self::Method { parent_id, .. } => Some(*parent_id),
        }
    }
}

/// Ordered set of object path nodes, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPathGraph {
    paths: Vec<ObjectPath>,
}

impl ObjectPathGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an identity node.
    #[must_use]
    pub fn identity(mut self, id: u32, name: impl Into<String>) -> Self {
        self.paths.push(ObjectPath::Identity {
            id,
            name: name.into(),
        });
        self
    }

    /// Appends a property node.
    #[must_use]
    pub fn property(mut self, id: u32, parent_id: u32, name: impl Into<String>) -> Self {
        self.paths.push(ObjectPath::Property {
            id,
            parent_id,
            name: name.into(),
        });
        self
    }

    /// Appends a method node.
    #[must_use]
    pub fn method(
        mut self,
        id: u32,
        parent_id: u32,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        self.paths.push(ObjectPath::Method {
            id,
            parent_id,
            name: name.into(),
            parameters,
        });
        self
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn paths(&self) -> &[ObjectPath] {
        &self.paths
    }

    /// Returns true when a node with `id` exists.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.paths.iter().any(|p| p.id() == id)
    }

    /// Checks that ids are unique, every parent resolves, and no parent chain loops.
    ///
    /// Parents may be declared after their children; resolution is against
    /// the whole graph.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut parents: HashMap<u32, Option<u32>> = HashMap::with_capacity(self.paths.len());
        for path in &self.paths {
            if parents.insert(path.id(), path.parent_id()).is_some() {
                return Err(Error::validation(format!(
                    "duplicate object path id {}",
                    path.id()
                )));
            }
        }

        for path in &self.paths {
            if let Some(parent) = path.parent_id() {
                if !parents.contains_key(&parent) {
                    return Err(Error::validation(format!(
                        "object path {} references unknown parent {parent}",
                        path.id()
                    )));
                }
            }
        }

        for path in &self.paths {
            let mut seen = HashSet::new();
            let mut current = Some(path.id());
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(Error::validation(format!(
                        "object path {} has a cyclic parent chain",
                        path.id()
                    )));
                }
                current = parents.get(&id).copied().flatten();
            }
        }

        Ok(())
    }
}
