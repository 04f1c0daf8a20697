//! Actions applied against the object path graph.
//!
//! The server executes actions in list order and answers with one result
//! entry per action, in the same position.

use super::object_path::Parameter;

/// A single CSOM action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Materializes an object path on the server.
    ObjectPath {
        /// Action id.
        id: u32,
        /// Object path the action refers to.
        object_path_id: u32,
    },
    /// Invokes a method whose result is not an object (e.g. `Update`).
    Method {
        /// Action id.
        id: u32,
        /// Object path the method is invoked on.
        object_path_id: u32,
        /// Method name.
        name: String,
        /// Positional arguments.
        parameters: Vec<Parameter>,
    },
}

impl Action {
    /// Action id.
    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            Self::ObjectPath { id, .. } | Self::Method { id, .. } => *id,
        }
    }

    /// The object path the action targets.
    #[must_use]
    pub fn object_path_id(&self) -> u32 {
        match self {
            Self::ObjectPath { object_path_id, .. } | Self::Method { object_path_id, .. } => {
                *object_path_id
            }
        }
    }
}

/// Ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object path action.
    #[must_use]
    pub fn object_path(mut self, id: u32, object_path_id: u32) -> Self {
        self.actions.push(Action::ObjectPath { id, object_path_id });
        self
    }

    /// Appends a method action.
    #[must_use]
    pub fn method(
        mut self,
        id: u32,
        object_path_id: u32,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        self.actions.push(Action::Method {
            id,
            object_path_id,
            name: name.into(),
            parameters,
        });
        self
    }

    /// Actions in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true when there are no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for ActionList {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
