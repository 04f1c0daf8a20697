//! ProcessQuery request envelope serialization.
//!
//! The server matches this payload literally, so output is byte-exact:
//! fixed root attributes in a fixed order, no XML declaration, no
//! whitespace between elements, and `<Tag ... />` for empty elements.
//! Do not reorder attributes.

use std::fmt;

use o365_core::{Error, Result};

use super::action::{Action, ActionList};
use super::object_path::{ObjectPath, ObjectPathGraph, Parameter};

/// `SchemaVersion` attribute of the request root.
pub const SCHEMA_VERSION: &str = "15.0.0.0";
/// `LibraryVersion` attribute of the request root.
pub const LIBRARY_VERSION: &str = "16.0.0.0";
/// `ApplicationName` attribute of the request root.
pub const APPLICATION_NAME: &str = ".NET Library";
/// Client query namespace.
pub const NAMESPACE: &str = "http://schemas.microsoft.com/sharepoint/clientquery/2009";

/// Lifecycle of one ProcessQuery exchange.
///
/// `Built` → `Sent` → `Resolved`. There are no retries; a transport error
/// or any error record moves straight to `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Envelope assembled and validated.
    Built,
    /// Posted, awaiting the response.
    Sent,
    /// Response mapped to success or failure.
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Built => "built",
            Self::Sent => "sent",
            Self::Resolved => "resolved",
        };
        f.write_str(s)
    }
}

/// A validated, serialized ProcessQuery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    xml: String,
    action_count: usize,
}

impl RequestEnvelope {
    /// Validates `graph` and `actions` and serializes them.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the action list is empty, the graph is
    /// malformed, an action id is reused (including an object path id), or
    /// an action targets an object path that is not in the graph.
    pub fn build(graph: &ObjectPathGraph, actions: &ActionList) -> Result<Self> {
        if actions.is_empty() {
            return Err(Error::validation("CSOM request has no actions"));
        }
        graph.validate()?;

        let mut action_ids = std::collections::HashSet::with_capacity(actions.len());
        for action in actions.actions() {
            if !action_ids.insert(action.id()) || graph.contains(action.id()) {
                return Err(Error::validation(format!(
                    "duplicate action id {}",
                    action.id()
                )));
            }
            if !graph.contains(action.object_path_id()) {
                return Err(Error::validation(format!(
                    "action {} references unknown object path {}",
                    action.id(),
                    action.object_path_id()
                )));
            }
        }

        Ok(Self {
            xml: serialize(graph, actions),
            action_count: actions.len(),
        })
    }

    /// The request body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consumes the envelope, returning the request body.
    #[must_use]
    pub fn into_string(self) -> String {
        self.xml
    }

    /// Number of actions in the envelope.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.action_count
    }
}

fn serialize(graph: &ObjectPathGraph, actions: &ActionList) -> String {
    let mut w = XmlWriter::default();

    w.open("Request");
    w.attr("AddExpandoFieldTypeSuffix", "true");
    w.attr("SchemaVersion", SCHEMA_VERSION);
    w.attr("LibraryVersion", LIBRARY_VERSION);
    w.attr("ApplicationName", APPLICATION_NAME);
    w.attr("xmlns", NAMESPACE);
    w.end_open();

    w.open("Actions");
    w.end_open();
    for action in actions.actions() {
        write_action(&mut w, action);
    }
    w.close("Actions");

    w.open("ObjectPaths");
    w.end_open();
    for path in graph.paths() {
        write_object_path(&mut w, path);
    }
    w.close("ObjectPaths");

    w.close("Request");
    w.finish()
}

fn write_action(w: &mut XmlWriter, action: &Action) {
    match action {
        Action::ObjectPath { id, object_path_id } => {
            w.open("ObjectPath");
            w.attr("Id", &id.to_string());
            w.attr("ObjectPathId", &object_path_id.to_string());
            w.self_close();
        }
        Action::Method {
            id,
            object_path_id,
            name,
            parameters,
        } => {
            w.open("Method");
            w.attr("Name", name);
            w.attr("Id", &id.to_string());
            w.attr("ObjectPathId", &object_path_id.to_string());
            write_parameters_and_close(w, "Method", parameters);
        }
    }
}

fn write_object_path(w: &mut XmlWriter, path: &ObjectPath) {
    match path {
        ObjectPath::Identity { id, name } => {
            w.open("Identity");
            w.attr("Id", &id.to_string());
            w.attr("Name", name);
            w.self_close();
        }
        ObjectPath::Property {
            id,
            parent_id,
            name,
        } => {
            w.open("Property");
            w.attr("Id", &id.to_string());
            w.attr("ParentId", &parent_id.to_string());
            w.attr("Name", name);
            w.self_close();
        }
        ObjectPath::Method {
            id,
            parent_id,
            name,
            parameters,
        } => {
            w.open("Method");
            w.attr("Id", &id.to_string());
            w.attr("ParentId", &parent_id.to_string());
            w.attr("Name", name);
            write_parameters_and_close(w, "Method", parameters);
        }
    }
}

/// Closes the currently open start tag, either as an empty element or with
/// a `<Parameters>` child.
fn write_parameters_and_close(w: &mut XmlWriter, tag: &str, parameters: &[Parameter]) {
    if parameters.is_empty() {
        w.self_close();
        return;
    }
    w.end_open();
    w.open("Parameters");
    w.end_open();
    for parameter in parameters {
        w.open("Parameter");
        w.attr("Type", parameter.type_name());
        match parameter.text() {
            Some(text) => {
                w.end_open();
                w.text(&text);
                w.close("Parameter");
            }
            None => w.self_close(),
        }
    }
    w.close("Parameters");
    w.close(tag);
}

#[derive(Default)]
struct XmlWriter {
    out: String,
}

impl XmlWriter {
    fn open(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.escape(value);
        self.out.push('"');
    }

    fn end_open(&mut self) {
        self.out.push('>');
    }

    fn self_close(&mut self) {
        self.out.push_str(" />");
    }

    fn text(&mut self, value: &str) {
        self.escape(value);
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn escape(&mut self, value: &str) {
        for c in value.chars() {
            match c {
                '&' => self.out.push_str("&amp;"),
                '<' => self.out.push_str("&lt;"),
                '>' => self.out.push_str("&gt;"),
                '"' => self.out.push_str("&quot;"),
                '\'' => self.out.push_str("&apos;"),
                _ => self.out.push(c),
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
