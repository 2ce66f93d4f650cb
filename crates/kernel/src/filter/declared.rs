//! Filters declared in the site file rather than in code.

use serde::{Deserialize, Serialize};

use super::{DEFAULT_SEPARATOR, Encoding, FilterDefinition, FilterOption, MultiSelect, Selection};

/// A filter declaration from the `filters:` list of the site file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDeclaration {
    /// Registry identifier sections refer to.
    pub id: String,
    /// Query-string key.
    pub parameter: String,
    /// Display title; defaults to the parameter name.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub selection: SelectionDeclaration,
    #[serde(default)]
    pub values: Vec<FilterOption>,
}

/// Serialized form of [`Selection`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionDeclaration {
    #[default]
    Single,
    Multi {
        #[serde(default)]
        encoding: EncodingDeclaration,
        #[serde(default = "default_separator")]
        separator: String,
        #[serde(default)]
        checkbox: bool,
    },
}

/// Serialized form of [`Encoding`]; the separator lives beside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EncodingDeclaration {
    #[default]
    Delimited,
    Array,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl SelectionDeclaration {
    pub fn to_selection(&self) -> Selection {
        match self {
            SelectionDeclaration::Single => Selection::Single,
            SelectionDeclaration::Multi {
                encoding,
                separator,
                checkbox,
            } => Selection::Multi(MultiSelect {
                encoding: match encoding {
                    EncodingDeclaration::Delimited => Encoding::Delimited(separator.clone()),
                    EncodingDeclaration::Array => Encoding::ArrayParam,
                },
                display_as_checkbox: *checkbox,
            }),
        }
    }
}

impl FilterDeclaration {
    /// Describe the first problem that makes this declaration unusable.
    pub fn problem(&self) -> Option<String> {
        if self.parameter.trim().is_empty() {
            return Some("parameter must not be empty".to_string());
        }
        match &self.selection {
            SelectionDeclaration::Multi {
                encoding: EncodingDeclaration::Delimited,
                separator,
                ..
            } if separator.is_empty() => {
                Some("delimited selection needs a non-empty separator".to_string())
            }
            _ => None,
        }
    }
}

/// [`FilterDefinition`] backed by a [`FilterDeclaration`].
#[derive(Debug, Clone)]
pub struct DeclaredFilter {
    parameter: String,
    label: String,
    selection: Selection,
    values: Vec<FilterOption>,
}

impl From<&FilterDeclaration> for DeclaredFilter {
    fn from(decl: &FilterDeclaration) -> Self {
        Self {
            parameter: decl.parameter.clone(),
            label: decl.label.clone().unwrap_or_else(|| decl.parameter.clone()),
            selection: decl.selection.to_selection(),
            values: decl.values.clone(),
        }
    }
}

impl FilterDefinition for DeclaredFilter {
    fn parameter(&self) -> &str {
        &self.parameter
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn values(&self) -> Vec<FilterOption> {
        self.values.clone()
    }

    fn selection(&self) -> Selection {
        self.selection.clone()
    }
}
