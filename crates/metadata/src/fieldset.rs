//! Fieldsets and their fields.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of form field types a fieldset may use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    ShortText,
    Textarea,
    Url,
    RadioButtons,
    Dropdown,
    Checkbox,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::ShortText,
        FieldType::Textarea,
        FieldType::Url,
        FieldType::RadioButtons,
        FieldType::Dropdown,
        FieldType::Checkbox,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::ShortText => "short-text",
            FieldType::Textarea => "textarea",
            FieldType::Url => "url",
            FieldType::RadioButtons => "radio-buttons",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
        }
    }

    /// Choice fields pick one of a fixed list of options.
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::RadioButtons | FieldType::Dropdown)
    }

    /// Whether submitted values of this type are JSON strings.
    pub fn is_textual(self) -> bool {
        !matches!(self, FieldType::Checkbox)
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A single typed attribute within a fieldset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Key used both in submitted JSON and in the compiled schema.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub optional: bool,
    /// Non-empty exactly for radio-buttons and dropdown fields.
    pub options: Vec<String>,
}

/// A named, ordered group of fields describing one aspect of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fieldset {
    pub slug: String,
    pub name: String,
    pub fields: Vec<Field>,
}

impl Fieldset {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
