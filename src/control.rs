use serde::{Deserialize, Serialize};

/// Position of a control among the document's `input, textarea, select`
/// elements, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Input,
    Textarea,
    Select,
}

/// Input types never counted or filled.
const UNFILLABLE_TYPES: &[&str] = &["hidden", "submit", "button", "image", "file"];

/// Input types the clearer leaves alone.
const UNCLEARABLE_TYPES: &[&str] = &["hidden", "submit", "button"];

/// Snapshot of a single form control as seen at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControl {
    pub handle: ControlHandle,
    pub tag: Tag,
    /// Lower-cased DOM `type` property (`text` for a bare input).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub aria_label: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub value: String,
}

impl FormControl {
    fn with_tag(tag: Tag, kind: &str) -> Self {
        Self {
            handle: ControlHandle(0),
            tag,
            kind: kind.to_lowercase(),
            name: String::new(),
            id: String::new(),
            placeholder: String::new(),
            aria_label: String::new(),
            class_name: String::new(),
            disabled: false,
            read_only: false,
            value: String::new(),
        }
    }

    /// An `<input>` of the given type; an empty type means `text`.
    pub fn input(kind: &str) -> Self {
        let kind = if kind.is_empty() { "text" } else { kind };
        Self::with_tag(Tag::Input, kind)
    }

    pub fn textarea() -> Self {
        Self::with_tag(Tag::Textarea, "textarea")
    }

    pub fn select() -> Self {
        Self::with_tag(Tag::Select, "select-one")
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn is_type(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// Whether the filler counts this control in `found`.
    pub fn is_fillable(&self) -> bool {
        !self.disabled && !self.read_only && !self.has_type_in(UNFILLABLE_TYPES)
    }

    /// Whether the clearer resets this control. Selects are never cleared.
    pub fn is_clearable(&self) -> bool {
        self.tag != Tag::Select
            && !self.disabled
            && !self.read_only
            && !self.has_type_in(UNCLEARABLE_TYPES)
    }

    /// Lower-cased `"{name} {id} {placeholder} {aria-label} {class}"`.
    pub fn identity(&self) -> String {
        [
            self.name.as_str(),
            self.id.as_str(),
            self.placeholder.as_str(),
            self.aria_label.as_str(),
            self.class_name.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    fn has_type_in(&self, kinds: &[&str]) -> bool {
        kinds.iter().any(|k| self.is_type(k))
    }
}
