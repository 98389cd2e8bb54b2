use serde::Serialize;

/// Input kind of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Phone,
    Date,
    Time,
    Choice,
    MultiChoice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "long_text",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Choice => "choice",
            FieldKind::MultiChoice => "multi_choice",
        }
    }

    /// Whether the field holds a list of catalog entries instead of a string.
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::MultiChoice)
    }
}

/// Static descriptor for one field of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Serialized (camelCase) field name, also the key of validation errors.
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    /// Catalog for choice kinds, empty otherwise.
    pub choices: &'static [&'static str],
}

impl FieldSpec {
    pub const fn text(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            placeholder: None,
            kind: FieldKind::Text,
            required: true,
            choices: &[],
        }
    }

    pub const fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn choices(mut self, kind: FieldKind, choices: &'static [&'static str]) -> Self {
        self.kind = kind;
        self.choices = choices;
        self
    }
}
