//! Resource definition types: one `ResourceDef` per table, describing columns, validation,
//! list filters and which verbs the endpoint exposes.

/// Storage and wire type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    Bool,
    /// JSON array of strings, stored as TEXT.
    TextList,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer | ColumnKind::Bool => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text | ColumnKind::TextList => "TEXT",
        }
    }
}

/// Who writes a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    PrimaryKey,
    /// Server-assigned ISO-8601 time. Set on insert; refreshed on every update when `touch` is set.
    Timestamp { touch: bool },
    /// Client-writable. `on_create: false` means the field is only accepted on update.
    Field { on_create: bool },
}

/// Value check applied after the type check.
#[derive(Clone, Copy, Debug)]
pub enum Check {
    None,
    OneOf(&'static [&'static str]),
    Range { min: Option<f64>, max: Option<f64> },
    Pattern(&'static str),
}

/// Per-column validation. `code`/`message` are reported when the type or value check fails.
#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub required: bool,
    pub check: Check,
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    /// Database column name (snake_case). The wire name is its camelCase form.
    pub name: &'static str,
    /// Human label used in per-field messages ("Icon name is required").
    pub label: &'static str,
    pub kind: ColumnKind,
    pub role: ColumnRole,
    pub nullable: bool,
    /// SQL default expression; insert omits the column when the body has no value.
    pub default: Option<&'static str>,
    pub rule: ValidationRule,
}

impl ColumnDef {
    pub const fn primary_key() -> Self {
        ColumnDef {
            name: "id",
            label: "ID",
            kind: ColumnKind::Integer,
            role: ColumnRole::PrimaryKey,
            nullable: false,
            default: None,
            rule: ValidationRule {
                required: false,
                check: Check::None,
                code: "INVALID_ID",
                message: "Valid ID is required",
            },
        }
    }

    const fn field(name: &'static str, label: &'static str, kind: ColumnKind) -> Self {
        ColumnDef {
            name,
            label,
            kind,
            role: ColumnRole::Field { on_create: true },
            nullable: false,
            default: None,
            rule: ValidationRule {
                required: true,
                check: Check::None,
                code: "INVALID_FIELD_TYPE",
                message: "",
            },
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::field(name, label, ColumnKind::Text)
    }

    pub const fn real(name: &'static str, label: &'static str) -> Self {
        Self::field(name, label, ColumnKind::Real)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::field(name, label, ColumnKind::Integer)
    }

    pub const fn text_list(name: &'static str, label: &'static str) -> Self {
        Self::field(name, label, ColumnKind::TextList)
    }

    pub const fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::field(name, label, ColumnKind::Bool)
    }

    pub const fn timestamp(name: &'static str, touch: bool) -> Self {
        ColumnDef {
            name,
            label: name,
            kind: ColumnKind::Text,
            role: ColumnRole::Timestamp { touch },
            nullable: false,
            default: None,
            rule: ValidationRule {
                required: false,
                check: Check::None,
                code: "INVALID_FIELD_TYPE",
                message: "",
            },
        }
    }

    pub const fn optional(mut self) -> Self {
        self.nullable = true;
        self.rule.required = false;
        self
    }

    /// Not required on create; the database default fills it in.
    pub const fn with_default(mut self, sql: &'static str) -> Self {
        self.default = Some(sql);
        self.rule.required = false;
        self
    }

    pub const fn update_only(mut self) -> Self {
        self.role = ColumnRole::Field { on_create: false };
        self.rule.required = false;
        self
    }

    pub const fn invalid(mut self, code: &'static str, message: &'static str) -> Self {
        self.rule.code = code;
        self.rule.message = message;
        self
    }

    pub const fn one_of(self, values: &'static [&'static str], code: &'static str, message: &'static str) -> Self {
        let mut c = self.invalid(code, message);
        c.rule.check = Check::OneOf(values);
        c
    }

    pub const fn range(self, min: Option<f64>, max: Option<f64>, code: &'static str, message: &'static str) -> Self {
        let mut c = self.invalid(code, message);
        c.rule.check = Check::Range { min, max };
        c
    }

    pub const fn pattern(self, regex: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut c = self.invalid(code, message);
        c.rule.check = Check::Pattern(regex);
        c
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self.role, ColumnRole::PrimaryKey)
    }
}

/// How a missing required field is reported on create.
#[derive(Clone, Copy, Debug)]
pub enum RequiredStyle {
    /// One `MISSING_REQUIRED_FIELDS` error carrying this message.
    AllAtOnce(&'static str),
    /// `MISSING_REQUIRED_FIELD` for the first missing column: "<label> is required".
    EachField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    /// Case-insensitive substring (`LIKE %v%`) over any of the columns.
    Contains,
}

/// Query-string filter: `?<param>=v` matches `columns` with `op`.
#[derive(Clone, Copy, Debug)]
pub struct FilterDef {
    pub param: &'static str,
    pub columns: &'static [&'static str],
    pub op: FilterOp,
}

#[derive(Clone, Copy, Debug)]
pub enum SortSpec {
    Fixed { column: &'static str, descending: bool },
    /// Client picks `?sort=` among `allowed` (unknown falls back to `default`) and `?order=asc|desc`.
    Selectable { allowed: &'static [&'static str], default: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct ListSpec {
    pub filters: &'static [FilterDef],
    /// Always-on equality condition, e.g. only active alerts.
    pub scope: Option<(&'static str, bool)>,
    pub sort: SortSpec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteMode {
    None,
    /// Set the boolean column to false and keep the row.
    Soft(&'static str),
    Hard,
}

#[derive(Debug)]
pub struct ResourceDef {
    /// Envelope key for list reads ("alerts", "shelters", ...).
    pub name: &'static str,
    /// Route path below `/api`.
    pub path: &'static str,
    pub table: &'static str,
    /// Singular label for messages ("Alert not found", "Alert created successfully").
    pub label: &'static str,
    pub columns: &'static [ColumnDef],
    pub required_style: RequiredStyle,
    /// `None`: GET without `id` returns the first row (singleton resources).
    pub list: Option<ListSpec>,
    pub delete: DeleteMode,
    /// Reject updates that carry none of the writable fields (`NO_UPDATE_FIELDS`).
    pub require_update_fields: bool,
}

impl ResourceDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.is_primary_key())
    }

    pub fn pk_name(&self) -> &'static str {
        self.primary_key().map(|c| c.name).unwrap_or("id")
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label)
    }
}
