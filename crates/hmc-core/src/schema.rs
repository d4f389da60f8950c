//! Ordered field tables mapping field names to path expressions.

use hmc_xml::Path;

use crate::DecodeError;

/// One schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    path: Path,
    editable: bool,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the field accepts in-place updates.
    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

/// Field table for one record type.
///
/// Field order is declaration order and is kept stable so that formatting
/// and debugging output is reproducible. At most one field is editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    type_name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Schema {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Build a schema from a static `(field, path)` table.
    pub fn from_table(
        type_name: impl Into<String>,
        table: &[(&str, &str)],
    ) -> Result<Self, DecodeError> {
        Schema::new(type_name).with_table(table)
    }

    /// Copy this schema under a new type name and append (or override) fields.
    ///
    /// Overridden fields keep the base position; new fields go at the end.
    pub fn extend(
        &self,
        type_name: impl Into<String>,
        table: &[(&str, &str)],
    ) -> Result<Self, DecodeError> {
        let mut schema = self.clone();
        schema.type_name = type_name.into();
        schema.with_table(table)
    }

    /// Append a table to this schema.
    pub fn with_table(mut self, table: &[(&str, &str)]) -> Result<Self, DecodeError> {
        for (name, expr) in table {
            self.insert(name, expr)?;
        }
        Ok(self)
    }

    /// Add one field, replacing the path of an existing field of that name.
    pub fn insert(&mut self, name: &str, expr: &str) -> Result<(), DecodeError> {
        if name.is_empty() {
            return Err(DecodeError::Invalid(format!(
                "{} declares a field without a name",
                self.type_name
            )));
        }
        let path = Path::parse(expr)?;
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.path = path,
            None => self.fields.push(Field {
                name: name.to_string(),
                path,
                editable: false,
            }),
        }
        Ok(())
    }

    /// Mark `name` as the single field that accepts in-place updates.
    pub fn with_editable(mut self, name: &str) -> Result<Self, DecodeError> {
        if let Some(existing) = self.editable_field() {
            if existing.name != name {
                return Err(DecodeError::Invalid(format!(
                    "{} already has editable field {}",
                    self.type_name, existing.name
                )));
            }
        }
        let type_name = self.type_name.clone();
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| DecodeError::UnknownField {
                type_name,
                field: name.to_string(),
            })?;
        field.editable = true;
        Ok(self)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn editable_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.editable)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
