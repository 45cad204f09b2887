use indexmap::IndexMap;

use crate::{
    error::{ParseError, SheetError},
    grammar::evaluator::functions::FunctionRegistry,
    sheet::{
        classify::classify,
        evaluate::{Evaluation, RawValue, evaluate},
        split::split,
    },
    store::{IdentityProvider, Record, StoreError, name_hash},
};

/// An editable sheet session.
///
/// A worksheet owns the source text, the statement list and alias map
/// derived from it, the raw input values the user has supplied, and the
/// function registry evaluation dispatches through. Statements and aliases
/// are recomputed in full on every edit; input values persist across edits
/// for any variable whose name is unchanged and are dropped for variables
/// no longer referenced. Recomputation is an explicit entry point
/// ([`Worksheet::calculate`]) invoked by the caller after binding
/// mutations, never an implicit subscription.
///
/// # Example
/// ```
/// use reckon::{grammar::value::Value, sheet::worksheet::Worksheet};
///
/// let mut sheet = Worksheet::new();
/// sheet.set_text("total = price * qty;\ntotal * 1.2").unwrap();
/// sheet.set_input("price", "10");
/// sheet.set_input("qty", "3");
///
/// let outcome = sheet.calculate().unwrap();
///
/// assert_eq!(outcome.result(), Some(&Value::Number(36.0)));
/// assert_eq!(outcome.output("total"), Some(&Value::Number(30.0)));
/// ```
pub struct Worksheet {
    functions:  FunctionRegistry,
    text:       String,
    statements: Vec<String>,
    aliases:    IndexMap<String, String>,
    inputs:     IndexMap<String, String>,
}

#[allow(clippy::new_without_default)]
impl Worksheet {
    /// Creates an empty worksheet with the default function registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_functions(FunctionRegistry::default())
    }

    /// Creates an empty worksheet dispatching calls through `functions`.
    #[must_use]
    pub fn with_functions(functions: FunctionRegistry) -> Self {
        Self { functions,
               text: String::new(),
               statements: Vec::new(),
               aliases: IndexMap::new(),
               inputs: IndexMap::new() }
    }

    /// Gives mutable access to the function registry, e.g. to register
    /// additional named functions for this session.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Replaces the sheet text, re-splitting and re-classifying.
    ///
    /// The statement list and alias map are always rebuilt. On successful
    /// classification the input map is rebuilt by an explicit merge: the
    /// previous value is carried forward for every name still classified
    /// as an input, new names start empty, and names no longer referenced
    /// are dropped. When classification fails the previous input map is
    /// kept untouched and the error is returned; the caller must treat the
    /// input set as unknown.
    pub fn set_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.text = text.to_string();

        let (statements, aliases) = split(text);
        self.statements = statements;
        self.aliases = aliases;

        let names = classify(&self.statements)?;

        let mut previous = std::mem::take(&mut self.inputs);
        self.inputs = names.into_iter()
                           .map(|name| {
                               let value = previous.shift_remove(&name).unwrap_or_default();
                               (name, value)
                           })
                           .collect();

        Ok(())
    }

    /// Stores a raw value for an input variable.
    pub fn set_input(&mut self, name: &str, value: &str) {
        self.inputs.insert(name.to_string(), value.to_string());
    }

    /// Looks up the raw value currently stored for an input variable.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// Iterates the classified input variables and their raw values, in
    /// first-appearance order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The display aliases extracted from comment lines.
    #[must_use]
    pub const fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    /// Looks up the display alias for a variable.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Renders a variable name for display: `"Alias (name)"` when the
    /// variable has an alias, the bare name otherwise.
    #[must_use]
    pub fn display_name(&self, name: &str) -> String {
        self.alias(name)
            .map_or_else(|| name.to_string(), |alias| format!("{alias} ({name})"))
    }

    /// The current statement list.
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// The current sheet text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Evaluates the sheet against the stored input values.
    ///
    /// This is the explicit recompute entry point; callers invoke it after
    /// any text or binding mutation. A failed evaluation yields the error
    /// description and no outputs; previously computed outputs are stale
    /// the moment this is called.
    pub fn calculate(&self) -> Result<Evaluation, SheetError> {
        let bindings: IndexMap<String, RawValue> =
            self.inputs
                .iter()
                .map(|(name, value)| (name.clone(), RawValue::Text(value.clone())))
                .collect();

        evaluate(&self.statements, &bindings, &self.functions)
    }

    /// Snapshots the worksheet into a persistence record.
    ///
    /// The record carries the sheet text, the JSON-serialized input
    /// bindings, the given display name, the identity provider's partition
    /// key, and a row key derived from the display name via [`name_hash`],
    /// so re-saving under the same name overwrites rather than duplicates.
    pub fn to_record(&self,
                     name: &str,
                     identity: &dyn IdentityProvider)
                     -> Result<Record, StoreError> {
        let variables =
            serde_json::to_string(&self.inputs).map_err(|e| StoreError::Serialization { message: e.to_string() })?;

        Ok(Record { expression:    self.text.clone(),
                    variables,
                    name:          name.to_string(),
                    pinned:        false,
                    partition_key: identity.partition_key(),
                    row_key:       name_hash(name), })
    }

    /// Restores a worksheet from a persistence record.
    ///
    /// The record's expression text is loaded (re-splitting and
    /// re-classifying), then the stored raw values are applied to every
    /// input variable the new classification still names. A variables
    /// payload that fails to deserialize is ignored and the inputs stay at
    /// their defaults.
    pub fn load_record(&mut self, record: &Record) -> Result<(), SheetError> {
        self.set_text(&record.expression)?;

        let stored: IndexMap<String, String> =
            serde_json::from_str(&record.variables).unwrap_or_default();
        for (name, value) in stored {
            if self.inputs.contains_key(&name) {
                self.inputs.insert(name, value);
            }
        }

        Ok(())
    }
}
