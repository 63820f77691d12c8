use std::collections::BTreeMap;

/// Identifier (`Q42`, `P31`, ...) to human-readable label.
pub type LabelMap = BTreeMap<String, String>;

/// Property id to label, as produced from query-service bindings.
pub type PropertyLabelMap = LabelMap;

/// Item id to label, as produced from query-service bindings.
pub type ItemLabelMap = LabelMap;
