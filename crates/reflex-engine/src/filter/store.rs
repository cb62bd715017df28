//! Filter store
//!
//! Holds the field list and filter lines behind a UI filter panel and
//! reduces the lines to a composite criteria and a display string.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use reflex_types::ReflectError;

use crate::delegate::{delegate_combine, delegate_remove, Delegate};
use crate::filter::criteria::{Criteria, CriteriaOp};
use crate::localization::{Culture, LocalTextRegistry, FILTER_PANEL_AND, FILTER_PANEL_OR};

/// A field descriptor the filter panel offers for filtering
///
/// Property items arrive from the server as JSON; `title` is a
/// localization key with the literal title as fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyItem {
    /// Field name, unique within one store
    pub name: String,
    /// Title localization key, absent when the name should be shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PropertyItem {
    /// Item with no title
    pub fn named(name: impl Into<String>) -> Self {
        PropertyItem {
            name: name.into(),
            title: None,
        }
    }

    /// Item with a title key
    pub fn titled(name: impl Into<String>, title: impl Into<String>) -> Self {
        PropertyItem {
            name: name.into(),
            title: Some(title.into()),
        }
    }
}

/// One line of a filter panel
#[derive(Debug, Clone, Default)]
pub struct FilterLine {
    /// The line's own criteria
    pub criteria: Criteria,
    /// Rendered text of the line's condition
    pub display_text: String,
    /// Connective joining this line to what precedes it
    pub is_or: bool,
    /// The line opens an explicit group
    pub left_paren: bool,
    /// The line closes the group it belongs to
    pub right_paren: bool,
}

impl FilterLine {
    /// Line joined with AND
    pub fn new(criteria: Criteria, display_text: impl Into<String>) -> Self {
        FilterLine {
            criteria,
            display_text: display_text.into(),
            ..FilterLine::default()
        }
    }

    /// Join this line with OR instead of AND
    pub fn or(mut self) -> Self {
        self.is_or = true;
        self
    }

    /// Mark this line as opening a group
    pub fn open_paren(mut self) -> Self {
        self.left_paren = true;
        self
    }

    /// Mark this line as closing its group
    pub fn close_paren(mut self) -> Self {
        self.right_paren = true;
        self
    }

    fn op(&self) -> CriteriaOp {
        if self.is_or {
            CriteriaOp::Or
        } else {
            CriteriaOp::And
        }
    }
}

/// Marker payload delivered to changed handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterChanged;

/// Field list plus filter lines, with change notification
#[derive(Debug)]
pub struct FilterStore {
    fields: Vec<PropertyItem>,
    field_by_name: FxHashMap<String, usize>,
    items: Vec<FilterLine>,
    changed: Option<Delegate<FilterChanged>>,
    display_text: Option<String>,
}

impl FilterStore {
    /// Build a store over `fields`, sorted by localized title
    ///
    /// The sort key is the title's localized text, falling back to the
    /// title key itself and then to the field name, compared with the
    /// culture's collation.
    pub fn new(
        fields: Option<Vec<PropertyItem>>,
        texts: &LocalTextRegistry,
        culture: &Culture,
    ) -> Result<FilterStore, ReflectError> {
        let mut fields = fields.ok_or_else(|| ReflectError::argument_null("fields"))?;

        fields.sort_by(|x, y| {
            culture.string_compare(&Self::sort_title(x, texts), &Self::sort_title(y, texts))
        });

        let mut field_by_name = FxHashMap::default();
        for (index, field) in fields.iter().enumerate() {
            field_by_name.insert(field.name.clone(), index);
        }

        Ok(FilterStore {
            fields,
            field_by_name,
            items: Vec::new(),
            changed: None,
            display_text: None,
        })
    }

    fn sort_title(field: &PropertyItem, texts: &LocalTextRegistry) -> String {
        match &field.title {
            Some(title) => texts
                .try_get_text(title)
                .unwrap_or(title.as_str())
                .to_string(),
            None => field.name.clone(),
        }
    }

    /// Fields in display order
    pub fn fields(&self) -> &[PropertyItem] {
        &self.fields
    }

    /// Field descriptor by name
    pub fn field_by_name(&self, name: &str) -> Option<&PropertyItem> {
        self.field_by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Current filter lines
    pub fn items(&self) -> &[FilterLine] {
        &self.items
    }

    /// Mutable filter lines; call [`FilterStore::raise_changed`] after
    /// editing
    pub fn items_mut(&mut self) -> &mut Vec<FilterLine> {
        &mut self.items
    }

    /// Subscribe a changed handler
    pub fn add_changed(&mut self, handler: Delegate<FilterChanged>) {
        self.changed = delegate_combine(self.changed.take(), Some(handler));
    }

    /// Unsubscribe a previously added handler
    pub fn remove_changed(&mut self, handler: &Delegate<FilterChanged>) {
        self.changed = delegate_remove(self.changed.take(), Some(handler));
    }

    /// Invalidate the cached display text and notify subscribers
    pub fn raise_changed(&mut self) {
        self.display_text = None;
        if let Some(changed) = self.changed.clone() {
            changed.invoke(&FilterChanged);
        }
    }

    /// Composite criteria of the current lines
    pub fn active_criteria(&self) -> Criteria {
        Self::get_criteria_for(&self.items)
    }

    /// Display text of the current lines, cached until the next change
    pub fn display_text(&mut self, texts: &LocalTextRegistry) -> &str {
        if self.display_text.is_none() {
            self.display_text = Some(Self::get_display_text_for(&self.items, texts));
        }
        self.display_text.as_deref().unwrap_or_default()
    }

    /// Reduce `items` to one composite criteria
    ///
    /// Lines fold into a running block with their own connective. A line
    /// opening a group first flushes the block; a line closing its group
    /// flushes the parenthesized block with that line's connective. The
    /// trailing block always flushes parenthesized.
    pub fn get_criteria_for(items: &[FilterLine]) -> Criteria {
        let mut criteria = Criteria::Empty;
        let mut current_block = Criteria::Empty;
        let mut in_parens = false;
        let mut block_or = false;

        for line in items {
            if line.left_paren {
                if !current_block.is_empty() {
                    let mut block = std::mem::take(&mut current_block);
                    if in_parens {
                        block = block.paren();
                    }
                    let op = if block_or { CriteriaOp::Or } else { CriteriaOp::And };
                    criteria = Criteria::join(criteria, op, block);
                }
                block_or = line.is_or;
                in_parens = true;
            }

            current_block = Criteria::join(current_block, line.op(), line.criteria.clone());

            if in_parens && line.right_paren {
                let block = std::mem::take(&mut current_block).paren();
                criteria = Criteria::join(criteria, line.op(), block);
                in_parens = false;
                block_or = false;
            }
        }

        if !current_block.is_empty() {
            let op = if block_or { CriteriaOp::Or } else { CriteriaOp::And };
            criteria = Criteria::join(criteria, op, current_block.paren());
        }

        criteria
    }

    /// Render `items` as a human-readable string with localized
    /// connectives and literal parentheses at group boundaries
    pub fn get_display_text_for(items: &[FilterLine], texts: &LocalTextRegistry) -> String {
        let mut display = String::new();
        let mut block = String::new();
        let mut in_parens = false;
        let mut block_or = false;

        for line in items {
            if line.left_paren {
                if !block.is_empty() {
                    let flushed = if in_parens {
                        format!("({block})")
                    } else {
                        std::mem::take(&mut block)
                    };
                    append_joined(&mut display, block_or, &flushed, texts);
                    block.clear();
                }
                block_or = line.is_or;
                in_parens = true;
            }

            append_joined(&mut block, line.is_or, &line.display_text, texts);

            if in_parens && line.right_paren {
                let flushed = format!("({block})");
                append_joined(&mut display, line.is_or, &flushed, texts);
                block.clear();
                in_parens = false;
                block_or = false;
            }
        }

        if !block.is_empty() {
            let flushed = if in_parens {
                format!("({block})")
            } else {
                std::mem::take(&mut block)
            };
            append_joined(&mut display, block_or, &flushed, texts);
        }

        display
    }
}

fn append_joined(target: &mut String, is_or: bool, text: &str, texts: &LocalTextRegistry) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
        target.push_str(&texts.text(if is_or { FILTER_PANEL_OR } else { FILTER_PANEL_AND }));
        target.push(' ');
    }
    target.push_str(text);
}
