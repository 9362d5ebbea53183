//! Backend-agnostic condition, update and key-condition expressions.
//!
//! The store decides which clauses apply to each operation; backends either
//! render these trees into their native expression language or evaluate them
//! directly.

use aws_sdk_dynamodb::types::AttributeValue;

use crate::backend::{BackendError, Item};

/// A predicate evaluated by the backend against the stored item.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    AttributeExists(String),
    AttributeNotExists(String),
    Equal(String, AttributeValue),
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn attribute_exists(name: impl Into<String>) -> Self {
        Condition::AttributeExists(name.into())
    }

    pub fn attribute_not_exists(name: impl Into<String>) -> Self {
        Condition::AttributeNotExists(name.into())
    }

    pub fn equal(name: impl Into<String>, value: AttributeValue) -> Self {
        Condition::Equal(name.into(), value)
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// Evaluates the condition against the stored item, `None` when absent.
    pub fn evaluate(&self, item: Option<&Item>) -> bool {
        match self {
            Condition::AttributeExists(name) => item.is_some_and(|i| i.contains_key(name)),
            Condition::AttributeNotExists(name) => !item.is_some_and(|i| i.contains_key(name)),
            Condition::Equal(name, expected) => item
                .and_then(|i| i.get(name))
                .is_some_and(|actual| values_equal(actual, expected)),
            Condition::And(left, right) => left.evaluate(item) && right.evaluate(item),
        }
    }
}

/// Equality with numbers compared by value rather than by their text form.
fn values_equal(a: &AttributeValue, b: &AttributeValue) -> bool {
    match (a, b) {
        (AttributeValue::N(x), AttributeValue::N(y)) => match (parse_number(x), parse_number(y)) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Sums two numeric attribute texts, keeping integers exact.
fn add_numbers(current: &str, delta: &str) -> Option<String> {
    if let (Ok(a), Ok(b)) = (current.trim().parse::<i64>(), delta.trim().parse::<i64>()) {
        return a.checked_add(b).map(|sum| sum.to_string());
    }
    Some((parse_number(current)? + parse_number(delta)?).to_string())
}

/// A single clause of an update expression.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Atomically add a number to the attribute, initialising it when absent.
    Add { name: String, value: AttributeValue },
    /// Replace the attribute value.
    Set { name: String, value: AttributeValue },
}

impl UpdateAction {
    pub fn name(&self) -> &str {
        match self {
            UpdateAction::Add { name, .. } | UpdateAction::Set { name, .. } => name,
        }
    }

    pub fn value(&self) -> &AttributeValue {
        match self {
            UpdateAction::Add { value, .. } | UpdateAction::Set { value, .. } => value,
        }
    }
}

/// Ordered list of update clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    actions: Vec<UpdateAction>,
}

impl UpdateExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.actions.push(UpdateAction::Add {
            name: name.into(),
            value,
        });
        self
    }

    pub fn set(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.actions.push(UpdateAction::Set {
            name: name.into(),
            value,
        });
        self
    }

    pub fn actions(&self) -> &[UpdateAction] {
        &self.actions
    }

    /// Returns the value assigned to `name` by a SET clause, if any.
    pub fn set_value(&self, name: &str) -> Option<&AttributeValue> {
        self.actions.iter().find_map(|action| match action {
            UpdateAction::Set { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Applies every clause to `item` in order.
    ///
    /// ADD initialises a missing attribute to the added value and only
    /// supports numbers.
    pub fn apply(&self, item: &mut Item) -> Result<(), BackendError> {
        for action in &self.actions {
            match action {
                UpdateAction::Set { name, value } => {
                    item.insert(name.clone(), value.clone());
                }
                UpdateAction::Add { name, value } => {
                    let AttributeValue::N(delta) = value else {
                        return Err(BackendError::InvalidRequest(format!(
                            "ADD on `{name}` requires a number operand"
                        )));
                    };
                    let sum = match item.get(name) {
                        None => delta.clone(),
                        Some(AttributeValue::N(current)) => add_numbers(current, delta)
                            .ok_or_else(|| {
                                BackendError::InvalidRequest(format!(
                                    "ADD on `{name}` overflowed or was not numeric"
                                ))
                            })?,
                        Some(_) => {
                            return Err(BackendError::InvalidRequest(format!(
                                "ADD on `{name}` requires a number attribute"
                            )));
                        }
                    };
                    item.insert(name.clone(), AttributeValue::N(sum));
                }
            }
        }
        Ok(())
    }
}

/// Range query condition: partition key equality and a sort key prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    pub partition_key: String,
    pub partition_value: AttributeValue,
    pub sort_key: String,
    pub sort_prefix: String,
}
