//! Rendering of condition, update and key-condition trees into DynamoDB
//! expression strings.
//!
//! Every attribute name becomes a `#nN` placeholder and every value a `:vN`
//! placeholder, so reserved words such as `name` never appear literally.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use dynastore_core::{Condition, KeyCondition, UpdateAction, UpdateExpression};

/// Placeholder maps accumulated while rendering one request.
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn name(&mut self, name: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, n)| n.as_str() == name) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), name.to_string());
        placeholder
    }

    fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    pub fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::AttributeExists(name) => format!("attribute_exists({})", self.name(name)),
            Condition::AttributeNotExists(name) => {
                format!("attribute_not_exists({})", self.name(name))
            }
            Condition::Equal(name, value) => {
                let name = self.name(name);
                let value = self.value(value.clone());
                format!("{name} = {value}")
            }
            Condition::And(left, right) => {
                let left = self.condition(left);
                let right = self.condition(right);
                format!("({left}) AND ({right})")
            }
        }
    }

    /// Renders `ADD` and `SET` sections in clause order.
    pub fn update(&mut self, update: &UpdateExpression) -> String {
        let mut add = Vec::new();
        let mut set = Vec::new();
        for action in update.actions() {
            let name = self.name(action.name());
            let value = self.value(action.value().clone());
            match action {
                UpdateAction::Add { .. } => add.push(format!("{name} {value}")),
                UpdateAction::Set { .. } => set.push(format!("{name} = {value}")),
            }
        }

        let mut sections = Vec::new();
        if !add.is_empty() {
            sections.push(format!("ADD {}", add.join(", ")));
        }
        if !set.is_empty() {
            sections.push(format!("SET {}", set.join(", ")));
        }
        sections.join(" ")
    }

    pub fn key_condition(&mut self, key_condition: &KeyCondition) -> String {
        let partition_key = self.name(&key_condition.partition_key);
        let partition_value = self.value(key_condition.partition_value.clone());
        let sort_key = self.name(&key_condition.sort_key);
        let prefix = self.value(AttributeValue::S(key_condition.sort_prefix.clone()));
        format!("({partition_key} = {partition_value}) AND (begins_with({sort_key}, {prefix}))")
    }

    /// Placeholder maps, `None` when empty since DynamoDB rejects empty maps.
    pub fn build(
        self,
    ) -> (
        Option<HashMap<String, String>>,
        Option<HashMap<String, AttributeValue>>,
    ) {
        (
            (!self.names.is_empty()).then_some(self.names),
            (!self.values.is_empty()).then_some(self.values),
        )
    }
}
