//! Value display conversion for log records.
//!
//! Arguments and return values are rendered through an ordered list of
//! strategies, evaluated in registration order, with JSON serialization
//! as the fallback. Absent values render as a fixed sentinel.

use serde_json::Value;

/// Rendering of an absent value.
pub const NULL_SENTINEL: &str = "[NULL]";
/// Separator between rendered arguments in a list.
const ARGUMENT_SEPARATOR: &str = ",";

struct DisplayStrategy {
    matches: Box<dyn Fn(&Value) -> bool + Send + Sync>,
    render: Box<dyn Fn(&Value) -> String + Send + Sync>,
}

/// Ordered registry of per-type display strategies.
///
/// The default registry carries one strategy: text values are wrapped in
/// quotation marks. Everything else falls through to JSON serialization.
/// A registry is populated before it is handed to an advice instance and
/// never mutated afterwards.
pub struct DisplayStrategies {
    strategies: Vec<DisplayStrategy>,
}

impl Default for DisplayStrategies {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            |value| value.is_string(),
            |value| match value {
                Value::String(text) => format!("\"{text}\""),
                other => other.to_string(),
            },
        );
        registry
    }
}

impl DisplayStrategies {
    /// Registry with no strategies; everything falls back to JSON.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Append a strategy. Strategies are consulted in registration order;
    /// the first match wins.
    pub fn register(
        &mut self,
        matches: impl Fn(&Value) -> bool + Send + Sync + 'static,
        render: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) {
        self.strategies.push(DisplayStrategy {
            matches: Box::new(matches),
            render: Box::new(render),
        });
    }

    /// Render one value for display.
    pub fn render(&self, value: &Value) -> String {
        if value.is_null() {
            return NULL_SENTINEL.to_string();
        }
        for strategy in &self.strategies {
            if (strategy.matches)(value) {
                return (strategy.render)(value);
            }
        }
        // serde_json's Display is compact JSON text.
        value.to_string()
    }

    /// Render an argument list: per-argument display strings joined with
    /// a comma, wrapped in parentheses.
    pub fn render_arguments(&self, arguments: &[Value]) -> String {
        let rendered: Vec<String> = arguments.iter().map(|value| self.render(value)).collect();
        format!("({})", rendered.join(ARGUMENT_SEPARATOR))
    }
}
