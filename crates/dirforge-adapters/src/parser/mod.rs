//! Tree description parsers.

mod indent;
mod yaml;

use dirforge_core::application::ports::TreeParser;

pub use indent::IndentParser;
pub use yaml::YamlParser;

/// Every parser this crate ships, ready to hand to `TreeService`.
pub fn default_parsers() -> Vec<Box<dyn TreeParser>> {
    vec![Box::new(IndentParser::new()), Box::new(YamlParser::new())]
}
