//! Page configuration
//!
//! Templates may embed
//!
//! ```html
//! <script type="application/json" id="blogkit-config">{"ui": {"locale": "zh-CN"}}</script>
//! ```
//!
//! to override any default. No block means defaults.

use blogkit::{Config, ConfigError};
use web_sys::Element;

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "blogkit-config";

pub fn load() -> Result<Config, ConfigError> {
    let Some(element) = dom::document().and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID)) else {
        return Ok(Config::default());
    };
    from_element(&element)
}

pub fn from_element(element: &Element) -> Result<Config, ConfigError> {
    let json = element.text_content().unwrap_or_default();
    Config::from_json(&json)
}
