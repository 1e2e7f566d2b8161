//! UI locale and message catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for user-visible text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    En,
    #[serde(rename = "zh-CN", alias = "zh", alias = "zh-Hans")]
    ZhCn,
}

/// User-visible strings for one locale
#[derive(Debug)]
pub struct Messages {
    /// Submit button label while a form is being sent
    pub processing: &'static str,
    /// Prefix shown before the character count
    pub char_count: &'static str,
    pub copied: &'static str,
    pub copy_failed: &'static str,
    pub refresh_failed: &'static str,
    pub network_error: &'static str,
}

const EN: Messages = Messages {
    processing: "Processing...",
    char_count: "Characters: ",
    copied: "Copied to clipboard",
    copy_failed: "Copy failed",
    refresh_failed: "Refresh failed, please try again later",
    network_error: "Network error, please try again later",
};

const ZH_CN: Messages = Messages {
    processing: "处理中...",
    char_count: "字数: ",
    copied: "已复制到剪贴板",
    copy_failed: "复制失败",
    refresh_failed: "刷新失败，请稍后重试",
    network_error: "网络错误，请稍后重试",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::ZhCn => &ZH_CN,
        }
    }

    /// BCP 47 tag
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Locale::ZhCn),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}
