//! Theme palette and CSS custom properties.
//!
//! The blog ships a dark color mode (the initial one) and a light mode. Both are
//! configurable under `[colors.dark]` / `[colors.light]`; fonts, container
//! widths and the shared transition live under `[theme]`.
//!
//! Everything ends up as CSS custom properties in front of the static
//! stylesheet:
//!
//! ```css
//! :root { --color-bg: #22264A; ... }
//! @media (prefers-color-scheme: light) { :root { --color-bg: #EFEFF5; ... } }
//! :root { --font-sans: ...; --container-base: 784px; ... }
//! ```

use serde::{Deserialize, Serialize};

/// Color configuration for both modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Initial mode.
    pub dark: ColorScheme,
    /// Used when the reader's system prefers a light scheme.
    pub light: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dark: ColorScheme::default_dark(),
            light: ColorScheme::default_light(),
        }
    }
}

/// One color mode.
///
/// Every key is required. Sparse user overrides get the remaining keys from
/// the stock scheme of the same mode when `config.toml` is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Body text.
    pub text: String,
    /// Headings, code and emphasized text.
    pub heading: String,
    /// Captions and secondary text.
    pub muted: String,
    /// Borders (alternate-language box, separators).
    pub border: String,
    /// Raised surfaces (alternate-language box).
    pub surface: String,
    /// Links inside articles.
    pub link: String,
    /// Hover color and blockquote marks.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_dark() -> Self {
        Self {
            background: "#22264A".to_string(),
            text: "#ADB2DC".to_string(),
            heading: "#ffffff".to_string(),
            muted: "#6870AF".to_string(),
            border: "#343C7A".to_string(),
            surface: "#282E5E".to_string(),
            link: "#d23669".to_string(),
            accent: "#FFCC68".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#EFEFF5".to_string(),
            text: "#535988".to_string(),
            heading: "#100F4D".to_string(),
            muted: "#4b547d".to_string(),
            border: "#D8D8E5".to_string(),
            surface: "#F5F5F5".to_string(),
            link: "#d23669".to_string(),
            accent: "#b54909".to_string(),
        }
    }

    fn css_properties(&self, indent: &str) -> String {
        [
            ("--color-bg", &self.background),
            ("--color-text", &self.text),
            ("--color-heading", &self.heading),
            ("--color-muted", &self.muted),
            ("--color-border", &self.border),
            ("--color-surface", &self.surface),
            ("--color-link", &self.link),
            ("--color-accent", &self.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Typography and layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub font_sans: String,
    pub font_serif: String,
    pub font_mono: String,
    /// Width of the reading column.
    pub container_base: String,
    /// Width of wide layouts (header, footer).
    pub container_lg: String,
    /// Transition shared by links and hover effects.
    pub transition: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_sans: r#"Muli, "San Francisco", "SF Pro Text", -apple-system, system-ui, BlinkMacSystemFont, Roboto, "Helvetica Neue", "Segoe UI", Arial, sans-serif"#.to_string(),
            font_serif: "Georgia, serif".to_string(),
            font_mono: r#""Source Code Pro", "Fira Code", "Fira Mono", "Roboto Mono", "Lucida Console", Monaco, monospace"#.to_string(),
            container_base: "784px".to_string(),
            container_lg: "1200px".to_string(),
            transition: ".2s ease-in-out all".to_string(),
        }
    }
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{dark}\n}}\n\n@media (prefers-color-scheme: light) {{\n    :root {{\n{light}\n    }}\n}}",
        dark = colors.dark.css_properties("    "),
        light = colors.light.css_properties("        "),
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --font-sans: {font_sans};
    --font-serif: {font_serif};
    --font-mono: {font_mono};
    --container-base: {container_base};
    --container-lg: {container_lg};
    --transition-base: {transition};
}}"#,
        font_sans = theme.font_sans,
        font_serif = theme.font_serif,
        font_mono = theme.font_mono,
        container_base = theme.container_base,
        container_lg = theme.container_lg,
        transition = theme.transition,
    )
}
