//! Page chrome shared by every generated page.
//!
//! ```text
//! <html lang="zh">
//!   <head> charset, viewport, SEO tags, inline CSS </head>
//!   <body>
//!     <header class="site-header">   site title → locale home
//!     <main>                         page content
//!     <footer class="site-footer">
//! ```

use crate::config::SiteConfig;
use crate::naming;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Renders the base HTML document structure
pub fn base_document(
    lang: &str,
    head: Markup,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head)
                // raw text element, must not be escaped
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header; the title links to the home page of `locale`.
pub fn site_header(locale: &str, config: &SiteConfig) -> Markup {
    let home = naming::locale_home(locale, &config.default_locale);
    html! {
        header.site-header {
            div.container {
                a.site-title href=(home) { (config.title) }
            }
        }
    }
}

pub fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                span { (config.title) }
                @if let Some(author) = &config.author {
                    span.separator { "•" }
                    span.author { (author) }
                }
            }
        }
    }
}

/// Wraps `content` in header, main and footer.
pub fn page_frame(locale: &str, config: &SiteConfig, content: Markup) -> Markup {
    html! {
        (site_header(locale, config))
        main.container {
            (content)
        }
        (site_footer(config))
    }
}
