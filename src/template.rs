//! Page templates.
//!
//! [`render_post`] lays out a post page:
//!
//! ```text
//! h1                      title
//! section.metadata        <time> formatted date · reading-time label
//! figure.top-img          banner + markdown credit as <figcaption>
//! div.alternate           "also available in:" + link to the translation
//! div.description         markdown
//! div.post-body           markdown
//! div.discuss-edit        discuss / edit links
//! div#disqus_thread       comment embed, when a shortname is configured
//! ```
//!
//! [`render_index`] lists a locale's posts on its home page.
//!
//! Labels come from the post's own locale, so a `zh` post shows
//! `2020年1月15日` and `去 GitHub 编辑`.

use crate::alternate::{AlternateLink, AlternateReference};
use crate::config::SiteConfig;
use crate::date::{DateError, format_post_date};
use crate::layout;
use crate::locale::{LocaleStrings, LocaleTable};
use crate::post::Post;
use crate::reading_time::{ReadingTimeError, ReadingTimeFormatter};
use crate::seo::{self, SeoMeta, ShareInfo};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Reading time of {path}: {source}")]
    ReadingTime {
        path: String,
        #[source]
        source: ReadingTimeError,
    },
    #[error("Date of {path}: {source}")]
    Date {
        path: String,
        #[source]
        source: DateError,
    },
}

/// Everything a template needs besides the page's own data.
///
/// Shared read-only by all rendering workers.
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub locales: &'a LocaleTable,
    pub reading_time: ReadingTimeFormatter,
    /// Full stylesheet inlined into every page.
    pub css: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, locales: &'a LocaleTable, css: &'a str) -> Self {
        Self {
            config,
            locales,
            reading_time: config.reading_time.formatter(),
            css,
        }
    }

    fn strings(&self, locale: &str) -> &LocaleStrings {
        self.locales.resolve(Some(locale)).1
    }
}

// ============================================================================
// Markdown
// ============================================================================

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH
}

/// Renders markdown to HTML. Fenced code keeps its `language-*` class.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Renders a one-paragraph snippet without the surrounding `<p>`.
fn markdown_inline(markdown: &str) -> String {
    let html = markdown_to_html(markdown);
    let trimmed = html.trim();
    trimmed
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .unwrap_or(trimmed)
        .to_string()
}

// ============================================================================
// Components
// ============================================================================

/// Date and reading-time line shown under post titles.
fn post_metadata(post: &Post, ctx: &RenderContext) -> Result<Markup, RenderError> {
    let date = format_post_date(&post.date, Some(&post.locale), ctx.locales).map_err(|source| {
        RenderError::Date {
            path: post.source_path.clone(),
            source,
        }
    })?;
    let reading = ctx
        .reading_time
        .format(post.reading_minutes)
        .map_err(|source| RenderError::ReadingTime {
            path: post.source_path.clone(),
            source,
        })?;
    Ok(html! {
        section.metadata {
            time datetime=(post.date) { (date) }
            span.reading-time { (reading) }
        }
    })
}

fn banner_figure(post: &Post) -> Markup {
    html! {
        @if let Some(banner) = &post.banner {
            figure.top-img {
                img src=(banner) alt=(post.title);
                @if let Some(credit) = &post.banner_credit {
                    figcaption { (PreEscaped(markdown_inline(credit))) }
                }
            }
        }
    }
}

fn alternate_box(link: &AlternateLink) -> Markup {
    html! {
        div.alternate {
            (link.prompt) " "
            a href=(link.href) { (link.label) }
        }
    }
}

/// Twitter search for mentions of the post. The URL is a query value, so it
/// is encoded as a component.
fn discuss_url(share_url: &str) -> String {
    format!(
        "https://twitter.com/search?q={}",
        urlencoding::encode(share_url)
    )
}

fn discuss_edit(post: &Post, share: &ShareInfo, strings: &LocaleStrings) -> Markup {
    let discuss = discuss_url(&share.url);
    html! {
        div.discuss-edit {
            a href=(discuss) { (strings.discuss_label) }
            @if let Some(edit) = &post.edit_link {
                span { "•" }
                a href=(edit) { (strings.edit_label) }
            }
        }
    }
}

/// Disqus embed. All page values are JSON-encoded into the script.
fn comments_embed(shortname: &str, post: &Post, share: &ShareInfo) -> Markup {
    let page = json!({
        "url": share.url,
        "identifier": post.slug,
        "title": post.title,
    });
    let src = json!(format!("https://{shortname}.disqus.com/embed.js"));
    let script = format!(
        "var disqus_page = {page};\n\
         var disqus_config = function () {{\n  \
           this.page.url = disqus_page.url;\n  \
           this.page.identifier = disqus_page.identifier;\n  \
           this.page.title = disqus_page.title;\n\
         }};\n\
         (function () {{\n  \
           var s = document.createElement('script');\n  \
           s.src = {src};\n  \
           s.setAttribute('data-timestamp', +new Date());\n  \
           (document.head || document.body).appendChild(s);\n\
         }})();",
        page = seo::json_for_script(&page),
        src = seo::json_for_script(&src),
    );
    html! {
        div id="disqus_thread" {}
        script { (PreEscaped(script)) }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Renders a complete post page.
pub fn render_post(
    post: &Post,
    alternate: Option<&AlternateReference>,
    ctx: &RenderContext,
) -> Result<Markup, RenderError> {
    let strings = ctx.strings(&post.locale);
    let share = ShareInfo::for_post(post, ctx.config);
    let alternate_link = alternate.map(|r| AlternateLink::new(&post.locale, r, ctx.locales));
    let meta = SeoMeta::for_post(post, alternate, ctx.config, ctx.locales);
    let metadata = post_metadata(post, ctx)?;

    let content = html! {
        article.post {
            h1 { (post.title) }
            (metadata)
            (banner_figure(post))
            @if let Some(link) = &alternate_link {
                (alternate_box(link))
            }
            @if let Some(description) = &post.description {
                div.description { (PreEscaped(markdown_to_html(description))) }
            }
            div.post-body { (PreEscaped(markdown_to_html(&post.body))) }
        }
        (discuss_edit(post, &share, strings))
        @if let Some(shortname) = &ctx.config.comments.disqus_shortname {
            (comments_embed(shortname, post, &share))
        }
    };

    Ok(layout::base_document(
        &post.locale,
        seo::render_seo(&meta, ctx.config),
        ctx.css,
        Some("post-page"),
        layout::page_frame(&post.locale, ctx.config, content),
    ))
}

/// Renders the home page of `locale`, listing `posts` in the given order.
pub fn render_index(
    locale: &str,
    path: &str,
    posts: &[&Post],
    ctx: &RenderContext,
) -> Result<Markup, RenderError> {
    let strings = ctx.strings(locale);
    let meta = SeoMeta::for_home(locale, path, ctx.config, ctx.locales);

    let mut entries = Vec::with_capacity(posts.len());
    for post in posts {
        entries.push((post, post_metadata(post, ctx)?));
    }

    let content = html! {
        p.site-description { (strings.description) }
        ul.post-list {
            @for (post, metadata) in &entries {
                li {
                    h2 { a href=(post.link) { (post.title) } }
                    (metadata)
                    @if let Some(description) = &post.description {
                        div.description { (PreEscaped(markdown_to_html(description))) }
                    }
                }
            }
        }
    };

    Ok(layout::base_document(
        locale,
        seo::render_seo(&meta, ctx.config),
        ctx.css,
        Some("index-page"),
        layout::page_frame(locale, ctx.config, content),
    ))
}

// ============================================================================
// Tests
// ============================================================================
