//! Head metadata for search engines and social cards.
//!
//! Every page gets the same set of tags, built from a [`SeoMeta`]:
//!
//! - `<title>`, `description`, `image` and the canonical link
//! - OpenGraph (`og:*`), with `og:type=article` on posts
//! - Twitter card (`summary_large_image`)
//! - a schema.org JSON-LD block: `WebSite` always, `BreadcrumbList` and
//!   `BlogPosting` on posts
//!
//! Missing page values fall back to site-level defaults: the site title, the
//! locale's description and `default_image`.

use crate::alternate::AlternateReference;
use crate::config::SiteConfig;
use crate::locale::LocaleTable;
use crate::post::Post;
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

/// Resolved head values of one page. URLs are absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub author: Option<String>,
    pub date_published: Option<String>,
    pub is_blog_post: bool,
    /// Translated counterpart, announced with `hreflang`.
    pub alternate: Option<AlternateReference>,
}

/// Absolute URLs used when a post is shared or discussed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareInfo {
    pub url: String,
    pub image_url: String,
}

impl ShareInfo {
    pub fn for_post(post: &Post, config: &SiteConfig) -> Self {
        let image = post.banner.as_deref().unwrap_or(&config.default_image);
        Self {
            url: config.absolute_url(&post.link),
            image_url: config.absolute_url(image),
        }
    }
}

impl SeoMeta {
    /// Metadata of a locale's home page.
    pub fn for_home(locale: &str, path: &str, config: &SiteConfig, locales: &LocaleTable) -> Self {
        Self {
            title: config.title.clone(),
            description: site_description(locale, locales),
            image: config.absolute_url(&config.default_image),
            url: config.absolute_url(path),
            author: config.author.clone(),
            date_published: None,
            is_blog_post: false,
            alternate: None,
        }
    }

    /// Metadata of a post page.
    pub fn for_post(
        post: &Post,
        alternate: Option<&AlternateReference>,
        config: &SiteConfig,
        locales: &LocaleTable,
    ) -> Self {
        let description = post
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| site_description(&post.locale, locales));
        let share = ShareInfo::for_post(post, config);
        Self {
            title: post.title.clone(),
            description,
            image: share.image_url,
            url: share.url,
            author: post.author.clone().or_else(|| config.author.clone()),
            date_published: Some(post.date.clone()),
            is_blog_post: true,
            alternate: alternate.cloned(),
        }
    }
}

fn site_description(locale: &str, locales: &LocaleTable) -> String {
    locales.resolve(Some(locale)).1.description.clone()
}

/// Renders the head tags for `meta`.
pub fn render_seo(meta: &SeoMeta, config: &SiteConfig) -> Markup {
    html! {
        // General tags
        title { (meta.title) }
        meta name="description" content=(meta.description);
        meta name="image" content=(meta.image);
        link rel="canonical" href=(meta.url);
        @if let Some(alternate) = &meta.alternate {
            link rel="alternate" hreflang=(alternate.locale) href=(config.absolute_url(&alternate.link));
        }

        // OpenGraph tags
        meta property="og:url" content=(meta.url);
        @if meta.is_blog_post {
            meta property="og:type" content="article";
        }
        meta property="og:title" content=(meta.title);
        meta property="og:description" content=(meta.description);
        meta property="og:image" content=(meta.image);

        // Twitter Card tags
        meta name="twitter:card" content="summary_large_image";
        @if let Some(creator) = &config.twitter_creator {
            meta name="twitter:creator" content=(creator);
        }
        meta name="twitter:title" content=(meta.title);
        meta name="twitter:description" content=(meta.description);
        meta name="twitter:image" content=(meta.image);

        script type="application/ld+json" {
            (PreEscaped(json_for_script(&schema_org(meta, config))))
        }
    }
}

/// The schema.org graph of a page.
pub fn schema_org(meta: &SeoMeta, config: &SiteConfig) -> Value {
    let site_url = config.absolute_url("/");
    let website = json!({
        "@context": "http://schema.org",
        "@type": "WebSite",
        "url": site_url,
        "name": meta.title,
        "alternateName": config.title,
    });
    if !meta.is_blog_post {
        return json!([website]);
    }

    let breadcrumbs = json!({
        "@context": "http://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [{
            "@type": "ListItem",
            "position": 1,
            "item": {
                "@id": meta.url,
                "name": meta.title,
                "image": meta.image,
            },
        }],
    });

    let mut posting = json!({
        "@context": "http://schema.org",
        "@type": "BlogPosting",
        "url": meta.url,
        "name": meta.title,
        "alternateName": config.title,
        "headline": meta.title,
        "image": {
            "@type": "ImageObject",
            "url": meta.image,
        },
        "description": meta.description,
        "publisher": {
            "@type": "Organization",
            "url": site_url,
            "name": config.title,
        },
        "mainEntityOfPage": {
            "@type": "WebSite",
            "@id": site_url,
        },
    });
    if let Some(author) = &meta.author {
        posting["author"] = json!({ "@type": "Person", "name": author });
    }
    if let Some(date) = &meta.date_published {
        posting["datePublished"] = json!(date);
    }

    json!([website, breadcrumbs, posting])
}

/// Serialize for an inline `<script>`; `</` cannot close the element early.
pub(crate) fn json_for_script(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config() -> SiteConfig {
        SiteConfig {
            canonical_url: "https://blog.example.com".to_string(),
            twitter_creator: Some("@neoziro".to_string()),
            ..SiteConfig::default()
        }
    }

    fn post(input: &str, relative: &str) -> Post {
        let config = config();
        Post::parse(input, Path::new(relative), &config, &config.locale_table()).unwrap()
    }

    const WITH_BANNER: &str = "+++\ntitle = \"Typed styles\"\ndate = 2020-01-15\ndescription = \"Tokens\"\nbanner = \"banner.jpg\"\n+++\nbody\n";
    const BARE: &str = "+++\ntitle = \"Bare\"\ndate = \"2020-01-15\"\n+++\nbody\n";

    #[test]
    fn post_meta_uses_post_values() {
        let config = config();
        let post = post(WITH_BANNER, "typed-styles/index.md");
        let meta = SeoMeta::for_post(&post, None, &config, &config.locale_table());
        assert_eq!(meta.title, "Typed styles");
        assert_eq!(meta.description, "Tokens");
        assert_eq!(meta.url, "https://blog.example.com/typed-styles/");
        assert_eq!(meta.image, "https://blog.example.com/typed-styles/banner.jpg");
        assert_eq!(meta.date_published.as_deref(), Some("2020-01-15"));
        assert!(meta.is_blog_post);
    }

    #[test]
    fn share_info_is_absolute() {
        let config = config();
        let share = ShareInfo::for_post(&post(BARE, "bare.zh.md"), &config);
        assert_eq!(share.url, "https://blog.example.com/zh/bare/");
        assert_eq!(share.image_url, "https://blog.example.com/social.png");
    }

    #[test]
    fn post_meta_falls_back_to_site_defaults() {
        let config = config();
        let post = post(BARE, "bare.zh.md");
        let meta = SeoMeta::for_post(&post, None, &config, &config.locale_table());
        assert_eq!(meta.description, "报时树技术博客");
        assert_eq!(meta.image, "https://blog.example.com/social.png");
    }

    #[test]
    fn home_meta_uses_site_title() {
        let config = config();
        let meta = SeoMeta::for_home("en", "/", &config, &config.locale_table());
        assert_eq!(meta.title, "Timetree");
        assert_eq!(meta.description, "A technical blog");
        assert_eq!(meta.url, "https://blog.example.com/");
        assert!(!meta.is_blog_post);
    }

    #[test]
    fn render_includes_og_and_twitter_tags() {
        let config = config();
        let post = post(WITH_BANNER, "typed-styles/index.md");
        let meta = SeoMeta::for_post(&post, None, &config, &config.locale_table());
        let html = render_seo(&meta, &config).into_string();
        assert!(html.contains("<title>Typed styles</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://blog.example.com/typed-styles/">"#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<meta name="twitter:creator" content="@neoziro">"#));
        assert!(html.contains("application/ld+json"));
    }

    #[test]
    fn render_home_has_no_article_type() {
        let config = SiteConfig::default();
        let meta = SeoMeta::for_home("en", "/", &config, &config.locale_table());
        let html = render_seo(&meta, &config).into_string();
        assert!(!html.contains("og:type"));
        assert!(!html.contains("twitter:creator"));
    }

    #[test]
    fn render_announces_alternate() {
        let config = config();
        let post = post(BARE, "bare.md");
        let alternate = AlternateReference {
            locale: "zh".to_string(),
            link: "/zh/bare/".to_string(),
        };
        let meta = SeoMeta::for_post(&post, Some(&alternate), &config, &config.locale_table());
        let html = render_seo(&meta, &config).into_string();
        assert!(html.contains(
            r#"<link rel="alternate" hreflang="zh" href="https://blog.example.com/zh/bare/">"#
        ));
    }

    #[test]
    fn schema_org_for_post_has_three_entries() {
        let config = config();
        let post = post(WITH_BANNER, "typed-styles/index.md");
        let meta = SeoMeta::for_post(&post, None, &config, &config.locale_table());
        let graph = schema_org(&meta, &config);
        let entries = graph.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["@type"], "WebSite");
        assert_eq!(entries[1]["@type"], "BreadcrumbList");
        assert_eq!(entries[2]["@type"], "BlogPosting");
        assert_eq!(entries[2]["datePublished"], "2020-01-15");
        assert!(entries[2].get("author").is_none());
    }

    #[test]
    fn schema_org_includes_author() {
        let mut config = config();
        config.author = Some("Greg".to_string());
        let post = post(BARE, "bare.md");
        let meta = SeoMeta::for_post(&post, None, &config, &config.locale_table());
        let graph = schema_org(&meta, &config);
        assert_eq!(graph[2]["author"]["name"], "Greg");
    }

    #[test]
    fn json_ld_cannot_close_script() {
        let config = config();
        let mut meta = SeoMeta::for_home("en", "/", &config, &config.locale_table());
        meta.title = "</script><script>alert(1)</script>".to_string();
        let html = render_seo(&meta, &config).into_string();
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r"<\/script>"));
    }
}
