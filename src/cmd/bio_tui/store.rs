//! In-memory content store: links, blog posts and the analytics rollup

use crate::config::{BlogSeed, LinkSeed};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

pub type SharedStore = Rc<RefCell<Store>>;

/// How many entries the analytics view ranks
pub const TOP_N: usize = 5;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub views: u64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    pub label: String,
    pub count: u64,
    /// Share of the best performer, 0..=100
    pub percentage: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rollup {
    pub total_link_clicks: u64,
    pub total_blog_views: u64,
    pub top_links: Vec<Ranked>,
    pub top_blogs: Vec<Ranked>,
    pub link_count: usize,
    pub blog_count: usize,
}

impl Rollup {
    pub fn is_empty(&self) -> bool {
        self.total_link_clicks == 0 && self.total_blog_views == 0
    }
}

#[derive(Debug, Default)]
pub struct Store {
    links: Vec<Link>,
    blogs: Vec<Blog>,
    next_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    /// Seed from config, or with a small built-in sample when nothing is configured
    pub fn seeded(links: &[LinkSeed], blogs: &[BlogSeed]) -> Self {
        let mut store = Self::new();

        if links.is_empty() && blogs.is_empty() {
            store.push_link("github", "github.com/me", 128);
            store.push_link("mastodon", "https://hachyderm.io/@me", 42);
            store.push_link("newsletter", "buttondown.email/me", 7);
            store.push_blog("Hello, World", "First post on the new site.", 310, true, 30);
            store.push_blog("Writing a TUI in Rust", "ratatui and a poll loop.", 95, true, 9);
            store.push_blog("Notes on keyboard-first design", "", 0, false, 1);
            return store;
        }

        for seed in links {
            store.push_link(&seed.name, &seed.url, seed.clicks);
        }
        for seed in blogs {
            store.push_blog(&seed.title, &seed.content, seed.views, seed.published, 0);
        }
        store
    }

    fn push_link(&mut self, name: &str, url: &str, clicks: u64) {
        let id = self.next_id();
        self.links.push(Link {
            id,
            name: name.to_string(),
            url: normalize_url(url),
            clicks,
        });
    }

    fn push_blog(
        &mut self,
        title: &str,
        content: &str,
        views: u64,
        published: bool,
        age_days: i64,
    ) {
        let id = self.next_id();
        self.blogs.push(Blog {
            id,
            title: title.to_string(),
            slug: slugify(title),
            content: content.to_string(),
            views,
            published,
            created_at: Utc::now() - ChronoDuration::days(age_days),
        });
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // Links

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// New links go to the top of the list
    pub fn add_link(&mut self, name: &str, url: &str) -> u64 {
        let id = self.next_id();
        self.links.insert(
            0,
            Link {
                id,
                name: name.trim().to_string(),
                url: normalize_url(url),
                clicks: 0,
            },
        );
        id
    }

    pub fn update_link(&mut self, id: u64, name: &str, url: &str) -> bool {
        let Some(link) = self.links.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        link.name = name.trim().to_string();
        link.url = normalize_url(url);
        true
    }

    pub fn delete_link(&mut self, id: u64) -> Option<Link> {
        let index = self.links.iter().position(|l| l.id == id)?;
        Some(self.links.remove(index))
    }

    // Blogs

    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    pub fn add_blog(&mut self, title: &str, content: &str) -> u64 {
        let id = self.next_id();
        let title = title.trim();
        self.blogs.insert(
            0,
            Blog {
                id,
                title: title.to_string(),
                slug: slugify(title),
                content: content.to_string(),
                views: 0,
                published: false,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Replace title and body. The slug follows the new title.
    pub fn update_blog(&mut self, id: u64, title: &str, content: &str) -> bool {
        let Some(blog) = self.blogs.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        blog.title = title.trim().to_string();
        blog.slug = slugify(&blog.title);
        blog.content = content.to_string();
        true
    }

    /// Returns the previous published flag
    pub fn set_published(&mut self, id: u64, published: bool) -> Option<bool> {
        let blog = self.blogs.iter_mut().find(|b| b.id == id)?;
        Some(std::mem::replace(&mut blog.published, published))
    }

    pub fn delete_blog(&mut self, id: u64) -> Option<Blog> {
        let index = self.blogs.iter().position(|b| b.id == id)?;
        Some(self.blogs.remove(index))
    }

    // Analytics

    pub fn rollup(&self) -> Rollup {
        let link_counts: Vec<(String, u64)> = self
            .links
            .iter()
            .map(|l| (l.name.clone(), l.clicks))
            .collect();
        let blog_counts: Vec<(String, u64)> = self
            .blogs
            .iter()
            .map(|b| (b.title.clone(), b.views))
            .collect();

        Rollup {
            total_link_clicks: link_counts.iter().map(|(_, c)| c).sum(),
            total_blog_views: blog_counts.iter().map(|(_, c)| c).sum(),
            top_links: rank(link_counts),
            top_blogs: rank(blog_counts),
            link_count: self.links.len(),
            blog_count: self.blogs.len(),
        }
    }
}

/// Top entries by count, each as a percentage of the best one
fn rank(mut counts: Vec<(String, u64)>) -> Vec<Ranked> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let max = counts.first().map(|(_, c)| *c).unwrap_or(0).max(1);

    counts
        .into_iter()
        .take(TOP_N)
        .map(|(label, count)| Ranked {
            label,
            count,
            percentage: (count as f64 / max as f64 * 100.0).round() as u64,
        })
        .collect()
}

/// Prefix `https://` unless the url already names http or https
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Lowercase, collapse every run of non-alphanumerics to `-`, trim dashes
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// "3d ago" style age for list rows
pub fn age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed.num_days() > 0 {
        format!("{}d ago", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        "today".to_string()
    }
}
