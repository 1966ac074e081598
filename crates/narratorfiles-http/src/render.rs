//! Server-rendered HTML views.
//!
//! Three bundled handlebars templates: a `layout` partial shared by the
//! `listing` and `play` pages. They are compiled into the binary and
//! registered once when [`Templates::new`] runs at startup.

use handlebars::Handlebars;
use narratorfiles_core::{ListingEntry, ObjectType, PlaybackView};
use serde::Serialize;

use crate::error::RenderError;
use crate::router::{download_href, listing_href, play_href};

const LAYOUT: &str = "layout";
const LISTING: &str = "listing";
const PLAY: &str = "play";

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.hbs");
const LISTING_TEMPLATE: &str = include_str!("../templates/listing.hbs");
const PLAY_TEMPLATE: &str = include_str!("../templates/play.hbs");

/// Registered page templates.
#[derive(Debug)]
pub struct Templates {
    registry: Handlebars<'static>,
}

#[derive(Debug, Serialize)]
struct ListingPage<'a> {
    title: String,
    parent_href: Option<String>,
    entries: Vec<EntryRow<'a>>,
}

#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    kind: &'static str,
    icon: &'static str,
    label: &'a str,
    href: String,
    download_href: Option<String>,
}

#[derive(Debug, Serialize)]
struct PlayPage<'a> {
    title: String,
    key: &'a str,
    url: &'a str,
    mime_type: &'a str,
    back_href: String,
    download_href: String,
}

impl Templates {
    /// Parse and register the bundled templates.
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();

        registry
            .register_partial(LAYOUT, LAYOUT_TEMPLATE)
            .map_err(|e| register_error(LAYOUT, e))?;
        registry
            .register_template_string(LISTING, LISTING_TEMPLATE)
            .map_err(|e| register_error(LISTING, e))?;
        registry
            .register_template_string(PLAY, PLAY_TEMPLATE)
            .map_err(|e| register_error(PLAY, e))?;

        Ok(Self { registry })
    }

    /// Render the listing page for `sub_path`.
    ///
    /// Each row links by the entry's relative key: directories to a deeper
    /// listing, audio to the player, everything else to a download redirect.
    pub fn render_listing(
        &self,
        sub_path: &str,
        entries: &[ListingEntry],
    ) -> Result<String, RenderError> {
        let sub_path = sub_path.trim_start_matches('/');
        let page = ListingPage {
            title: format!("/{sub_path}"),
            parent_href: (!sub_path.is_empty()).then(|| listing_href(parent_path(sub_path))),
            entries: entries.iter().map(entry_row).collect(),
        };
        self.render(LISTING, &page)
    }

    /// Render the audio player page.
    pub fn render_playback(&self, view: &PlaybackView) -> Result<String, RenderError> {
        let page = PlayPage {
            title: format!("/{}", view.key),
            key: &view.key,
            url: &view.url,
            mime_type: view.mime_type,
            back_href: listing_href(parent_path(&view.key)),
            download_href: download_href(&view.key),
        };
        self.render(PLAY, &page)
    }

    fn render<T: Serialize>(&self, name: &'static str, data: &T) -> Result<String, RenderError> {
        self.registry
            .render(name, data)
            .map_err(|e| RenderError::Render {
                name,
                source: Box::new(e),
            })
    }
}

fn register_error(name: &'static str, source: handlebars::TemplateError) -> RenderError {
    RenderError::Register {
        name,
        source: Box::new(source),
    }
}

fn entry_row(entry: &ListingEntry) -> EntryRow<'_> {
    let (icon, href, download) = match entry.object_type {
        ObjectType::Directory => ("📁", listing_href(&entry.relative_key), None),
        ObjectType::Audio => (
            "🎵",
            play_href(&entry.relative_key),
            Some(download_href(&entry.relative_key)),
        ),
        ObjectType::Other => ("📄", download_href(&entry.relative_key), None),
    };
    EntryRow {
        kind: entry.object_type.as_str(),
        icon,
        label: &entry.display_name,
        href,
        download_href: download,
    }
}

/// The enclosing directory of a path, with its trailing `/` (or `""`).
fn parent_path(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    trimmed.rfind('/').map_or("", |pos| &trimmed[..=pos])
}
