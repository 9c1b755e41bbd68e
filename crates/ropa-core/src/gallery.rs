//! Gallery layout: the tag store as pages of fixed-width rows.
//!
//! Each cell pairs an item's caption with its uploaded photo, or with the
//! bundled placeholder when the photo was not uploaded this session (e.g.
//! after importing a wardrobe file).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::store::{ImageStore, TagStore};
use crate::types::{ItemId, TagRecord, UploadedImage};

/// Placeholder shown for items without an uploaded photo.
pub const PLACEHOLDER_SVG: &str = include_str!("../assets/placeholder.svg");

/// Where a cell's picture comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSource<'a> {
    Uploaded(&'a UploadedImage),
    Placeholder,
}

impl ImageSource<'_> {
    /// `src` attribute value for an `<img>` tag.
    pub fn data_url(&self) -> String {
        match self {
            ImageSource::Uploaded(image) => {
                format!("data:image/jpeg;base64,{}", BASE64.encode(&image.bytes))
            }
            ImageSource::Placeholder => {
                format!("data:image/svg+xml;base64,{}", BASE64.encode(PLACEHOLDER_SVG))
            }
        }
    }
}

/// One gallery tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryCell<'a> {
    pub id: &'a ItemId,
    pub record: &'a TagRecord,
    pub image: ImageSource<'a>,
}

impl GalleryCell<'_> {
    /// `"{id}: {categoria} | {tipo} | {color} | {temperatura} | {clima}"`
    pub fn caption(&self) -> String {
        format!("{}: {}", self.id, self.record.values().join(" | "))
    }
}

/// Fixed-column grid layout.
#[derive(Debug, Clone, Copy)]
pub struct Gallery {
    columns: usize,
    rows_per_page: usize,
}

impl Gallery {
    /// Zero values are clamped to 1.
    pub fn new(columns: usize, rows_per_page: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// All cells in insertion order.
    pub fn cells<'a>(&self, tags: &'a TagStore, images: &'a ImageStore) -> Vec<GalleryCell<'a>> {
        tags.iter()
            .map(|(id, record)| GalleryCell {
                id,
                record,
                image: images
                    .get(id)
                    .map_or(ImageSource::Placeholder, ImageSource::Uploaded),
            })
            .collect()
    }

    /// All cells grouped into rows of `columns`; the last row may be short.
    pub fn rows<'a>(
        &self,
        tags: &'a TagStore,
        images: &'a ImageStore,
    ) -> Vec<Vec<GalleryCell<'a>>> {
        self.cells(tags, images)
            .chunks(self.columns)
            .map(<[_]>::to_vec)
            .collect()
    }

    /// Number of pages needed for `items` items (0 for an empty store).
    pub fn page_count(&self, items: usize) -> usize {
        items.div_ceil(self.columns * self.rows_per_page)
    }

    /// Rows of page `page` (0-based). Out-of-range pages are empty.
    pub fn page<'a>(
        &self,
        tags: &'a TagStore,
        images: &'a ImageStore,
        page: usize,
    ) -> Vec<Vec<GalleryCell<'a>>> {
        self.rows(tags, images)
            .into_iter()
            .skip(page * self.rows_per_page)
            .take(self.rows_per_page)
            .collect()
    }

    /// Render the whole gallery as a standalone HTML document.
    pub fn render_html(&self, tags: &TagStore, images: &ImageStore) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Tu Ropa</title>\n<style>\n\
             body { font-family: sans-serif; margin: 2rem; }\n\
             .row { display: flex; gap: 1rem; margin-bottom: 1rem; }\n\
             figure { flex: 1; margin: 0; }\n\
             img { width: 100%; aspect-ratio: 1; object-fit: cover; border-radius: 4px; }\n\
             figcaption { font-size: 0.9rem; margin-top: 0.25rem; }\n\
             </style>\n</head>\n<body>\n<h1>Tu Ropa</h1>\n",
        );

        for row in self.rows(tags, images) {
            html.push_str("<div class=\"row\">\n");
            for cell in &row {
                html.push_str(&format!(
                    "<figure><img src=\"{}\" alt=\"{}\"><figcaption><strong>{}</strong>: {}</figcaption></figure>\n",
                    cell.image.data_url(),
                    escape_html(cell.id.as_str()),
                    escape_html(cell.id.as_str()),
                    escape_html(&cell.record.values().join(" | ")),
                ));
            }
            // Keep tiles the same width on a short last row
            for _ in row.len()..self.columns {
                html.push_str("<figure></figure>\n");
            }
            html.push_str("</div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
