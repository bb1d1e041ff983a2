use std::io::Read;

use serde::Deserialize;
use serde::Serialize;

/// One row of the posts CSV.
///
/// Every column is kept as the raw text from the sheet. Columns that are
/// missing from the header decode as empty strings, and a blank
/// `reading_time` cell decodes as `None`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Post {
    pub serial: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub description: String,
    pub reading_time: Option<String>,
}

impl Post {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn reading_time(&self) -> Option<&str> {
        self.reading_time
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    pub posts: Vec<Post>,
    pub skipped_rows: usize,
}

/// Decodes every row of a header-keyed CSV.
///
/// Rows that fail to decode are counted and skipped rather than failing
/// the whole sheet; only a broken header row is an error.
pub fn parse_posts<R: Read>(reader: R) -> Result<ParseReport, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    rdr.headers()?;

    let mut report = ParseReport::default();
    for (idx, row) in rdr.deserialize::<Post>().enumerate() {
        match row {
            Ok(post) => report.posts.push(post),
            Err(e) => {
                log::warn!("skipping posts row {}: {e}", idx + 1);
                report.skipped_rows += 1;
            }
        }
    }
    Ok(report)
}

pub fn parse_posts_str(text: &str) -> Result<ParseReport, csv::Error> {
    parse_posts(text.as_bytes())
}

/// Drops untitled rows and puts the newest post first.
///
/// The sheet is appended to over time, so the last row is the newest.
pub fn prepare_posts(posts: Vec<Post>) -> Vec<Post> {
    let mut kept: Vec<Post> = posts.into_iter().filter(Post::has_title).collect();
    kept.reverse();
    kept
}
