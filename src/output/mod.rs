pub mod document;

use crate::pagination::{PageControls, PageEntry, PageView, Pager};
use crate::posts::Post;

const BUTTON_BASE_CLASS: &str = "px-3 py-1 text-sm rounded-full border border-gray-700 hover:bg-gray-800 transition-colors duration-200 cursor-pointer";
const BUTTON_DISABLED_CLASS: &str = "opacity-50 cursor-not-allowed";
const BUTTON_ACTIVE_CLASS: &str = "bg-gray-500 text-white";
const ELLIPSIS_HTML: &str = r#"<span class="px-2 text-gray-500">...</span>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// File name used for page `n` of a static listing.
pub fn page_file_name(page: usize) -> String {
    format!("page-{page}.html")
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_post_html(post: &Post) -> String {
    let reading_time = match post.reading_time() {
        Some(minutes) => format!(
            r#"<span class="text-gray-500"> - {} min read</span>"#,
            escape_html(minutes)
        ),
        None => String::new(),
    };
    format!(
        r##"      <a href="#" class="block rounded-lg transition-colors duration-300 ease-in-out hover:bg-gray-900/50 p-4 -ml-4">
        <article class="relative">
          <div class="flex items-center">
            <div class="w-5 h-px bg-gray-600 mr-4"></div>
            <h2 class="text-xl font-bold text-white">#{serial}. {title}</h2>
          </div>
          <p class="text-sm text-gray-400 mt-2 ml-9">posted on {date} by {author}</p>
          <p class="mt-4 ml-9">
            {description}
            {reading_time}
          </p>
        </article>
      </a>
"##,
        serial = escape_html(&post.serial),
        title = escape_html(&post.title),
        date = escape_html(&post.date),
        author = escape_html(&post.author),
        description = escape_html(&post.description),
    )
}

/// Markup for one page of posts, with a spacer between consecutive entries.
pub fn render_posts_html(posts: &[Post]) -> String {
    let mut out = String::new();
    for (idx, post) in posts.iter().enumerate() {
        out.push_str(&render_post_html(post));
        if idx + 1 < posts.len() {
            out.push_str("      <div class=\"h-8\"></div>\n");
        }
    }
    out
}

fn nav_button<F>(label: &str, target: Option<usize>, href: &F) -> String
where
    F: Fn(usize) -> String,
{
    match target {
        Some(page) => format!(
            r#"      <a href="{}" class="{BUTTON_BASE_CLASS}">{label}</a>"#,
            escape_html(&href(page))
        ),
        None => format!(
            r#"      <button type="button" disabled class="{BUTTON_BASE_CLASS} {BUTTON_DISABLED_CLASS}">{label}</button>"#
        ),
    }
}

/// Previous / numbered / Next controls. Nothing is rendered when the
/// listing fits on one page.
pub fn render_controls_html<F>(controls: &PageControls, href: F) -> String
where
    F: Fn(usize) -> String,
{
    if controls.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = Vec::with_capacity(controls.entries.len() + 2);
    parts.push(nav_button("Previous", controls.previous_target(), &href));
    for entry in &controls.entries {
        match entry {
            PageEntry::Page { number, active } => {
                let link = escape_html(&href(*number));
                if *active {
                    parts.push(format!(
                        r#"      <a href="{link}" aria-current="page" class="{BUTTON_BASE_CLASS} {BUTTON_ACTIVE_CLASS}">{number}</a>"#
                    ));
                } else {
                    parts.push(format!(
                        r#"      <a href="{link}" class="{BUTTON_BASE_CLASS}">{number}</a>"#
                    ));
                }
            }
            PageEntry::Ellipsis => parts.push(format!("      {ELLIPSIS_HTML}")),
        }
    }
    parts.push(nav_button("Next", controls.next_target(), &href));
    parts.join("\n")
}

fn render_controls_text(controls: &PageControls) -> String {
    if controls.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = Vec::new();
    parts.push(if controls.prev_disabled {
        "(Previous)".to_string()
    } else {
        "Previous".to_string()
    });
    for entry in &controls.entries {
        parts.push(match entry {
            PageEntry::Page { number, active: true } => format!("[{number}]"),
            PageEntry::Page { number, .. } => number.to_string(),
            PageEntry::Ellipsis => "...".to_string(),
        });
    }
    parts.push(if controls.next_disabled {
        "(Next)".to_string()
    } else {
        "Next".to_string()
    });
    parts.join(" ")
}

pub fn render_text(view: &PageView<'_>) -> Vec<u8> {
    let mut out = String::new();
    for post in view.posts {
        out.push_str(&format!("#{}. {}\n", post.serial, post.title));
        out.push_str(&format!("   posted on {} by {}\n", post.date, post.author));
        match post.reading_time() {
            Some(minutes) => {
                out.push_str(&format!("   {} - {} min read\n", post.description, minutes))
            }
            None => out.push_str(&format!("   {}\n", post.description)),
        }
        out.push('\n');
    }
    let controls = render_controls_text(&view.controls);
    if !controls.is_empty() {
        out.push_str(&controls);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(view: &PageView<'_>) -> Vec<u8> {
    serde_json::to_vec_pretty(view).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(view: &PageView<'_>, title: &str) -> Vec<u8> {
    document::render_page(view, title, page_file_name).into_bytes()
}

pub fn render(view: &PageView<'_>, format: OutputFormat, title: &str) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => render_html(view, title),
    }
}

/// Renders every page of the listing as `(file name, html)` pairs, followed
/// by `index.html` holding the first page. An empty listing still yields a
/// single (empty) first page. The pager is left on the page it started on.
pub fn render_site(pager: &mut Pager, title: &str) -> Vec<(String, Vec<u8>)> {
    let start = pager.current_page();
    let last = pager.total_pages().max(1);
    let mut files = Vec::with_capacity(last + 1);
    for page in 1..=last {
        pager.go_to_page(page);
        files.push((page_file_name(page), render_html(&pager.view(), title)));
    }
    pager.go_to_page(start);
    if let Some((_, first)) = files.first() {
        let index = first.clone();
        files.push(("index.html".to_string(), index));
    }
    files
}

#[cfg(test)]
mod output_tests {
    use super::*;
    use crate::pagination::{compute, Pager};

    fn post(serial: &str, title: &str, reading_time: Option<&str>) -> Post {
        Post {
            serial: serial.to_string(),
            title: title.to_string(),
            date: "2024-03-01".to_string(),
            author: "ann".to_string(),
            description: "desc".to_string(),
            reading_time: reading_time.map(str::to_string),
        }
    }

    #[test]
    fn format_parsing_and_inference() {
        assert_eq!(OutputFormat::parse(" HTML "), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("out/Listing.HTM"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("page.json"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("page"), None);
    }

    #[test]
    fn post_markup_escapes_fields() {
        let html = render_posts_html(&[post("1", "<b>bold</b> & co", None)]);
        assert!(html.contains("#1. &lt;b&gt;bold&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn reading_time_suffix_only_when_present() {
        let html = render_posts_html(&[post("1", "a", Some("4")), post("2", "b", Some("  "))]);
        assert_eq!(html.matches("min read").count(), 1);
        assert!(html.contains(" - 4 min read"));
    }

    #[test]
    fn spacer_only_between_posts() {
        let html = render_posts_html(&[post("1", "a", None), post("2", "b", None), post("3", "c", None)]);
        assert_eq!(html.matches("class=\"h-8\"").count(), 2);
        assert_eq!(render_posts_html(&[post("1", "a", None)]).matches("h-8").count(), 0);
    }

    #[test]
    fn controls_markup_marks_active_and_disabled() {
        let html = render_controls_html(&compute(100, 10, 1, 2), page_file_name);
        assert!(html.contains("disabled"));
        assert!(html.contains(r#"href="page-1.html" aria-current="page""#));
        assert!(html.contains(r#"href="page-2.html""#));
        assert!(html.contains(r#"href="page-10.html""#));
        assert_eq!(html.matches(ELLIPSIS_HTML).count(), 1);
        assert!(html.contains(">Next</a>"));
        assert!(html.contains(">Previous</button>"));
    }

    #[test]
    fn no_controls_for_single_page() {
        assert_eq!(render_controls_html(&compute(3, 10, 1, 2), page_file_name), "");
    }

    #[test]
    fn text_rendering_lists_posts_and_controls() {
        let mut pager = Pager::new(
            (1..=20).map(|i| post(&i.to_string(), "t", None)).collect(),
            2,
            2,
        );
        pager.go_to_page(5);
        let text = String::from_utf8(render_text(&pager.view())).unwrap();
        assert!(text.contains("#9. t"));
        assert!(text.contains("#10. t"));
        assert!(text.ends_with("Previous 1 ... 3 4 [5] 6 7 ... 10 Next\n"));
    }

    #[test]
    fn json_rendering_carries_controls() {
        let pager = Pager::new(vec![post("1", "a", Some("2"))], 3, 2);
        let json: serde_json::Value = serde_json::from_slice(&render_json(&pager.view())).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["posts"][0]["title"], "a");
        assert_eq!(json["controls"]["entries"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn html_document_wraps_list_and_controls() {
        let pager = Pager::new((1..=7).map(|i| post(&i.to_string(), "t", None)).collect(), 3, 2);
        let html = String::from_utf8(render_html(&pager.view(), "My <Blog>")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My &lt;Blog&gt;</title>"));
        assert!(html.contains("id=\"blog-list-container\""));
        assert!(html.contains("id=\"pagination-controls\""));
        assert!(html.contains("href=\"page-3.html\""));
    }

    #[test]
    fn site_has_one_file_per_page_plus_index() {
        let mut pager = Pager::new((1..=7).map(|i| post(&i.to_string(), "t", None)).collect(), 3, 2);
        pager.go_to_page(2);
        let files = render_site(&mut pager, "Blog");
        let names: Vec<_> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["page-1.html", "page-2.html", "page-3.html", "index.html"]);
        assert_eq!(files[0].1, files[3].1);
        assert_eq!(pager.current_page(), 2);
        let last = String::from_utf8(files[2].1.clone()).unwrap();
        assert!(last.contains("#7. t"));
        assert!(!last.contains("#6. t"));
        assert!(last.contains(r#"href="page-3.html" aria-current="page""#));
    }

    #[test]
    fn message_document_replaces_listing() {
        let html = document::render_message("Blog", "No blog posts found.");
        assert!(html.contains(r#"<p id="loading-message" class="text-gray-500">No blog posts found.</p>"#));
        assert!(!html.contains("<article"));
    }
}
