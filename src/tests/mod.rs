use crate::loader::{load_posts, LoadError, LoadOptions, PostSource};
use crate::output::{self, OutputFormat};
use crate::pagination::{self, PageEntry, Pager};

fn sheet(rows: usize) -> String {
    let mut out = String::from("serial,title,date,author,description,reading_time\n");
    for i in 1..=rows {
        let reading_time = if i % 2 == 0 { i.to_string() } else { String::new() };
        out.push_str(&format!(
            "{i},Post {i},2024-01-{:02},ann,about {i},{reading_time}\n",
            (i % 28) + 1
        ));
    }
    out
}

#[test]
fn scenario_three_pages_from_first() {
    let c = pagination::compute(25, 10, 1, 2);
    assert_eq!(c.total_pages, 3);
    assert_eq!(c.page_numbers(), vec![1, 2, 3]);
    assert!(!c.entries.contains(&PageEntry::Ellipsis));
    assert_eq!(
        c.entries[0],
        PageEntry::Page {
            number: 1,
            active: true
        }
    );
}

#[test]
fn scenario_ten_pages_from_middle() {
    let c = pagination::compute(100, 10, 5, 2);
    let rendered: Vec<String> = c
        .entries
        .iter()
        .map(|e| match e {
            PageEntry::Page { number, active: true } => format!("[{number}]"),
            PageEntry::Page { number, .. } => number.to_string(),
            PageEntry::Ellipsis => "...".to_string(),
        })
        .collect();
    assert_eq!(
        rendered.join(" "),
        "1 ... 3 4 [5] 6 7 ... 10"
    );
}

#[test]
fn scenario_single_page_has_no_controls() {
    let c = pagination::compute(3, 10, 1, 2);
    assert_eq!(c.total_pages, 1);
    assert!(c.is_empty());
    assert_eq!(output::render_controls_html(&c, output::page_file_name), "");
}

#[test]
fn scenario_out_of_range_navigation_is_rejected() {
    let posts = crate::posts::prepare_posts(crate::posts::parse_posts_str(&sheet(30)).unwrap().posts);
    let mut pager = Pager::new(posts, 10, 2);
    assert!(pager.go_to_page(2));
    let before = pager.current_slice().to_vec();
    assert!(!pager.go_to_page(0));
    assert!(!pager.go_to_page(pager.total_pages() + 1));
    assert_eq!(pager.current_page(), 2);
    assert_eq!(pager.current_slice(), before.as_slice());
}

#[tokio::test]
async fn inline_load_filters_and_orders_newest_first() {
    let text = "serial,title,date,author,description,reading_time\n\
                1,Old,2023-01-01,ann,first,\n\
                2,,2023-02-01,ann,draft,\n\
                3,New,2023-03-01,bob,second,5\n";
    let posts = load_posts(&PostSource::Inline(text.to_string()), &LoadOptions::default())
        .await
        .unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
    assert_eq!(posts[0].reading_time(), Some("5"));
}

#[tokio::test]
async fn untitled_sheet_is_an_empty_result() {
    let text = "serial,title,date,author,description\n1,,x,y,z\n2,  ,x,y,z\n";
    let err = load_posts(&PostSource::Inline(text.to_string()), &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_empty_result());
    assert_eq!(err.user_message(), "No blog posts found.");

    let err = load_posts(&PostSource::Inline(String::new()), &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_empty_result());
}

#[tokio::test]
async fn missing_file_is_a_load_failure() {
    let path = std::env::temp_dir().join("blogpager-no-such-posts.csv");
    let source = PostSource::FilePath(path.to_string_lossy().to_string());
    let err = load_posts(&source, &LoadOptions::default()).await.unwrap_err();
    assert!(matches!(err, LoadError::FileRead { .. }));
    assert!(!err.is_empty_result());
    assert_eq!(err.user_message(), "Error loading blog posts.");
}

#[tokio::test]
async fn undecodable_header_is_a_parse_failure() {
    let path = std::env::temp_dir().join(format!("blogpager-bad-header-{}.csv", std::process::id()));
    tokio::fs::write(&path, b"serial,ti\xfftle\n1,First\n").await.unwrap();
    let source = PostSource::FilePath(path.to_string_lossy().to_string());
    let err = load_posts(&source, &LoadOptions::default()).await.unwrap_err();
    let _ = tokio::fs::remove_file(&path).await;

    assert!(matches!(err, LoadError::Parse { .. }));
    assert_eq!(err.user_message(), "Error loading blog posts.");
}

#[tokio::test]
async fn undecodable_rows_are_dropped_from_a_file_load() {
    let path = std::env::temp_dir().join(format!("blogpager-bad-row-{}.csv", std::process::id()));
    tokio::fs::write(&path, b"serial,title\n1,Old\n2,\xffbroken\n3,New\n").await.unwrap();
    let source = PostSource::FilePath(path.to_string_lossy().to_string());
    let posts = load_posts(&source, &LoadOptions::default()).await.unwrap();
    let _ = tokio::fs::remove_file(&path).await;

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
}

#[tokio::test]
async fn file_load_then_paginate_covers_every_post_once() {
    let path = std::env::temp_dir().join(format!("blogpager-posts-{}.csv", std::process::id()));
    tokio::fs::write(&path, sheet(23)).await.unwrap();
    let source = PostSource::from_location(&path.to_string_lossy());
    let posts = load_posts(&source, &LoadOptions::default()).await.unwrap();
    let _ = tokio::fs::remove_file(&path).await;

    assert_eq!(posts.len(), 23);
    assert_eq!(posts[0].serial, "23");

    let mut pager = Pager::new(posts.clone(), 3, 2);
    assert_eq!(pager.total_pages(), 8);
    let mut seen = Vec::new();
    for page in 1..=pager.total_pages() {
        assert!(pager.go_to_page(page));
        seen.extend_from_slice(pager.current_slice());
    }
    assert_eq!(seen, posts);
}

#[test]
fn every_format_renders_the_current_page() {
    let posts = crate::posts::prepare_posts(crate::posts::parse_posts_str(&sheet(10)).unwrap().posts);
    let mut pager = Pager::new(posts, 3, 2);
    pager.go_to_page(2);
    let view = pager.view();

    let text = String::from_utf8(output::render(&view, OutputFormat::Text, "Blog")).unwrap();
    assert!(text.contains("#7. Post 7"));
    assert!(!text.contains("#10. Post 10"));

    let json: serde_json::Value =
        serde_json::from_slice(&output::render(&view, OutputFormat::Json, "Blog")).unwrap();
    assert_eq!(json["page"], 2);
    assert_eq!(json["total_pages"], 4);
    assert_eq!(json["posts"].as_array().unwrap().len(), 3);
    assert_eq!(json["controls"]["prev_disabled"], false);

    let html = String::from_utf8(output::render(&view, OutputFormat::Html, "Blog")).unwrap();
    assert!(html.contains("#6. Post 6"));
    assert!(html.contains(" - 6 min read"));
    assert!(!html.contains("#8. Post 8"));
    assert!(html.contains(r#"href="page-1.html""#));
}
