use cardwall::{FeedPage, ItemId, Post};

#[test]
fn feed_page_decodes_integer_ids() {
    let body = r#"{
        "posts": [
            {"id": 1, "title": "His mother had always taught him", "tags": ["history", "crime"]},
            {"id": 2, "title": "He was an expert but not in a discipline", "body": "..."}
        ],
        "total": 251,
        "skip": 0,
        "limit": 2
    }"#;

    let page: FeedPage = serde_json::from_str(body).expect("page should decode");

    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.total, Some(251));
    assert_eq!(page.posts[0].id, ItemId::from("1"));
    assert_eq!(page.posts[0].tags, vec!["history", "crime"]);
    assert!(page.posts[0].body.is_none());
}

#[test]
fn feed_page_decodes_string_ids_and_image_aliases() {
    let body = r#"{
        "posts": [
            {"id": "post-abc", "title": "Alias check", "imageUrl": "https://example.com/a.jpg"}
        ]
    }"#;

    let page: FeedPage = serde_json::from_str(body).expect("page should decode");

    assert_eq!(page.posts[0].id, ItemId::from("post-abc"));
    assert_eq!(
        page.posts[0].image.as_deref(),
        Some("https://example.com/a.jpg")
    );
    assert_eq!(page.limit, None);
}

#[test]
fn post_round_trips_through_json() {
    let post = Post {
        id: ItemId::new("42"),
        title: "Round trip".to_string(),
        body: Some("Body text".to_string()),
        image: None,
        tags: vec!["news".to_string()],
        published: None,
    };

    let encoded = serde_json::to_string(&post).expect("post should encode");
    let decoded: Post = serde_json::from_str(&encoded).expect("post should decode");

    assert_eq!(decoded.id, post.id);
    assert_eq!(decoded.title, post.title);
    assert_eq!(decoded.tags, post.tags);
}
