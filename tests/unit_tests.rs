// Unit tests for Stylematch

use std::collections::BTreeSet;
use stylematch::core::{analyze_answers, build_filter, is_ranked, rank_items, Predicate};
use stylematch::models::{CatalogOrder, FashionItem, Gender, Page, PageRequest, PriceRange, QuizAnswer, QuizAnswers};
use stylematch::RecommendationError;
use chrono::Utc;

fn labelled(aesthetic: &str) -> QuizAnswer {
    QuizAnswer {
        text: "option".to_string(),
        aesthetic: Some(aesthetic.to_string()),
        tags: None,
    }
}

fn unlabelled(tags: &[&str]) -> QuizAnswer {
    QuizAnswer {
        text: "option".to_string(),
        aesthetic: None,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

fn keyed(entries: Vec<QuizAnswer>) -> QuizAnswers {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, answer)| (format!("q{}", i), answer))
        .collect()
}

fn create_item(id: i64, gender: &str, tags: &[&str], style_score: f64) -> FashionItem {
    FashionItem {
        id,
        name: format!("Item {}", id),
        category: "outerwear".to_string(),
        subcategory: Some("coats".to_string()),
        gender: gender.to_string(),
        base_color: "camel".to_string(),
        image_url: format!("/images/{}.jpg", id),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        price_range: PriceRange::Premium,
        style_score,
        created_at: Utc::now(),
    }
}

#[test]
fn test_no_aesthetic_defaults_to_classic() {
    for answers in [
        QuizAnswers::new(),
        keyed(vec![unlabelled(&[])]),
        keyed(vec![unlabelled(&["cozy"]), unlabelled(&["warm"]), unlabelled(&[])]),
    ] {
        let profile = analyze_answers(&answers);
        assert_eq!(profile.dominant, "Classic");
        assert_eq!(profile.score, 50);
    }
}

#[test]
fn test_old_money_three_to_one() {
    let profile = analyze_answers(&keyed(vec![
        labelled("Grunge"),
        labelled("Old Money"),
        labelled("Old Money"),
        labelled("Old Money"),
    ]));

    assert_eq!(profile.dominant, "Old Money");
    assert_eq!(profile.score, 75);
}

#[test]
fn test_analysis_is_deterministic() {
    let answers = keyed(vec![labelled("Y2K"), labelled("Boho"), unlabelled(&["b", "a"])]);

    let first = analyze_answers(&answers);
    let second = analyze_answers(&answers);

    assert_eq!(first, second);
    assert_eq!(first.dominant, "Boho");
}

#[test]
fn test_female_filter_never_matches_male() {
    let tags: BTreeSet<String> = ["classic".to_string()].into_iter().collect();
    for tags in [BTreeSet::new(), tags] {
        let filter = build_filter("female", &tags).unwrap();
        let male = create_item(1, "male", &["classic"], 9.0);
        assert!(!filter.matches(&male));
    }
}

#[test]
fn test_unisex_filter_matches_only_unisex() {
    let filter = build_filter("unisex", &BTreeSet::new()).unwrap();

    assert!(filter.matches(&create_item(1, "unisex", &[], 1.0)));
    assert!(!filter.matches(&create_item(2, "male", &[], 1.0)));
    assert!(!filter.matches(&create_item(3, "female", &[], 1.0)));
}

#[test]
fn test_unknown_gender_is_invalid_argument() {
    for gender in ["", "other", "non_binary", "women"] {
        assert!(matches!(
            build_filter(gender, &BTreeSet::new()),
            Err(RecommendationError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_tag_predicate_only_when_tags_present() {
    let filter = build_filter("male", &BTreeSet::new()).unwrap();
    assert_eq!(filter.predicates(), &[Predicate::GenderMatch(Gender::Male)]);

    let tags: BTreeSet<String> = ["edgy".to_string()].into_iter().collect();
    let filter = build_filter("male", &tags).unwrap();
    assert_eq!(filter.predicates().len(), 2);
}

#[test]
fn test_ranking_keeps_ties_together() {
    let mut items = vec![
        create_item(1, "female", &[], 5.0),
        create_item(2, "female", &[], 8.0),
        create_item(3, "female", &[], 5.0),
        create_item(4, "female", &[], 8.0),
        create_item(5, "female", &[], 2.0),
    ];

    rank_items(&mut items, CatalogOrder::Ranked, &mut rand::thread_rng());

    assert!(is_ranked(&items));
    let top: BTreeSet<i64> = items[..2].iter().map(|i| i.id).collect();
    assert_eq!(top, [2, 4].into_iter().collect());
    assert_eq!(items[4].id, 5);
}

#[test]
fn test_pagination_math() {
    let request = PageRequest::new(3, 12);
    assert_eq!(request.offset(), 24);

    let page: Page<i64> = Page::new(vec![25], 25, request);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_next);
    assert!(page.has_prev);

    let page: Page<i64> = Page::new(vec![], 0, PageRequest::new(1, 12));
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next);
    assert!(!page.has_prev);
}
