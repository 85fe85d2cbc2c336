use crate::error::{AppResult, RecommendationError};
use crate::models::{FashionItem, Gender, PriceRange};
use std::collections::BTreeSet;

/// A single catalog constraint
///
/// The set is closed; stores translate each variant into bound parameters
/// and never splice values into query text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `male`/`female` also accept unisex rows, `unisex` accepts only unisex rows
    GenderMatch(Gender),
    /// Item carries at least one of the tags
    TagIntersect(BTreeSet<String>),
    /// Item price range is one of the ranges
    PriceRangeMatch(BTreeSet<PriceRange>),
    /// Exact category match
    CategoryMatch(String),
}

impl Predicate {
    #[inline]
    pub fn matches(&self, item: &FashionItem) -> bool {
        match self {
            Predicate::GenderMatch(gender) => gender_matches(*gender, &item.gender),
            Predicate::TagIntersect(tags) => item.has_any_tag(tags),
            Predicate::PriceRangeMatch(ranges) => ranges.contains(&item.price_range),
            Predicate::CategoryMatch(category) => item.category == *category,
        }
    }
}

#[inline]
fn gender_matches(query: Gender, item_gender: &str) -> bool {
    match query {
        Gender::Male | Gender::Female => {
            item_gender == query.as_str() || item_gender == Gender::Unisex.as_str()
        }
        Gender::Unisex => item_gender == Gender::Unisex.as_str(),
    }
}

/// Conjunction of predicates applied to the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.predicates.push(Predicate::GenderMatch(gender));
        self
    }

    /// Add a tag constraint; an empty set adds nothing
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        if !tags.is_empty() {
            self.predicates.push(Predicate::TagIntersect(tags));
        }
        self
    }

    /// Add a price constraint; an empty set adds nothing
    pub fn price_ranges<I>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = PriceRange>,
    {
        let ranges: BTreeSet<PriceRange> = ranges.into_iter().collect();
        if !ranges.is_empty() {
            self.predicates.push(Predicate::PriceRangeMatch(ranges));
        }
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.predicates.push(Predicate::CategoryMatch(category.into()));
        self
    }

    #[inline]
    pub fn matches(&self, item: &FashionItem) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }
}

/// Build the recommendation filter for a gender and a profile tag set
///
/// Fails before any query is built when the gender is not recognised.
pub fn build_filter(gender: &str, tags: &BTreeSet<String>) -> AppResult<FilterSpec> {
    Ok(filter_for(parse_gender(gender)?, tags))
}

/// Recommendation filter for an already validated gender
pub fn filter_for(gender: Gender, tags: &BTreeSet<String>) -> FilterSpec {
    FilterSpec::new().gender(gender).tags(tags.iter().cloned())
}

pub fn parse_gender(gender: &str) -> AppResult<Gender> {
    gender
        .parse::<Gender>()
        .map_err(RecommendationError::InvalidArgument)
}

pub fn parse_price_ranges(values: &[String]) -> AppResult<Vec<PriceRange>> {
    values
        .iter()
        .map(|v| v.parse::<PriceRange>().map_err(RecommendationError::InvalidArgument))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn create_test_item(id: i64, gender: &str, tags: &[&str]) -> FashionItem {
        FashionItem {
            id,
            name: format!("Item {}", id),
            category: "tops".to_string(),
            subcategory: None,
            gender: gender.to_string(),
            base_color: "cream".to_string(),
            image_url: format!("/images/{}.jpg", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price_range: PriceRange::Mid,
            style_score: 7.5,
            created_at: Utc::now(),
        }
    }

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_female_filter_excludes_male() {
        let filter = build_filter("female", &BTreeSet::new()).unwrap();

        assert!(filter.matches(&create_test_item(1, "female", &[])));
        assert!(filter.matches(&create_test_item(2, "unisex", &[])));
        assert!(!filter.matches(&create_test_item(3, "male", &[])));
    }

    #[test]
    fn test_unisex_filter_is_exact() {
        let filter = build_filter("unisex", &BTreeSet::new()).unwrap();

        assert!(filter.matches(&create_test_item(1, "unisex", &[])));
        assert!(!filter.matches(&create_test_item(2, "male", &[])));
        assert!(!filter.matches(&create_test_item(3, "female", &[])));
    }

    #[test]
    fn test_invalid_gender_rejected() {
        let result = build_filter("other", &BTreeSet::new());
        assert!(matches!(result, Err(RecommendationError::InvalidArgument(_))));

        let result = build_filter("female' OR 1=1 --", &BTreeSet::new());
        assert!(matches!(result, Err(RecommendationError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_tags_is_gender_only() {
        let filter = build_filter("male", &BTreeSet::new()).unwrap();
        assert_eq!(filter.predicates(), &[Predicate::GenderMatch(Gender::Male)]);
    }

    #[test]
    fn test_tag_intersection() {
        let filter = build_filter("female", &tag_set(&["relaxed", "natural"])).unwrap();

        assert!(filter.matches(&create_test_item(1, "female", &["natural", "linen"])));
        assert!(!filter.matches(&create_test_item(2, "female", &["edgy"])));
        assert!(!filter.matches(&create_test_item(3, "female", &[])));
        // Case-sensitive
        assert!(!filter.matches(&create_test_item(4, "female", &["Relaxed"])));
    }

    #[test]
    fn test_identical_inputs_identical_filter() {
        let a = build_filter("female", &tag_set(&["b", "a"])).unwrap();
        let b = build_filter("female", &tag_set(&["a", "b"])).unwrap();
        assert_eq!(a, b);

        let hash = |f: &FilterSpec| {
            let mut hasher = DefaultHasher::new();
            f.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_price_and_category_predicates() {
        let filter = FilterSpec::new()
            .gender(Gender::Female)
            .price_ranges([PriceRange::Low, PriceRange::Mid])
            .category("tops");

        assert!(filter.matches(&create_test_item(1, "female", &[])));

        let mut premium = create_test_item(2, "female", &[]);
        premium.price_range = PriceRange::Premium;
        assert!(!filter.matches(&premium));

        let mut shoes = create_test_item(3, "female", &[]);
        shoes.category = "shoes".to_string();
        assert!(!filter.matches(&shoes));
    }

    #[test]
    fn test_parse_price_ranges() {
        let ranges = parse_price_ranges(&["low".to_string(), "Premium".to_string()]).unwrap();
        assert_eq!(ranges, vec![PriceRange::Low, PriceRange::Premium]);
        assert!(parse_price_ranges(&["cheap".to_string()]).is_err());
    }
}
