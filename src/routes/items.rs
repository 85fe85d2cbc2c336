use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{parse_gender, parse_price_ranges, FilterSpec};
use crate::error::{AppResult, RecommendationError};
use crate::models::{split_csv, CatalogOrder, ListItemsQuery, PageRequest};
use crate::routes::{error_response, validation_response, AppState};

/// Configure catalog listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/items", web::get().to(list_items))
        .route("/items/{id}", web::get().to(get_item));
}

/// Paginated catalog listing
///
/// GET /api/v1/items?gender=female&tags=relaxed,natural&priceRange=low,mid&page=1&limit=12&sort=ranked
async fn list_items(
    state: web::Data<AppState>,
    query: web::Query<ListItemsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_response(errors);
    }

    let (filter, order) = match build_listing(&query) {
        Ok(listing) => listing,
        Err(e) => return error_response(&e),
    };

    let limit = state.recommender.resolve_limit(query.limit);
    let page = PageRequest::new(query.page, limit);

    match state.recommender.list_items(&filter, page, order).await {
        Ok(page) => {
            tracing::debug!(
                "Listed page {}/{} ({} of {} items)",
                page.page,
                page.total_pages,
                page.items.len(),
                page.total_items
            );
            HttpResponse::Ok().json(page)
        }
        Err(e) => error_response(&e),
    }
}

/// Single catalog item
///
/// GET /api/v1/items/{id}
async fn get_item(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.recommender.get_item(path.into_inner()).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => error_response(&e),
    }
}

fn build_listing(query: &ListItemsQuery) -> AppResult<(FilterSpec, CatalogOrder)> {
    let mut filter = FilterSpec::new();

    if let Some(gender) = query.gender.as_deref().filter(|g| !g.trim().is_empty()) {
        filter = filter.gender(parse_gender(gender)?);
    }

    filter = filter
        .tags(split_csv(query.tags.as_deref()))
        .price_ranges(parse_price_ranges(&split_csv(query.price_range.as_deref()))?);

    if let Some(category) = &query.category {
        filter = filter.category(category.clone());
    }

    let order = match query.sort.as_deref().map(str::trim) {
        None | Some("") | Some("ranked") => CatalogOrder::Ranked,
        Some("newest") => CatalogOrder::Newest,
        Some(other) => {
            return Err(RecommendationError::InvalidArgument(format!(
                "sort must be one of: ranked, newest (got {:?})",
                other
            )))
        }
    };

    Ok((filter, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Predicate;
    use crate::models::{Gender, PriceRange};

    fn query() -> ListItemsQuery {
        ListItemsQuery {
            gender: None,
            tags: None,
            price_range: None,
            category: None,
            page: 1,
            limit: None,
            sort: None,
        }
    }

    #[test]
    fn test_empty_listing_has_no_predicates() {
        let (filter, order) = build_listing(&query()).unwrap();
        assert!(filter.predicates().is_empty());
        assert_eq!(order, CatalogOrder::Ranked);
    }

    #[test]
    fn test_listing_predicates() {
        let mut q = query();
        q.gender = Some("male".to_string());
        q.tags = Some("edgy,street".to_string());
        q.price_range = Some("high".to_string());
        q.sort = Some("newest".to_string());

        let (filter, order) = build_listing(&q).unwrap();
        assert_eq!(filter.predicates().len(), 3);
        assert_eq!(filter.predicates()[0], Predicate::GenderMatch(Gender::Male));
        assert!(matches!(
            &filter.predicates()[2],
            Predicate::PriceRangeMatch(ranges) if ranges.contains(&PriceRange::High)
        ));
        assert_eq!(order, CatalogOrder::Newest);
    }

    #[test]
    fn test_listing_rejects_unknown_values() {
        let mut q = query();
        q.sort = Some("cheapest".to_string());
        assert!(build_listing(&q).is_err());

        let mut q = query();
        q.price_range = Some("free".to_string());
        assert!(build_listing(&q).is_err());

        let mut q = query();
        q.gender = Some("robot".to_string());
        assert!(build_listing(&q).is_err());
    }
}
