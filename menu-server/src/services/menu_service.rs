//! Menu Service
//!
//! Every operation on the restaurant aggregate goes through here. Writes are
//! read-modify-write: load the whole document, run a pure mutation from
//! [`crate::menu::tree`], then save it back conditionally on the loaded
//! version. A stale save re-runs the mutation on a fresh copy.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryCreated, CategoryUpdate, DELETE_CONFIRMATION, Dish,
    DishCount, DishCreate, DishDelete, DishDeleted, DishListing, DishSearchResults,
    RESTAURANT_PAGE_SIZE, Restaurant, RestaurantCount, RestaurantCreate, RestaurantDelete,
    RestaurantDeleted, RestaurantRef, RestaurantUpdate, ServingInfo, SubCategory,
    SubCategoryPayload,
};
use shared::response::PaginatedResponse;
use shared::util::now_millis;

use crate::db::repository::RestaurantRepository;
use crate::menu::{self, NewDish, tree};
use crate::services::LogoStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_QUERY_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, require_text,
    validate_optional_text, validate_required_text,
};

/// Attempts of one read-modify-write before giving up
const MAX_WRITE_ATTEMPTS: usize = 3;

/// How the aggregate to mutate is located
#[derive(Debug, Clone, Copy)]
enum Locator {
    Restaurant(i64),
    /// The restaurant embedding this category
    Category(i64),
}

#[derive(Clone)]
pub struct MenuService {
    repo: RestaurantRepository,
    logos: LogoStore,
    enforce_unique_rename: bool,
}

impl MenuService {
    pub fn new(repo: RestaurantRepository, logos: LogoStore, enforce_unique_rename: bool) -> Self {
        Self {
            repo,
            logos,
            enforce_unique_rename,
        }
    }

    // ==================== Restaurants ====================

    pub async fn create_restaurant(&self, payload: RestaurantCreate) -> AppResult<Restaurant> {
        let name = require_text(payload.restaurant_name, "restaurant_name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.logo, "logo", MAX_URL_LEN)?;

        let logo = payload
            .logo
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.logos.default_logo().to_string());
        let restaurant = tree::new_restaurant(name, Some(logo), payload.description, now_millis());
        if !self.repo.insert(&restaurant).await? {
            return Err(AppError::new(ErrorCode::RestaurantNameExists));
        }

        tracing::info!(restaurant_id = restaurant.id, name = %restaurant.restaurant_name, "Restaurant created");
        Ok(restaurant)
    }

    /// The confirmation token is checked before the restaurant is looked up
    pub async fn delete_restaurant(
        &self,
        restaurant_id: i64,
        payload: RestaurantDelete,
    ) -> AppResult<RestaurantDeleted> {
        check_confirmation(payload.confirmation_token.as_deref())?;

        let restaurant = self.load(Locator::Restaurant(restaurant_id)).await?;
        if !self.repo.delete(restaurant_id).await? {
            return Err(AppError::new(ErrorCode::RestaurantNotFound));
        }
        self.release_logo(&restaurant.logo).await;

        tracing::info!(restaurant_id, "Restaurant deleted");
        Ok(RestaurantDeleted { restaurant_id })
    }

    pub async fn edit_restaurant(
        &self,
        restaurant_id: i64,
        payload: RestaurantUpdate,
    ) -> AppResult<Restaurant> {
        // Blank values mean "unchanged"
        let name = payload.restaurant_name.filter(|n| !n.trim().is_empty());
        let logo = payload.logo.filter(|l| !l.trim().is_empty());
        if let Some(name) = &name {
            validate_required_text(name, "restaurant_name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&logo, "logo", MAX_URL_LEN)?;

        if self.enforce_unique_rename
            && let Some(name) = &name
            && self.repo.name_exists(name, Some(restaurant_id)).await?
        {
            return Err(AppError::new(ErrorCode::RestaurantNameExists));
        }

        let (restaurant, replaced_logo) = self
            .mutate(Locator::Restaurant(restaurant_id), |r, now| {
                Ok(tree::edit_restaurant(
                    r,
                    name.clone(),
                    logo.clone(),
                    payload.description.clone(),
                    now,
                ))
            })
            .await?;

        if let Some(old) = replaced_logo {
            self.release_logo(&old).await;
        }
        Ok(restaurant)
    }

    /// Fixed-size pages, most recently updated first
    pub async fn list_restaurants(
        &self,
        page: Option<i64>,
        search: Option<String>,
    ) -> AppResult<PaginatedResponse<Restaurant>> {
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;
        let search = search.filter(|s| !s.is_empty());
        let limit = RESTAURANT_PAGE_SIZE;

        let total = self.repo.count(search.as_deref()).await?;
        let data = self
            .repo
            .find_page(search.as_deref(), limit, PaginatedResponse::<Restaurant>::offset(page, limit))
            .await?;
        Ok(PaginatedResponse::new(data, total, page, limit))
    }

    pub async fn search_restaurants(&self, query: Option<String>) -> AppResult<Vec<Restaurant>> {
        let term = search_term(query)?;
        let restaurants = self.repo.search_by_name(&term).await?;
        if restaurants.is_empty() {
            return Err(AppError::new(ErrorCode::NoMatchingRestaurants));
        }
        Ok(restaurants)
    }

    pub async fn count_restaurants(&self) -> AppResult<RestaurantCount> {
        Ok(RestaurantCount {
            total_restaurants: self.repo.count(None).await?,
        })
    }

    // ==================== Categories ====================

    pub async fn create_category(
        &self,
        restaurant_id: i64,
        payload: CategoryCreate,
    ) -> AppResult<CategoryCreated> {
        let name = require_text(payload.category_name, "category_name", MAX_NAME_LEN)?;

        let (restaurant, new_category_id) = self
            .mutate(Locator::Restaurant(restaurant_id), |r, now| {
                Ok(tree::add_category(r, name.clone(), now)?)
            })
            .await?;

        tracing::info!(restaurant_id, category_id = new_category_id, "Category created");
        Ok(CategoryCreated {
            categories: restaurant.categories,
            new_category_id,
        })
    }

    pub async fn list_categories(&self, restaurant_id: i64) -> AppResult<Vec<Category>> {
        Ok(self.load(Locator::Restaurant(restaurant_id)).await?.categories)
    }

    pub async fn edit_category(
        &self,
        restaurant_id: i64,
        category_id: i64,
        payload: CategoryUpdate,
    ) -> AppResult<Vec<Category>> {
        let name = require_text(payload.new_category_name, "new_category_name", MAX_NAME_LEN)?;

        let (restaurant, ()) = self
            .mutate(Locator::Restaurant(restaurant_id), |r, now| {
                Ok(tree::rename_category(r, category_id, name.clone(), now)?)
            })
            .await?;
        Ok(restaurant.categories)
    }

    pub async fn create_subcategory(
        &self,
        restaurant_id: i64,
        category_id: i64,
        payload: SubCategoryPayload,
    ) -> AppResult<SubCategory> {
        let name = require_text(payload.sub_category_name, "sub_category_name", MAX_NAME_LEN)?;

        let (_, sub) = self
            .mutate(Locator::Restaurant(restaurant_id), |r, now| {
                Ok(tree::add_subcategory(r, category_id, name.clone(), now)?)
            })
            .await?;

        tracing::info!(restaurant_id, category_id, sub_category_id = sub.id, "Subcategory created");
        Ok(sub)
    }

    pub async fn edit_subcategory(
        &self,
        restaurant_id: i64,
        category_id: i64,
        sub_category_id: i64,
        payload: SubCategoryPayload,
    ) -> AppResult<SubCategory> {
        let name = require_text(payload.sub_category_name, "sub_category_name", MAX_NAME_LEN)?;
        let enforce_unique = self.enforce_unique_rename;

        let (_, sub) = self
            .mutate(Locator::Restaurant(restaurant_id), |r, now| {
                Ok(tree::rename_subcategory(
                    r,
                    category_id,
                    sub_category_id,
                    name.clone(),
                    enforce_unique,
                    now,
                )?)
            })
            .await?;
        Ok(sub)
    }

    // ==================== Dishes ====================

    /// The owning restaurant is found through the category
    pub async fn create_dish(
        &self,
        category_id: i64,
        sub_category_id: Option<i64>,
        payload: DishCreate,
    ) -> AppResult<Dish> {
        let new_dish = validate_dish(payload)?;

        let (restaurant, dish) = self
            .mutate(Locator::Category(category_id), |r, now| {
                Ok(tree::add_dish(r, category_id, sub_category_id, new_dish.clone(), now)?)
            })
            .await?;

        tracing::info!(
            restaurant_id = restaurant.id,
            category_id,
            sub_category_id = ?sub_category_id,
            dish_id = dish.id,
            "Dish created"
        );
        Ok(dish)
    }

    pub async fn delete_dish(
        &self,
        restaurant_id: i64,
        category_id: i64,
        sub_category_id: Option<i64>,
        payload: DishDelete,
    ) -> AppResult<DishDeleted> {
        check_confirmation(payload.confirmation_token.as_deref())?;
        let dish_id = payload
            .dish_id
            .ok_or_else(|| AppError::required("dish_id is required"))?;

        self.mutate(Locator::Restaurant(restaurant_id), |r, now| {
            Ok(tree::remove_dish(r, category_id, sub_category_id, dish_id, now)?)
        })
        .await?;

        tracing::info!(restaurant_id, category_id, dish_id, "Dish deleted");
        Ok(DishDeleted { dish_id })
    }

    pub async fn list_dishes(&self, restaurant_id: i64) -> AppResult<DishListing> {
        let restaurant = self.load(Locator::Restaurant(restaurant_id)).await?;
        Ok(DishListing {
            dishes: menu::flatten_dishes(&restaurant),
            categories: menu::category_index(&restaurant),
            restaurant: RestaurantRef {
                id: restaurant.id,
                name: restaurant.restaurant_name,
            },
        })
    }

    pub async fn search_dishes(
        &self,
        restaurant_id: i64,
        query: Option<String>,
    ) -> AppResult<DishSearchResults> {
        let term = search_term(query)?;
        let restaurant = self.load(Locator::Restaurant(restaurant_id)).await?;

        let results = menu::search_dishes(&restaurant, &term);
        if results.is_empty() {
            return Err(AppError::new(ErrorCode::NoMatchingDishes));
        }
        Ok(DishSearchResults { results })
    }

    /// Full scan over every aggregate
    pub async fn count_dishes(&self) -> AppResult<DishCount> {
        let restaurants = self.repo.find_all().await?;
        Ok(DishCount {
            total_dishes: restaurants.iter().map(menu::count_dishes).sum(),
        })
    }

    // ==================== Internals ====================

    async fn load(&self, locator: Locator) -> AppResult<Restaurant> {
        let found = match locator {
            Locator::Restaurant(id) => self.repo.find_by_id(id).await?,
            Locator::Category(id) => self.repo.find_by_category_id(id).await?,
        };
        found.ok_or_else(|| match locator {
            Locator::Restaurant(_) => AppError::new(ErrorCode::RestaurantNotFound),
            Locator::Category(_) => AppError::new(ErrorCode::CategoryNotFound),
        })
    }

    /// Remove a logo file no restaurant points at any more
    ///
    /// Runs after the owning row has been deleted or saved, so any remaining
    /// reference belongs to another restaurant. Lookup failures keep the file.
    async fn release_logo(&self, logo: &str) {
        let Some(path) = self.logos.resolve(logo) else {
            return;
        };
        match self.repo.logos().await {
            Ok(logos) => {
                if logos.iter().any(|l| self.logos.resolve(l).as_ref() == Some(&path)) {
                    tracing::debug!(logo = %logo, "Logo still referenced, kept");
                    return;
                }
                self.logos.remove(logo).await;
            }
            Err(e) => {
                tracing::warn!(logo = %logo, error = %e, "Failed to check logo references, kept");
            }
        }
    }

    /// Load, mutate and conditionally save one aggregate
    async fn mutate<T, F>(&self, locator: Locator, mut f: F) -> AppResult<(Restaurant, T)>
    where
        F: FnMut(&mut Restaurant, i64) -> AppResult<T>,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut restaurant = self.load(locator).await?;
            let out = f(&mut restaurant, now_millis())?;

            if self.repo.save(&mut restaurant).await? {
                return Ok((restaurant, out));
            }
            tracing::warn!(
                restaurant_id = restaurant.id,
                attempt,
                "Concurrent write detected, retrying"
            );
        }

        Err(AppError::new(ErrorCode::WriteConflict))
    }
}

fn check_confirmation(token: Option<&str>) -> AppResult<()> {
    if token != Some(DELETE_CONFIRMATION) {
        return Err(AppError::new(ErrorCode::DeleteConfirmationInvalid));
    }
    Ok(())
}

fn search_term(query: Option<String>) -> AppResult<String> {
    let term = query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::required("Search query is required"))?;
    if term.len() > MAX_QUERY_LEN {
        return Err(AppError::validation(format!(
            "query is too long ({} chars, max {MAX_QUERY_LEN})",
            term.len()
        )));
    }
    Ok(term)
}

/// Check a dish payload and normalize its serving infos
fn validate_dish(payload: DishCreate) -> AppResult<NewDish> {
    let dish_name = require_text(payload.dish_name, "dish_name", MAX_NAME_LEN)?;
    let serving_infos = payload.serving_infos.unwrap_or_default();
    if serving_infos.is_empty() {
        return Err(AppError::new(ErrorCode::ServingInfoRequired));
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    for info in &serving_infos {
        validate_required_text(&info.size, "size", MAX_SHORT_TEXT_LEN)?;
        if info.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::validation("price must not be negative"));
        }
    }

    Ok(NewDish {
        dish_name,
        description: payload.description,
        serving_infos: serving_infos.into_iter().map(ServingInfo::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{DEFAULT_LOGO_PATH, DishSearchHit, NutritionInput, ServingInfoInput};

    /// Never produced by the id generator
    const MISSING_ID: i64 = i64::MAX;

    async fn service() -> MenuService {
        service_with(false).await
    }

    async fn service_with(enforce_unique_rename: bool) -> MenuService {
        let db = DbService::in_memory().await.unwrap();
        MenuService::new(
            RestaurantRepository::new(db.pool),
            LogoStore::new(std::env::temp_dir(), DEFAULT_LOGO_PATH),
            enforce_unique_rename,
        )
    }

    fn create(name: &str) -> RestaurantCreate {
        RestaurantCreate {
            restaurant_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn serving(size: &str) -> ServingInfoInput {
        ServingInfoInput {
            size: size.to_string(),
            price: None,
            nutrition_facts: NutritionInput {
                calories: 250.0,
                protein: 10.0,
                carbs: 30.0,
                total_fat: 8.0,
            },
        }
    }

    fn dish(name: &str) -> DishCreate {
        DishCreate {
            dish_name: Some(name.to_string()),
            description: None,
            serving_infos: Some(vec![serving("Large")]),
        }
    }

    async fn category(svc: &MenuService, restaurant_id: i64, name: &str) -> i64 {
        svc.create_category(
            restaurant_id,
            CategoryCreate {
                category_name: Some(name.to_string()),
            },
        )
        .await
        .unwrap()
        .new_category_id
    }

    #[tokio::test]
    async fn test_create_restaurant_duplicate_name() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        assert_eq!(r.logo, DEFAULT_LOGO_PATH);
        assert!(r.categories.is_empty());

        let err = svc.create_restaurant(create("Cafe")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNameExists);

        let err = svc.create_restaurant(RestaurantCreate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_delete_restaurant_checks_token_first() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();

        for token in [None, Some("remove".to_string())] {
            let err = svc
                .delete_restaurant(r.id, RestaurantDelete { confirmation_token: token.clone() })
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::DeleteConfirmationInvalid);

            // Unknown ids still fail on the token
            let err = svc
                .delete_restaurant(1, RestaurantDelete { confirmation_token: token })
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::DeleteConfirmationInvalid);
        }

        let confirm = || RestaurantDelete {
            confirmation_token: Some(DELETE_CONFIRMATION.to_string()),
        };
        let deleted = svc.delete_restaurant(r.id, confirm()).await.unwrap();
        assert_eq!(deleted.restaurant_id, r.id);

        let err = svc.delete_restaurant(r.id, confirm()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_edit_restaurant_partial_update() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        svc.create_restaurant(create("Bistro")).await.unwrap();

        let updated = svc
            .edit_restaurant(
                r.id,
                RestaurantUpdate {
                    logo: Some("/uploads/new.webp".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.restaurant_name, "Cafe");
        assert_eq!(updated.logo, "/uploads/new.webp");
        assert_eq!(updated.version, 1);

        // Lenient by default: a taken name is accepted
        let updated = svc
            .edit_restaurant(
                r.id,
                RestaurantUpdate {
                    restaurant_name: Some("Bistro".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.restaurant_name, "Bistro");
        assert_eq!(updated.logo, "/uploads/new.webp");

        let err = svc
            .edit_restaurant(MISSING_ID, RestaurantUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_edit_restaurant_strict_rename() {
        let svc = service_with(true).await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        svc.create_restaurant(create("Bistro")).await.unwrap();

        let err = svc
            .edit_restaurant(
                r.id,
                RestaurantUpdate {
                    restaurant_name: Some("Bistro".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNameExists);

        // Keeping its own name is fine
        svc.edit_restaurant(
            r.id,
            RestaurantUpdate {
                restaurant_name: Some("Cafe".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_restaurants_pagination() {
        let svc = service().await;
        for i in 0..45 {
            svc.create_restaurant(create(&format!("Restaurant {i:02}"))).await.unwrap();
        }

        let first = svc.list_restaurants(Some(1), None).await.unwrap();
        assert_eq!(first.data.len(), 20);
        assert_eq!(first.total, 45);
        assert_eq!(first.total_pages, 3);

        let third = svc.list_restaurants(Some(3), None).await.unwrap();
        assert_eq!(third.data.len(), 5);

        let clamped = svc.list_restaurants(Some(-4), None).await.unwrap();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.data.len(), 20);

        let filtered = svc
            .list_restaurants(None, Some("restaurant 4".into()))
            .await
            .unwrap();
        assert_eq!(filtered.total, 5);
        assert_eq!(filtered.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_restaurants() {
        let svc = service().await;
        svc.create_restaurant(create("Pizza Palace")).await.unwrap();
        svc.create_restaurant(create("Sushi Bar")).await.unwrap();

        let hits = svc.search_restaurants(Some("PIZZA".into())).await.unwrap();
        assert_eq!(hits.len(), 1);

        let err = svc.search_restaurants(Some("tacos".into())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoMatchingRestaurants);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err = svc.search_restaurants(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_category_operations() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();

        let created = svc
            .create_category(r.id, CategoryCreate { category_name: Some("Drinks".into()) })
            .await
            .unwrap();
        assert_eq!(created.categories.len(), 1);
        assert_eq!(created.categories[0].id, created.new_category_id);

        let err = svc
            .create_category(r.id, CategoryCreate { category_name: Some("Drinks".into()) })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNameExists);

        let err = svc
            .create_category(MISSING_ID, CategoryCreate { category_name: Some("Mains".into()) })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);

        let mains = category(&svc, r.id, "Mains").await;
        let err = svc
            .edit_category(
                r.id,
                mains,
                CategoryUpdate { new_category_name: Some("Drinks".into()) },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNameExists);

        let categories = svc
            .edit_category(
                r.id,
                mains,
                CategoryUpdate { new_category_name: Some("Specials".into()) },
            )
            .await
            .unwrap();
        assert_eq!(categories[1].category_name, "Specials");

        let listed = svc.list_categories(r.id).await.unwrap();
        assert_eq!(listed, categories);
    }

    #[tokio::test]
    async fn test_subcategory_operations() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        let drinks = category(&svc, r.id, "Drinks").await;

        let payload = |name: &str| SubCategoryPayload {
            sub_category_name: Some(name.to_string()),
        };
        let hot = svc.create_subcategory(r.id, drinks, payload("Hot")).await.unwrap();
        let cold = svc.create_subcategory(r.id, drinks, payload("Cold")).await.unwrap();

        let err = svc
            .create_subcategory(r.id, drinks, payload("Hot"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubCategoryNameExists);

        let err = svc
            .create_subcategory(r.id, MISSING_ID, payload("Iced"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);

        // Lenient rename mirrors the historical behaviour
        let renamed = svc
            .edit_subcategory(r.id, drinks, cold.id, payload("Hot"))
            .await
            .unwrap();
        assert_eq!(renamed.sub_category_name, "Hot");
        assert_ne!(renamed.id, hot.id);

        let err = svc
            .edit_subcategory(r.id, drinks, 1, payload("Iced"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubCategoryNotFound);
    }

    #[tokio::test]
    async fn test_create_dish_validation_and_conflicts() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        let drinks = category(&svc, r.id, "Drinks").await;
        let cold = svc
            .create_subcategory(
                r.id,
                drinks,
                SubCategoryPayload { sub_category_name: Some("Cold".into()) },
            )
            .await
            .unwrap();

        for sub in [None, Some(cold.id)] {
            svc.create_dish(drinks, sub, dish("Cola")).await.unwrap();

            let err = svc.create_dish(drinks, sub, dish("Cola")).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::DishNameExists);

            let mut empty = dish("Tea");
            empty.serving_infos = Some(Vec::new());
            let err = svc.create_dish(drinks, sub, empty).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ServingInfoRequired);
        }

        let err = svc
            .create_dish(drinks, None, DishCreate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let mut unnamed = dish("Tea");
        unnamed.dish_name = None;
        let err = svc.create_dish(drinks, None, unnamed).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = svc.create_dish(drinks, None, dish("  ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let mut no_servings = dish("Tea");
        no_servings.serving_infos = None;
        let err = svc.create_dish(drinks, None, no_servings).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServingInfoRequired);

        let mut negative = dish("Tea");
        if let Some(infos) = negative.serving_infos.as_mut() {
            infos[0].price = Some(Decimal::new(-150, 2));
        }
        let err = svc.create_dish(drinks, None, negative).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = svc.create_dish(MISSING_ID, None, dish("Tea")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);

        let err = svc
            .create_dish(drinks, Some(MISSING_ID), dish("Tea"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubCategoryNotFound);
    }

    #[tokio::test]
    async fn test_delete_dish() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        let drinks = category(&svc, r.id, "Drinks").await;
        let cola = svc.create_dish(drinks, None, dish("Cola")).await.unwrap();

        let err = svc
            .delete_dish(
                r.id,
                drinks,
                None,
                DishDelete { dish_id: Some(cola.id), confirmation_token: Some("nope".into()) },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DeleteConfirmationInvalid);

        let err = svc
            .delete_dish(
                r.id,
                drinks,
                None,
                DishDelete { dish_id: None, confirmation_token: Some("delete".into()) },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let confirm = |id| DishDelete {
            dish_id: Some(id),
            confirmation_token: Some("delete".into()),
        };
        let deleted = svc.delete_dish(r.id, drinks, None, confirm(cola.id)).await.unwrap();
        assert_eq!(deleted.dish_id, cola.id);

        let err = svc
            .delete_dish(r.id, drinks, None, confirm(cola.id))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DishNotFound);
    }

    #[tokio::test]
    async fn test_list_and_search_dishes() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();

        let listing = svc.list_dishes(r.id).await.unwrap();
        assert!(listing.dishes.is_empty());
        assert_eq!(listing.restaurant.name, "Cafe");

        let drinks = category(&svc, r.id, "Drinks").await;
        svc.create_dish(drinks, None, dish("Cola")).await.unwrap();

        let listing = svc.list_dishes(r.id).await.unwrap();
        assert_eq!(listing.dishes.len(), 1);
        let facts = &listing.dishes[0].dish.serving_infos[0].nutrition_facts;
        assert_eq!(facts.calories.value, 250.0);
        assert_eq!(facts.calories.unit, "kcal");
        assert_eq!(facts.total_fat.unit, "g");

        let found = svc.search_dishes(r.id, Some("drinks".into())).await.unwrap();
        assert!(matches!(
            &found.results[..],
            [DishSearchHit::CategoryGroup { matches, .. }] if matches[0].dish_name == "Cola"
        ));

        let err = svc.search_dishes(r.id, Some("pizza".into())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoMatchingDishes);

        let err = svc.search_dishes(MISSING_ID, Some("cola".into())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_counts() {
        let svc = service().await;
        let a = svc.create_restaurant(create("A")).await.unwrap();
        let b = svc.create_restaurant(create("B")).await.unwrap();
        let a_drinks = category(&svc, a.id, "Drinks").await;
        let b_mains = category(&svc, b.id, "Mains").await;
        let sub = svc
            .create_subcategory(
                b.id,
                b_mains,
                SubCategoryPayload { sub_category_name: Some("Grill".into()) },
            )
            .await
            .unwrap();

        svc.create_dish(a_drinks, None, dish("Cola")).await.unwrap();
        svc.create_dish(a_drinks, None, dish("Tea")).await.unwrap();
        svc.create_dish(b_mains, Some(sub.id), dish("Steak")).await.unwrap();

        assert_eq!(svc.count_restaurants().await.unwrap().total_restaurants, 2);
        assert_eq!(svc.count_dishes().await.unwrap().total_dishes, 3);
    }

    #[tokio::test]
    async fn test_concurrent_dish_creation_keeps_both() {
        let svc = service().await;
        let r = svc.create_restaurant(create("Cafe")).await.unwrap();
        let drinks = category(&svc, r.id, "Drinks").await;

        let (a, b) = tokio::join!(
            svc.create_dish(drinks, None, dish("Cola")),
            svc.create_dish(drinks, None, dish("Tea")),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(svc.list_dishes(r.id).await.unwrap().dishes.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_create_same_name_admits_one() {
        let svc = service().await;

        let (a, b) = tokio::join!(
            svc.create_restaurant(create("Cafe")),
            svc.create_restaurant(create("Cafe")),
        );
        let codes: Vec<_> = [a, b]
            .into_iter()
            .filter_map(|res| res.err().map(|e| e.code))
            .collect();
        assert_eq!(codes, vec![ErrorCode::RestaurantNameExists]);
        assert_eq!(svc.count_restaurants().await.unwrap().total_restaurants, 1);
    }

    #[tokio::test]
    async fn test_shared_logo_kept_until_last_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
        let file = dir.path().join("uploads/shared.webp");
        std::fs::write(&file, b"img").unwrap();

        let db = DbService::in_memory().await.unwrap();
        let svc = MenuService::new(
            RestaurantRepository::new(db.pool),
            LogoStore::new(dir.path(), DEFAULT_LOGO_PATH),
            false,
        );
        let with_logo = |name: &str, logo: &str| RestaurantCreate {
            restaurant_name: Some(name.to_string()),
            logo: Some(logo.to_string()),
            ..Default::default()
        };
        let a = svc
            .create_restaurant(with_logo("A", "/uploads/shared.webp"))
            .await
            .unwrap();
        let b = svc
            .create_restaurant(with_logo("B", "uploads/./shared.webp"))
            .await
            .unwrap();
        let delete = || RestaurantDelete {
            confirmation_token: Some(DELETE_CONFIRMATION.into()),
        };

        svc.delete_restaurant(a.id, delete()).await.unwrap();
        assert!(file.exists());

        svc.delete_restaurant(b.id, delete()).await.unwrap();
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_default_logo_alias_never_removed() {
        let dir = tempfile::tempdir().unwrap();
        let default_file = dir.path().join("restaurant-default-logo/restaurantdefaultlogo.webp");
        std::fs::create_dir_all(default_file.parent().unwrap()).unwrap();
        std::fs::write(&default_file, b"img").unwrap();

        let db = DbService::in_memory().await.unwrap();
        let svc = MenuService::new(
            RestaurantRepository::new(db.pool),
            LogoStore::new(dir.path(), DEFAULT_LOGO_PATH),
            false,
        );
        let r = svc
            .create_restaurant(RestaurantCreate {
                restaurant_name: Some("Cafe".into()),
                logo: Some("restaurant-default-logo/restaurantdefaultlogo.webp".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        svc.delete_restaurant(
            r.id,
            RestaurantDelete {
                confirmation_token: Some(DELETE_CONFIRMATION.into()),
            },
        )
        .await
        .unwrap();

        assert!(default_file.exists());
    }
}
