//! Read-side projections: flatten, index, search and count

use shared::models::{CategoryIndex, Dish, DishSearchHit, FlatDish, Restaurant};

/// Case-insensitive substring match; the term is never treated as a pattern
pub fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

/// Every dish of the restaurant annotated with its owners, most recently
/// updated first
pub fn flatten_dishes(restaurant: &Restaurant) -> Vec<FlatDish> {
    let mut dishes = Vec::new();

    for category in &restaurant.categories {
        for dish in category.direct_dishes() {
            dishes.push(FlatDish {
                dish: dish.clone(),
                restaurant_name: restaurant.restaurant_name.clone(),
                category_id: category.id,
                category_name: category.category_name.clone(),
                sub_category_id: None,
                sub_category_name: None,
            });
        }

        for sub in category.subcategories() {
            for dish in &sub.dishes {
                dishes.push(FlatDish {
                    dish: dish.clone(),
                    restaurant_name: restaurant.restaurant_name.clone(),
                    category_id: category.id,
                    category_name: category.category_name.clone(),
                    sub_category_id: Some(sub.id),
                    sub_category_name: Some(sub.sub_category_name.clone()),
                });
            }
        }
    }

    // Stable: equal timestamps keep tree order
    dishes.sort_by(|a, b| b.dish.updated_at.cmp(&a.dish.updated_at));
    dishes
}

/// Category/subcategory ids and names, without dishes
pub fn category_index(restaurant: &Restaurant) -> Vec<CategoryIndex> {
    restaurant.categories.iter().map(CategoryIndex::from).collect()
}

/// Cumulative search over one restaurant's menu
///
/// Per category, contributions are emitted in this order:
/// 1. the category's direct dishes as a group when the category name matches
/// 2. for each subcategory, its dishes as a group when its name matches,
///    followed by each of its dishes whose name matches
/// 3. each direct dish whose name matches
pub fn search_dishes(restaurant: &Restaurant, term: &str) -> Vec<DishSearchHit> {
    let mut hits = Vec::new();

    for category in &restaurant.categories {
        if matches_term(&category.category_name, term) {
            hits.push(DishSearchHit::CategoryGroup {
                category_id: category.id,
                category_name: category.category_name.clone(),
                matches: category.direct_dishes().to_vec(),
            });
        }

        for sub in category.subcategories() {
            if matches_term(&sub.sub_category_name, term) {
                hits.push(DishSearchHit::SubCategoryGroup {
                    category_id: category.id,
                    category_name: category.category_name.clone(),
                    sub_category_id: sub.id,
                    sub_category_name: sub.sub_category_name.clone(),
                    matches: sub.dishes.clone(),
                });
            }

            for dish in matching(&sub.dishes, term) {
                hits.push(DishSearchHit::Dish {
                    category_id: category.id,
                    category_name: category.category_name.clone(),
                    sub_category_id: Some(sub.id),
                    sub_category_name: Some(sub.sub_category_name.clone()),
                    dish: dish.clone(),
                });
            }
        }

        for dish in matching(category.direct_dishes(), term) {
            hits.push(DishSearchHit::Dish {
                category_id: category.id,
                category_name: category.category_name.clone(),
                sub_category_id: None,
                sub_category_name: None,
                dish: dish.clone(),
            });
        }
    }

    hits
}

fn matching<'a>(dishes: &'a [Dish], term: &'a str) -> impl Iterator<Item = &'a Dish> + 'a {
    dishes.iter().filter(move |d| matches_term(&d.dish_name, term))
}

/// Number of dishes across all categories and subcategories
pub fn count_dishes(restaurant: &Restaurant) -> u64 {
    restaurant
        .categories
        .iter()
        .map(|c| {
            let nested: usize = c.subcategories().iter().map(|s| s.dishes.len()).sum();
            (c.direct_dishes().len() + nested) as u64
        })
        .sum()
}
