use crate::flows::PageError;
use crate::model::MenuItem;
use crate::services::RestaurantApi;
use tracing::{info, instrument};

/// Loads the full menu.
#[instrument(skip_all)]
pub async fn load_menu(api: &dyn RestaurantApi) -> Result<Vec<MenuItem>, PageError> {
    let menu = api.get_menu().await?;
    info!(items = menu.len(), "Menu loaded");
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryRestaurant;

    #[tokio::test]
    async fn test_load_menu() {
        let restaurant = InMemoryRestaurant::with_sample_menu();
        let menu = load_menu(&restaurant).await.unwrap();
        assert_eq!(menu.len(), 4);
        assert!(menu.iter().any(|pizza| pizza.sold_out));
    }

    #[tokio::test]
    async fn test_load_menu_failure_is_a_page_error() {
        let restaurant = InMemoryRestaurant::with_sample_menu();
        restaurant.fail_with(Some(500));

        let err = load_menu(&restaurant).await.unwrap_err();
        assert!(!err.not_found);
        assert_eq!(err.recovery_path, "/");
    }
}
