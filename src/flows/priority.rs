use crate::flows::PageError;
use crate::model::{OrderId, OrderPatch};
use crate::services::RestaurantApi;
use tracing::{info, instrument};

/// Upgrades an existing order to priority delivery.
///
/// The caller re-fetches the order to see the new priority price.
#[instrument(skip(api))]
pub async fn make_priority(api: &dyn RestaurantApi, id: &OrderId) -> Result<(), PageError> {
    api.update_order(id, &OrderPatch { priority: Some(true) }).await?;
    info!(order_id = %id, "Order made priority");
    Ok(())
}
