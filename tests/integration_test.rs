use pizza_order::clients::{ActorClient, AddressFetch};
use pizza_order::flows::{OrderForm, SubmissionOutcome, INVALID_PHONE_MESSAGE};
use pizza_order::lifecycle::{PizzaSystem, Services};
use pizza_order::model::{AddressStatus, Cart, CartItem, PizzaId, Position, UserState};
use pizza_order::services::{
    FixedGeolocator, GeocodedAddress, GeocodingApi, GeocodingError, InMemoryRestaurant,
    UnavailableGeolocator,
};
use std::sync::Arc;

struct StaticGeocoder;

#[async_trait::async_trait]
impl GeocodingApi for StaticGeocoder {
    async fn reverse_geocode(&self, _position: Position) -> Result<GeocodedAddress, GeocodingError> {
        Ok(GeocodedAddress {
            locality: Some("Baixa".into()),
            city: Some("Lisbon".into()),
            postcode: Some("1100".into()),
            country_name: Some("Portugal".into()),
        })
    }
}

fn lisbon() -> Position {
    Position {
        latitude: 38.71,
        longitude: -9.14,
    }
}

fn services(restaurant: Arc<InMemoryRestaurant>) -> Services {
    Services {
        restaurant,
        geocoder: Arc::new(StaticGeocoder),
        geolocator: Arc::new(FixedGeolocator(lisbon())),
    }
}

/// Full end-to-end run with real stores and the in-memory restaurant.
#[tokio::test]
async fn test_full_order_flow() {
    let restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
    let system = PizzaSystem::new(services(restaurant.clone()), 16);

    system.user_client.set_username("Ada".into()).await.unwrap();

    // Address lookup fills position and address
    let fetched = system.fetch_address().await.unwrap();
    assert_eq!(
        fetched,
        AddressFetch::Resolved {
            position: lisbon(),
            address: "Baixa, Lisbon 1100, Portugal".into(),
        }
    );
    let user = system.user_client.snapshot().await.unwrap();
    assert_eq!(user.status, AddressStatus::Idle);

    // Fill the cart from the menu
    let menu = system.load_menu().await.unwrap();
    let margherita = menu.iter().find(|p| p.id == PizzaId(1)).unwrap();
    for _ in 0..3 {
        system
            .cart_client
            .add_item(CartItem::new(margherita.id, margherita.name.clone(), 1, margherita.unit_price))
            .await
            .unwrap();
    }
    system
        .cart_client
        .add_item(CartItem::new(PizzaId(3), "Romana", 1, 15.0))
        .await
        .unwrap();
    assert_eq!(system.cart_client.quantity_of(PizzaId(1)).await.unwrap(), 3);
    assert_eq!(system.cart_client.total_price().await.unwrap(), 51.0);

    // Submit with the looked-up address
    let form = system.order_form("+1 555-123-4567", "", true).await.unwrap();
    assert_eq!(form.customer, "Ada");
    assert_eq!(form.address, "Baixa, Lisbon 1100, Portugal");
    assert_eq!(form.position, "38.71, -9.14");

    let outcome = system.submit_order(form).await.unwrap();
    let order = match outcome {
        SubmissionOutcome::Created { order, redirect, .. } => {
            assert_eq!(redirect.path, format!("/order/{}", order.id));
            order
        }
        other => panic!("expected a created order, got {other:?}"),
    };

    // The cart was cleared by the system, the draft reached the restaurant
    assert!(system.cart_client.cart().await.unwrap().is_empty());
    let draft = &restaurant.drafts()[0];
    assert!(draft.priority);
    assert_eq!(draft.cart.total_quantity(), 4);

    // The order page
    let loaded = system.load_order(&order.id).await.unwrap();
    assert!(loaded.order.priority);
    assert!((loaded.order.total_to_pay() - 61.2).abs() < 1e-9);
    let ingredients = loaded.ingredients().await.unwrap();
    assert_eq!(ingredients[&PizzaId(3)], vec!["tomato", "mozzarella", "prosciutto"]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_phone_keeps_cart() {
    let restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
    let cart = Cart::with_items([CartItem::new(PizzaId(1), "Margherita", 2, 12.0)]).unwrap();
    let system = PizzaSystem::with_state(services(restaurant.clone()), 16, cart, UserState::new("Ada"));

    let form = system.order_form("call me", "Rua Augusta 1", false).await.unwrap();
    let outcome = system.submit_order(form).await.unwrap();

    match outcome {
        SubmissionOutcome::Invalid(errors) => {
            assert_eq!(errors.phone.as_deref(), Some(INVALID_PHONE_MESSAGE))
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
    assert!(restaurant.drafts().is_empty());
    assert_eq!(system.cart_client.total_quantity().await.unwrap(), 2);

    system.shutdown().await.unwrap();
}

/// Whatever the cart held, it is empty after a successful order.
#[tokio::test]
async fn test_successful_order_always_clears_cart() {
    for lines in 1..=3u32 {
        let restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
        let cart = Cart::with_items(
            (1..=lines).map(|id| CartItem::new(PizzaId(id), format!("Pizza {id}"), id, 10.0)),
        )
        .unwrap();
        let system = PizzaSystem::with_state(services(restaurant), 4, cart, UserState::new("Ada"));

        let form = system.order_form("912345678", "Rua Augusta 1", false).await.unwrap();
        let outcome = system.submit_order(form).await.unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Created { .. }));
        assert_eq!(system.cart_client.total_quantity().await.unwrap(), 0);
        system.shutdown().await.unwrap();
    }
}

#[tokio::test]
async fn test_unknown_order_and_unavailable_api() {
    let restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
    let system = PizzaSystem::new(services(restaurant.clone()), 4);

    let err = system.load_order(&"IIDSAT".into()).await.unwrap_err();
    assert!(err.not_found);
    assert_eq!(err.recovery_path, "/");

    restaurant.fail_with(Some(503));
    let err = system.load_menu().await.unwrap_err();
    assert!(!err.not_found);

    let err = system.load_order(&"IIDSAT".into()).await.unwrap_err();
    assert!(!err.not_found);
    assert_eq!(err.message, "Failed getting order: status 503: injected failure");

    let form = OrderForm {
        customer: "Ada".into(),
        phone: "912345678".into(),
        address: "Rua Augusta 1".into(),
        priority: Some("on".into()),
        cart: "[]".into(),
        position: String::new(),
    };
    assert!(system.submit_order(form).await.is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_denied_geolocation_leaves_manual_address() {
    let restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
    let services = Services {
        geolocator: Arc::new(UnavailableGeolocator { denied: true }),
        ..services(restaurant)
    };
    let system = PizzaSystem::new(services, 4);

    assert!(system.fetch_address().await.is_err());

    let user = system.user_client.snapshot().await.unwrap();
    assert_eq!(user.status, AddressStatus::Error);
    assert_eq!(user.error, "User denied Geolocation");

    let form = system.order_form("912345678", "Rua Augusta 1", false).await.unwrap();
    assert_eq!(form.address, "Rua Augusta 1");
    assert_eq!(form.position, "");

    system.shutdown().await.unwrap();
}
