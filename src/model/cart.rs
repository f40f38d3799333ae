/// The client-side cart: line items keyed by pizza.
///
/// # Actor Framework
/// [`Cart`] implements the [`ActorState`](crate::framework::ActorState) trait,
/// allowing it to be owned by a [`StoreActor`](crate::framework::StoreActor).
///
/// See [`impl ActorState for Cart`](#impl-ActorState-for-Cart) for the actions it accepts.
use crate::cart_actor::CartError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Surcharge rate applied to the cart total when an order is given priority.
pub const PRIORITY_RATE: f64 = 0.2;

/// Type-safe identifier for pizzas on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PizzaId(pub u32);

impl From<u32> for PizzaId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PizzaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pizza_{}", self.0)
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub pizza_id: PizzaId,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl CartItem {
    /// Creates a line item with `total_price` derived from quantity and unit price.
    pub fn new(pizza_id: PizzaId, name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            pizza_id,
            name: name.into(),
            quantity,
            unit_price,
            total_price: f64::from(quantity) * unit_price,
        }
    }

    fn recompute_total(&mut self) {
        self.total_price = f64::from(self.quantity) * self.unit_price;
    }
}

/// Ordered sequence of [`CartItem`], at most one per [`PizzaId`].
///
/// Serializes as a plain JSON array, which is the shape the order form carries in
/// its hidden `cart` field and the shape the restaurant API expects. Deserializing
/// goes through [`Cart::try_from`], so a parsed cart holds the same invariants as
/// one built with [`Cart::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartError;

    /// Builds a cart from lines received from outside.
    ///
    /// Unlike [`Cart::with_items`], a repeated pizza or a `total_price` that does
    /// not match `quantity * unit_price` is rejected instead of being repaired.
    fn try_from(items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut cart = Self::default();
        for item in items {
            if cart.quantity_of(item.pizza_id) > 0 {
                return Err(CartError::InvalidItem(format!("{} appears more than once", item.pizza_id)));
            }
            let expected = f64::from(item.quantity) * item.unit_price;
            if (item.total_price - expected).abs() > 1e-6 {
                return Err(CartError::InvalidItem(format!(
                    "{} has total price {}, expected {}",
                    item.pizza_id, item.total_price, expected
                )));
            }
            cart.add(item)?;
        }
        Ok(cart)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<CartItem>::deserialize(deserializer)?;
        Cart::try_from(items).map_err(serde::de::Error::custom)
    }
}

impl Cart {
    /// Creates a cart from existing line items, merging duplicates.
    pub fn with_items(items: impl IntoIterator<Item = CartItem>) -> Result<Self, CartError> {
        let mut cart = Self::default();
        for item in items {
            cart.add(item)?;
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Inserts `item`, or merges its quantity into the existing line for the same pizza.
    ///
    /// # Errors
    /// [`CartError::InvalidItem`] if the quantity is zero or the unit price is negative
    /// or not finite.
    pub fn add(&mut self, mut item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidItem(format!("{} has quantity 0", item.pizza_id)));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(CartError::InvalidItem(format!(
                "{} has unit price {}",
                item.pizza_id, item.unit_price
            )));
        }

        match self.find_mut(item.pizza_id) {
            Some(existing) => {
                existing.quantity += item.quantity;
                existing.recompute_total();
            }
            None => {
                item.recompute_total();
                self.items.push(item);
            }
        }
        Ok(())
    }

    /// Increments the quantity of a line. Returns `false` if the pizza is not in the cart.
    pub fn increase(&mut self, pizza_id: PizzaId) -> bool {
        match self.find_mut(pizza_id) {
            Some(item) => {
                item.quantity += 1;
                item.recompute_total();
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity of a line, removing it when it reaches zero.
    /// Returns `false` if the pizza is not in the cart.
    pub fn decrease(&mut self, pizza_id: PizzaId) -> bool {
        let Some(item) = self.find_mut(pizza_id) else {
            return false;
        };
        item.quantity = item.quantity.saturating_sub(1);
        item.recompute_total();
        if item.quantity == 0 {
            self.delete(pizza_id);
        }
        true
    }

    /// Removes a line unconditionally. Returns whether a line was removed.
    pub fn delete(&mut self, pizza_id: PizzaId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.pizza_id != pizza_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|item| item.total_price).sum()
    }

    /// Quantity of a pizza in the cart, 0 when absent.
    pub fn quantity_of(&self, pizza_id: PizzaId) -> u32 {
        self.items
            .iter()
            .find(|item| item.pizza_id == pizza_id)
            .map_or(0, |item| item.quantity)
    }

    fn find_mut(&mut self, pizza_id: PizzaId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.pizza_id == pizza_id)
    }
}

/// Priority surcharge for a cart total.
pub fn priority_price(total: f64) -> f64 {
    total * PRIORITY_RATE
}
