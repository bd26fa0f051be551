//! Client-side shopping state container.
//!
//! `StoreState` owns the products, the cart, the session, and the
//! personalization data for one browser tab. All mutations are synchronous
//! total functions over in-memory vectors; there are no error conditions and
//! no persistence failures at this layer.
//!
//! Totals are always recomputed by scanning the cart against the product
//! list - O(cart size) per call, recomputed on every read. That is acceptable
//! at demo scale and keeps the invariant trivially true: the total can never
//! drift from the items.

use chrono::Utc;
use rust_decimal::Decimal;

use vitrine_core::{
    CartItem, CartSnapshot, Customization, Product, ProductId, SessionStatus, ShoppingSession,
    User, UserPreferences,
};

/// How many recently-viewed products are retained.
const RECENTLY_VIEWED_CAP: usize = 10;

/// Authoritative client-side shopping state.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    products: Vec<Product>,
    categories: Vec<String>,
    cart: Vec<CartItem>,
    session: ShoppingSession,
    user: Option<User>,
    selected: Option<ProductId>,
    recently_viewed: Vec<Product>,
    recommendations: Vec<Product>,
}

impl StoreState {
    /// Create an empty store with a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the product catalog and its category list.
    ///
    /// Categories are the distinct product categories with `All` first.
    pub fn set_products(&mut self, products: Vec<Product>) {
        let mut categories = vec!["All".to_owned()];
        for product in &products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        self.products = products;
        self.categories = categories;
    }

    /// The current product catalog.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories, `All` first.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The current cart lines.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart
    }

    /// The current shopping session (items and total mirror the cart).
    #[must_use]
    pub fn session(&self) -> &ShoppingSession {
        &self.session
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The currently selected product.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected.as_ref()?;
        self.products.iter().find(|p| &p.id == id)
    }

    /// Most recently viewed products, newest first.
    #[must_use]
    pub fn recently_viewed(&self) -> &[Product] {
        &self.recently_viewed
    }

    /// Current server-provided recommendations.
    #[must_use]
    pub fn recommendations(&self) -> &[Product] {
        &self.recommendations
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If the product is already in the cart the quantity accumulates onto
    /// the existing line; otherwise a new line is appended stamped with the
    /// current time. Pass `1` for the common single-item add.
    ///
    /// Quantity is not bounded by the product's inventory count here.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        self.add_to_cart_customized(product, quantity, None);
    }

    /// Add a product with an optional customization.
    ///
    /// Accumulating onto an existing line keeps that line's customization.
    pub fn add_to_cart_customized(
        &mut self,
        product: &Product,
        quantity: u32,
        customization: Option<Customization>,
    ) {
        if let Some(item) = self.cart.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += quantity;
        } else {
            self.cart.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                customization,
                added_at: Utc::now(),
            });
        }
        self.sync_session();
    }

    /// Remove a product's line from the cart. No-op when absent.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.cart.retain(|item| &item.product_id != product_id);
        self.sync_session();
    }

    /// Replace a line's quantity.
    ///
    /// A quantity of zero delegates to [`Self::remove_from_cart`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }
        if let Some(item) = self.cart.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity;
        }
        self.sync_session();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.sync_session();
    }

    /// Sum of `price * quantity` over the cart, recomputed from the product
    /// list. A line whose product is missing from the catalog contributes
    /// zero.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart
            .iter()
            .map(|item| {
                self.products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map_or(Decimal::ZERO, |p| p.price * Decimal::from(item.quantity))
            })
            .sum()
    }

    /// Sum of quantities over the cart.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.iter().map(|item| item.quantity).sum()
    }

    /// Snapshot of the cart for socket emission.
    #[must_use]
    pub fn cart_snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.cart.clone(),
            total: self.total_price(),
            item_count: self.total_items(),
        }
    }

    /// Mirror the cart into the session and bump its timestamp.
    fn sync_session(&mut self) {
        self.session.items = self.cart.clone();
        self.session.total = self.total_price();
        self.session.updated_at = Utc::now();
    }

    // =========================================================================
    // Selection and personalization
    // =========================================================================

    /// Select a product (or clear the selection with `None`).
    pub fn select_product(&mut self, product_id: Option<ProductId>) {
        self.selected = product_id;
    }

    /// Record a product view in the recently-viewed list.
    ///
    /// Deduplicates, keeps newest first, caps the list length.
    pub fn push_recently_viewed(&mut self, product: Product) {
        self.recently_viewed.retain(|p| p.id != product.id);
        self.recently_viewed.insert(0, product);
        self.recently_viewed.truncate(RECENTLY_VIEWED_CAP);
    }

    /// Replace the recommendation list.
    pub fn set_recommendations(&mut self, products: Vec<Product>) {
        self.recommendations = products;
    }

    /// Sign a user in or out; the session keeps the user's ID.
    pub fn set_user(&mut self, user: Option<User>) {
        self.session.user_id = user.as_ref().map(|u| u.id.clone());
        self.user = user;
    }

    /// Merge updated preferences into the signed-in user. No-op when signed
    /// out.
    pub fn update_preferences(&mut self, preferences: UserPreferences) {
        if let Some(user) = self.user.as_mut() {
            user.preferences = preferences;
            user.updated_at = Utc::now();
        }
    }

    /// Move the session through its lifecycle.
    pub fn set_status(&mut self, status: SessionStatus) {
        self.session.status = status;
        self.session.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vitrine_core::{CurrencyCode, SessionStatus};

    fn product(id: &str, name: &str, price: Decimal, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price,
            currency: CurrencyCode::USD,
            category: category.to_owned(),
            images: Vec::new(),
            model_3d: None,
            inventory: 10,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn store_with_catalog() -> (StoreState, Product, Product) {
        let sofa = product("1", "Modern Sofa", Decimal::new(89_999, 2), "Furniture");
        let headphones = product("2", "Wireless Headphones", Decimal::new(199, 0), "Electronics");
        let mut store = StoreState::new();
        store.set_products(vec![sofa.clone(), headphones.clone()]);
        (store, sofa, headphones)
    }

    #[test]
    fn test_totals_match_worked_example() {
        let (mut store, sofa, headphones) = store_with_catalog();
        store.add_to_cart(&sofa, 1);
        store.add_to_cart(&headphones, 2);

        // 899.99 + 2 * 199.00 = 1297.99
        assert_eq!(store.total_price(), Decimal::new(129_799, 2));
        assert_eq!(store.total_items(), 3);
    }

    #[test]
    fn test_adding_same_product_accumulates() {
        let (mut store, sofa, _) = store_with_catalog();
        store.add_to_cart(&sofa, 1);
        store.add_to_cart(&sofa, 2);

        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_items()[0].quantity, 3);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let (mut store, sofa, headphones) = store_with_catalog();
        store.add_to_cart(&sofa, 1);
        store.add_to_cart(&headphones, 1);

        store.update_quantity(&sofa.id, 0);
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_items()[0].product_id, headphones.id);

        // Equivalent to an explicit removal.
        let mut other = StoreState::new();
        other.set_products(store.products().to_vec());
        other.add_to_cart(&headphones, 1);
        assert_eq!(store.total_price(), other.total_price());
    }

    #[test]
    fn test_update_quantity_replaces() {
        let (mut store, sofa, _) = store_with_catalog();
        store.add_to_cart(&sofa, 5);
        store.update_quantity(&sofa.id, 2);
        assert_eq!(store.total_items(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut store, sofa, _) = store_with_catalog();
        store.add_to_cart(&sofa, 1);
        store.remove_from_cart(&ProductId::new("missing"));
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_clear_cart_zeroes_totals() {
        let (mut store, sofa, headphones) = store_with_catalog();
        store.add_to_cart(&sofa, 3);
        store.add_to_cart(&headphones, 4);
        store.clear_cart();

        assert_eq!(store.total_items(), 0);
        assert_eq!(store.total_price(), Decimal::ZERO);
        assert!(store.session().items.is_empty());
    }

    #[test]
    fn test_totals_hold_across_mixed_sequences() {
        let (mut store, sofa, headphones) = store_with_catalog();
        store.add_to_cart(&sofa, 2);
        store.add_to_cart(&headphones, 1);
        store.update_quantity(&sofa.id, 1);
        store.add_to_cart(&headphones, 3);
        store.remove_from_cart(&sofa.id);

        // Only headphones remain: 4 * 199.00
        assert_eq!(store.total_items(), 4);
        assert_eq!(store.total_price(), Decimal::new(796, 0));

        let expected: Decimal = store
            .cart_items()
            .iter()
            .map(|i| {
                store
                    .products()
                    .iter()
                    .find(|p| p.id == i.product_id)
                    .map_or(Decimal::ZERO, |p| p.price * Decimal::from(i.quantity))
            })
            .sum();
        assert_eq!(store.total_price(), expected);
    }

    #[test]
    fn test_unknown_product_contributes_zero() {
        let (mut store, _, _) = store_with_catalog();
        let ghost = product("99", "Ghost", Decimal::new(500, 0), "Misc");
        // In the cart, but never added to the catalog.
        store.add_to_cart(&ghost, 2);
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_session_mirrors_cart() {
        let (mut store, sofa, _) = store_with_catalog();
        let before = store.session().updated_at;
        store.add_to_cart(&sofa, 2);

        assert_eq!(store.session().items.len(), 1);
        assert_eq!(store.session().total, Decimal::new(179_998, 2));
        assert!(store.session().updated_at >= before);
        assert_eq!(store.session().status, SessionStatus::Active);
    }

    #[test]
    fn test_recently_viewed_dedup_and_cap() {
        let (mut store, sofa, headphones) = store_with_catalog();
        for i in 0..12 {
            store.push_recently_viewed(product(
                &format!("p{i}"),
                "Filler",
                Decimal::ONE,
                "Misc",
            ));
        }
        store.push_recently_viewed(sofa.clone());
        store.push_recently_viewed(headphones);
        store.push_recently_viewed(sofa.clone());

        assert_eq!(store.recently_viewed().len(), 10);
        assert_eq!(store.recently_viewed()[0].id, sofa.id);
        let sofa_count = store
            .recently_viewed()
            .iter()
            .filter(|p| p.id == sofa.id)
            .count();
        assert_eq!(sofa_count, 1);
    }

    #[test]
    fn test_categories_distinct_with_all_first() {
        let (store, _, _) = store_with_catalog();
        assert_eq!(store.categories(), &["All", "Furniture", "Electronics"]);
    }

    #[test]
    fn test_cart_snapshot_matches_totals() {
        let (mut store, sofa, headphones) = store_with_catalog();
        store.add_to_cart(&sofa, 1);
        store.add_to_cart(&headphones, 2);

        let snapshot = store.cart_snapshot();
        assert_eq!(snapshot.item_count, 3);
        assert_eq!(snapshot.total, Decimal::new(129_799, 2));
        assert_eq!(snapshot.items.len(), 2);
    }
}
