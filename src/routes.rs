//! Cart routes and form markers.

use std::fmt;

/// Attribute holding the product identifier on each cart form.
pub const PRODUCT_ID_ATTRIBUTE: &str = "data-product-id";

/// Selector for the quantity input inside an update form.
pub const QUANTITY_INPUT_SELECTOR: &str = ".cart-qty-input";

/// Opaque identifier of a cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kinds of cart form that get intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Sets a new quantity for one line item.
    Update,

    /// Deletes one line item.
    Remove,
}

impl FormKind {
    /// Every intercepted form kind, in binding order.
    pub const ALL: [Self; 2] = [Self::Update, Self::Remove];

    /// CSS selector matching forms of this kind.
    pub fn selector(self) -> &'static str {
        match self {
            Self::Update => ".cart-update-form",
            Self::Remove => ".cart-remove-form",
        }
    }

    /// The action a form of this kind performs for `product`.
    pub fn action(self, product: ProductId) -> CartAction {
        match self {
            Self::Update => CartAction::Update(product),
            Self::Remove => CartAction::Remove(product),
        }
    }
}

/// A cart endpoint targeted at one product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartAction {
    /// `POST /cart/add/{id}`
    Add(ProductId),

    /// `POST /cart/update/{id}`
    Update(ProductId),

    /// `POST /cart/remove/{id}`
    Remove(ProductId),
}

impl CartAction {
    /// Returns the product this action targets.
    pub fn product(&self) -> &ProductId {
        match self {
            Self::Add(product) | Self::Update(product) | Self::Remove(product) => product,
        }
    }

    /// Returns the request path, relative to the site root.
    pub fn path(&self) -> String {
        let verb = match self {
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Remove(_) => "remove",
        };

        format!("/cart/{verb}/{}", self.product())
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POST {}", self.path())
    }
}
