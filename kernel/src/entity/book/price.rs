use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Euro to dollar conversion rate used for display.
const DOLLAR_RATE: f64 = 1.06;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPrice(f64);

impl BookPrice {
    pub fn new(price: impl Into<f64>) -> Self {
        Self(price.into())
    }

    pub fn in_dollar(&self) -> f64 {
        self.0 * DOLLAR_RATE
    }
}
