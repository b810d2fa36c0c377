use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookStock(i32);

impl BookStock {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(stock: impl Into<i32>) -> Self {
        Self(stock.into())
    }
}
