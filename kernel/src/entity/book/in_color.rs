use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookInColor(bool);

impl BookInColor {
    pub fn new(in_color: impl Into<bool>) -> Self {
        Self(in_color.into())
    }
}
