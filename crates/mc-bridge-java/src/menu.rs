//! Java menu (window) types announced by `OpenScreen`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    Generic9x1,
    Generic9x2,
    Generic9x3,
    Generic9x4,
    Generic9x5,
    Generic9x6,
    Generic3x3,
    Anvil,
    Furnace,
    Crafting,
    Grindstone,
    Hopper,
    ShulkerBox,
    Stonecutter,
}

impl MenuType {
    /// Menu registry id on the wire.
    pub fn id(self) -> i32 {
        match self {
            MenuType::Generic9x1 => 0,
            MenuType::Generic9x2 => 1,
            MenuType::Generic9x3 => 2,
            MenuType::Generic9x4 => 3,
            MenuType::Generic9x5 => 4,
            MenuType::Generic9x6 => 5,
            MenuType::Generic3x3 => 6,
            MenuType::Anvil => 8,
            MenuType::Crafting => 12,
            MenuType::Furnace => 14,
            MenuType::Grindstone => 15,
            MenuType::Hopper => 16,
            MenuType::ShulkerBox => 20,
            MenuType::Stonecutter => 24,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        let menu = match id {
            0 => MenuType::Generic9x1,
            1 => MenuType::Generic9x2,
            2 => MenuType::Generic9x3,
            3 => MenuType::Generic9x4,
            4 => MenuType::Generic9x5,
            5 => MenuType::Generic9x6,
            6 => MenuType::Generic3x3,
            8 => MenuType::Anvil,
            12 => MenuType::Crafting,
            14 => MenuType::Furnace,
            15 => MenuType::Grindstone,
            16 => MenuType::Hopper,
            20 => MenuType::ShulkerBox,
            24 => MenuType::Stonecutter,
            _ => return None,
        };
        Some(menu)
    }
}
